//! High-level ADXL345 device driver implementation.

use crate::config::Config;
use crate::data::{self, Acceleration, Axis};
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::Adxl345Interface;
use crate::params::{LowPowerMode, MeasureMode, OutputDataRate, Range};
use crate::registers::{Register, EXPECTED_DEVID, REG_DEVID};
use crate::units::{self, Unit};
use embedded_hal::spi::SpiDevice;

/// High-level synchronous driver for the ADXL345 accelerometer.
pub struct Adxl345<IFACE> {
    interface: IFACE,
    config: Config,
}

impl<IFACE> Adxl345<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// Nothing is written to the device until [`init`](Self::init) is called.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Converts `value` between units using the configured range.
    pub fn convert(&self, value: f32, from: Unit, to: Unit) -> f32 {
        units::convert(value, from, to, self.config.scale_factor())
    }
}

impl<SPI> Adxl345<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_spi(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Adxl345<IFACE>
where
    IFACE: Adxl345Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Global Configuration ==========================
    // ==================================================================
    /// Writes the current configuration to the device.
    pub fn init(&mut self) -> Result<(), CommE> {
        self.configure(self.config)
    }

    /// Applies a new configuration to the device.
    ///
    /// Registers are written in a fixed order:
    /// 1. `POWER_CTL`
    /// 2. `DATA_FORMAT`
    /// 3. `BW_RATE`
    ///
    /// The first failing write aborts the sequence and is returned; registers
    /// already written are left as they are. The stored configuration is only
    /// replaced once all three writes succeed.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        debug!("configuring ADXL345");

        self.apply_power_control_config(&config)?;
        self.apply_data_format_config(&config)?;
        self.apply_bw_rate_config(&config)?;

        self.config = config;
        trace!("configuration applied");
        Ok(())
    }

    /// Switches the measurement range, rewriting `DATA_FORMAT`.
    pub fn set_range(&mut self, range: Range) -> Result<(), CommE> {
        self.update_config(|config| config.range = range, Self::apply_data_format_config)
    }

    /// Changes the output data rate, rewriting `BW_RATE`.
    pub fn set_data_rate(&mut self, odr: OutputDataRate) -> Result<(), CommE> {
        self.update_config(|config| config.odr = odr, Self::apply_bw_rate_config)
    }

    /// Enters or leaves low-power mode, rewriting `BW_RATE`.
    pub fn set_low_power(&mut self, low_power: LowPowerMode) -> Result<(), CommE> {
        self.update_config(|config| config.low_power = low_power, Self::apply_bw_rate_config)
    }

    /// Switches between standby and measurement, rewriting `POWER_CTL`.
    pub fn set_measure_mode(&mut self, measure: MeasureMode) -> Result<(), CommE> {
        self.update_config(|config| config.measure = measure, Self::apply_power_control_config)
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the raw `DEVID` register.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self
            .interface
            .read_register(REG_DEVID)
            .map_err(Error::from)
    }

    /// Verifies that `DEVID` holds the ADXL345 identifier `0xE5`.
    pub fn check_identity(&mut self) -> Result<(), CommE> {
        let id = self.device_id()?;
        if id != EXPECTED_DEVID {
            warn!("unexpected DEVID {=u8:#x}", id);
            return Err(Error::DeviceIdMismatch(id));
        }

        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the raw code of one axis.
    pub fn read_axis(&mut self, axis: Axis) -> Result<u16, CommE> {
        data::read_axis(&mut self.interface, axis)
    }

    /// Reads a raw acceleration triplet.
    pub fn read_xyz_raw(&mut self) -> Result<[u16; 3], CommE> {
        data::read_xyz_raw(&mut self.interface)
    }

    /// Returns acceleration in m/s².
    pub fn read_acceleration(&mut self) -> Result<Acceleration, CommE> {
        self.read_acceleration_in(Unit::MetersPerSecondSquared)
    }

    /// Returns acceleration in the requested unit.
    pub fn read_acceleration_in(&mut self, unit: Unit) -> Result<Acceleration, CommE> {
        let mut sample = Acceleration::default();
        data::read_acceleration_in(Some(&mut self.interface), &self.config, unit, &mut sample)?;
        Ok(sample)
    }

    // ==================================================================
    // == Internal Configuration Helpers =================================
    // ==================================================================

    fn apply_power_control_config(&mut self, config: &Config) -> Result<(), CommE> {
        self.write_encoded(config.power_control())
    }

    fn apply_data_format_config(&mut self, config: &Config) -> Result<(), CommE> {
        self.write_encoded(config.data_format())
    }

    fn apply_bw_rate_config(&mut self, config: &Config) -> Result<(), CommE> {
        if config.effective_odr() != config.odr {
            debug!(
                "low-power mode clamps rate code {=u8} to {=u8}",
                config.odr.code(),
                config.effective_odr().code()
            );
        }
        self.write_encoded(config.bw_rate())
    }

    fn write_encoded<R>(&mut self, register: R) -> Result<(), CommE>
    where
        R: Register<Raw = u8> + Into<u8>,
    {
        let value: u8 = register.into();
        trace!("write {=u8:#x} <- {=u8:#x}", R::ADDRESS, value);
        self
            .interface
            .write_register(R::ADDRESS, value)
            .map_err(Error::from)
    }

    fn update_config<M, A>(&mut self, mutate: M, apply: A) -> Result<(), CommE>
    where
        M: FnOnce(&mut Config),
        A: FnOnce(&mut Self, &Config) -> Result<(), CommE>,
    {
        let mut config = self.config;
        mutate(&mut config);
        apply(self, &config)?;
        self.config = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Status;
    use crate::params::{AutoSleep, LinkMode, SleepMode, SleepRate};
    use crate::registers::{REG_BW_RATE, REG_DATA_FORMAT, REG_DATAX0, REG_DATAZ1, REG_POWER_CTL};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    extern crate std;
    use std::vec;

    // One full configuration sequence.
    const MAX_WRITES: usize = 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    /// In-memory register file that records writes and can fail on demand.
    struct FakeBus {
        registers: [u8; 64],
        writes: [(u8, u8); MAX_WRITES],
        write_count: usize,
        fail_write_to: Option<u8>,
        fail_read_from: Option<u8>,
    }

    impl FakeBus {
        fn new() -> Self {
            Self {
                registers: [0; 64],
                writes: [(0, 0); MAX_WRITES],
                write_count: 0,
                fail_write_to: None,
                fail_read_from: None,
            }
        }

        fn written(&self) -> &[(u8, u8)] {
            &self.writes[..self.write_count]
        }

        fn failing_on(register: u8) -> Self {
            Self {
                fail_write_to: Some(register),
                ..Self::new()
            }
        }
    }

    impl Adxl345Interface for FakeBus {
        type Error = BusFault;

        fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), BusFault> {
            if self.fail_write_to == Some(register) {
                return Err(BusFault);
            }
            self.writes[self.write_count] = (register, value);
            self.write_count += 1;
            self.registers[register as usize] = value;
            Ok(())
        }

        fn read_register(&mut self, register: u8) -> core::result::Result<u8, BusFault> {
            if self.fail_read_from == Some(register) {
                return Err(BusFault);
            }
            Ok(self.registers[register as usize])
        }
    }

    fn close(actual: f32, expected: f32, tolerance: f32) -> bool {
        let diff = actual - expected;
        diff <= tolerance && diff >= -tolerance
    }

    fn reference_config() -> Config {
        Config::new()
            .link(LinkMode::On)
            .auto_sleep(AutoSleep::Disabled)
            .measure(MeasureMode::Measure)
            .sleep(SleepMode::Normal)
            .sleep_rate(SleepRate::Hz2)
            .range(Range::G4)
            .low_power(LowPowerMode::LowPower)
            .odr(OutputDataRate::Hz0_78)
            .build()
    }

    #[test]
    fn init_writes_registers_in_order() {
        let mut device = Adxl345::new(FakeBus::new(), reference_config());
        device.init().unwrap();

        let (bus, _) = device.release();
        assert_eq!(
            bus.written(),
            &[(REG_POWER_CTL, 0x2A), (REG_DATA_FORMAT, 0x01), (REG_BW_RATE, 0x17)]
        );
    }

    #[test]
    fn failed_data_format_write_stops_sequence() {
        let mut device = Adxl345::new(FakeBus::failing_on(REG_DATA_FORMAT), Config::default());

        let result = device.configure(reference_config());
        assert_eq!(result, Err(Error::Interface(BusFault)));
        assert_eq!(Status::of(&result), Status::Failed);

        // Configuration is not adopted after a failed sequence.
        assert_eq!(*device.config(), Config::default());
        let (bus, _) = device.release();
        assert_eq!(bus.written(), &[(REG_POWER_CTL, 0x2A)]);
    }

    #[test]
    fn failed_power_control_write_skips_everything_else() {
        let mut device = Adxl345::new(FakeBus::failing_on(REG_POWER_CTL), reference_config());

        assert_eq!(device.init(), Err(Error::Interface(BusFault)));
        assert!(device.release().0.written().is_empty());
    }

    #[test]
    fn identity_check_accepts_expected_id() {
        let mut bus = FakeBus::new();
        bus.registers[REG_DEVID as usize] = 0xE5;
        let mut device = Adxl345::new(bus, Config::default());

        assert_eq!(device.check_identity(), Ok(()));
    }

    #[test]
    fn identity_check_rejects_other_ids() {
        let mut bus = FakeBus::new();
        bus.registers[REG_DEVID as usize] = 0xE6;
        let mut device = Adxl345::new(bus, Config::default());

        let result = device.check_identity();
        assert_eq!(result, Err(Error::DeviceIdMismatch(0xE6)));
        assert_eq!(Status::of(&result), Status::Failed);
    }

    #[test]
    fn identity_check_reports_bus_fault() {
        let mut bus = FakeBus::new();
        bus.fail_read_from = Some(REG_DEVID);
        let mut device = Adxl345::new(bus, Config::default());

        let result = device.check_identity();
        assert_eq!(result, Err(Error::Interface(BusFault)));
        assert_eq!(Status::of(&result), Status::Failed);
    }

    #[test]
    fn read_acceleration_propagates_read_fault() {
        let mut bus = FakeBus::new();
        bus.registers[REG_DATAX0 as usize] = 100;
        bus.fail_read_from = Some(REG_DATAZ1);
        let mut device = Adxl345::new(bus, Config::new().range(Range::G4).build());

        let result = device.read_acceleration();
        assert_eq!(result, Err(Error::Interface(BusFault)));
        assert_eq!(Status::of(&result), Status::Failed);
    }

    #[test]
    fn failed_read_leaves_caller_sample_untouched() {
        let mut bus = FakeBus::new();
        bus.fail_read_from = Some(REG_DATAX0);
        let config = Config::default();
        let mut sample = Acceleration { x: 1.0, y: 2.0, z: 3.0 };

        let result = data::read_acceleration(Some(&mut bus), &config, &mut sample);
        assert_eq!(result, Err(Error::Interface(BusFault)));
        assert_eq!(sample, Acceleration { x: 1.0, y: 2.0, z: 3.0 });
    }

    #[test]
    fn set_range_rewrites_data_format_and_scale() {
        let mut device = Adxl345::new(FakeBus::new(), Config::default());
        device.set_range(Range::G16).unwrap();

        assert_eq!(device.config().range, Range::G16);
        assert!(close(device.convert(1.0, Unit::Raw, Unit::G), 0.0312, 1e-6));
        assert_eq!(device.release().0.written(), &[(REG_DATA_FORMAT, 0x03)]);
    }

    #[test]
    fn set_low_power_applies_clamp_but_keeps_rate() {
        let config = Config::new().odr(OutputDataRate::Hz3200).build();
        let mut device = Adxl345::new(FakeBus::new(), config);
        device.set_low_power(LowPowerMode::LowPower).unwrap();

        assert_eq!(device.config().odr, OutputDataRate::Hz3200);
        assert_eq!(device.release().0.written(), &[(REG_BW_RATE, 0x1C)]);
    }

    #[test]
    fn failed_update_keeps_previous_config() {
        let mut device = Adxl345::new(FakeBus::failing_on(REG_POWER_CTL), Config::default());

        assert!(device.set_measure_mode(MeasureMode::Standby).is_err());
        assert_eq!(device.config().measure, MeasureMode::Measure);
    }

    #[test]
    fn set_data_rate_rewrites_bw_rate() {
        let mut device = Adxl345::new(FakeBus::new(), Config::default());
        device.set_data_rate(OutputDataRate::Hz800).unwrap();

        assert_eq!(device.release().0.written(), &[(REG_BW_RATE, 0x0D)]);
    }

    #[test]
    fn read_acceleration_converts_raw_codes() {
        let mut bus = FakeBus::new();
        bus.registers[REG_DATAX0 as usize] = 100;
        let config = Config::new().range(Range::G4).build();
        let mut device = Adxl345::new(bus, config);

        assert_eq!(device.read_xyz_raw().unwrap(), [100, 0, 0]);
        let g = device.read_acceleration_in(Unit::G).unwrap();
        assert!(close(g.x, 0.78, 1e-4));
        let metric = device.read_acceleration().unwrap();
        assert!(close(metric.x, 7.6518, 1e-3));
        assert_eq!(metric.y, 0.0);
    }

    #[test]
    fn spi_session_matches_expected_frames() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(vec![0x80, 0x00], vec![0x00, 0xE5]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x2D, 0x2A]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x31, 0x01]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x2C, 0x17]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(vec![0xB6, 0x00], vec![0x00, 0xFF]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(vec![0xB7, 0x00], vec![0x00, 0xFD]),
            SpiTransaction::transaction_end(),
        ];
        let mut device = Adxl345::new_spi(SpiMock::new(&expectations), reference_config());

        device.check_identity().unwrap();
        device.init().unwrap();
        assert_eq!(device.read_axis(Axis::Z).unwrap(), 0x1FF);

        let (mut spi, _) = device.release_spi();
        spi.done();
    }
}

//! Configuration primitives for the ADXL345 driver.

use crate::params::{
    AutoSleep,
    InterruptPolarity,
    Justify,
    LinkMode,
    LowPowerMode,
    MeasureMode,
    OutputDataRate,
    Range,
    Resolution,
    SleepMode,
    SleepRate,
    SpiMode,
};
use crate::registers::{BwRate, DataFormat, PowerControl};

/// User-facing configuration for the ADXL345 sensor.
///
/// Fields are grouped by the register they end up in: `POWER_CTL`,
/// `DATA_FORMAT` and `BW_RATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Activity/inactivity link selection.
    pub link: LinkMode,
    /// Autosleep enable.
    pub auto_sleep: AutoSleep,
    /// Standby or measurement mode.
    pub measure: MeasureMode,
    /// Normal or sleep mode.
    pub sleep: SleepMode,
    /// Sampling frequency while asleep.
    pub sleep_rate: SleepRate,
    /// SPI wire mode.
    pub spi: SpiMode,
    /// Interrupt pin polarity.
    pub int_polarity: InterruptPolarity,
    /// Output resolution.
    pub resolution: Resolution,
    /// Data justification.
    pub justify: Justify,
    /// Measurement range; also selects the conversion scale factor.
    pub range: Range,
    /// Low-power mode selection.
    pub low_power: LowPowerMode,
    /// Requested output data rate. Kept as given even when low-power mode
    /// narrows what is written to the device.
    pub odr: OutputDataRate,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Rate code that is actually written to `BW_RATE`.
    pub const fn effective_odr(&self) -> OutputDataRate {
        match self.low_power {
            LowPowerMode::LowPower => self.odr.clamp_low_power(),
            LowPowerMode::Normal => self.odr,
        }
    }

    /// Milli-g per LSB for the configured range.
    pub fn scale_factor(&self) -> f32 {
        self.range.scale_factor()
    }

    /// Encodes the power-control group.
    pub fn power_control(&self) -> PowerControl {
        PowerControl::new()
            .with_link(self.link)
            .with_auto_sleep(self.auto_sleep)
            .with_measure(self.measure)
            .with_sleep(self.sleep)
            .with_sleep_rate(self.sleep_rate)
    }

    /// Encodes the data-format group.
    pub fn data_format(&self) -> DataFormat {
        DataFormat::new()
            .with_spi(self.spi)
            .with_int_invert(self.int_polarity)
            .with_resolution(self.resolution)
            .with_justify(self.justify)
            .with_range(self.range)
    }

    /// Encodes the bandwidth/rate group, applying the low-power clamp.
    pub fn bw_rate(&self) -> BwRate {
        BwRate::new()
            .with_low_power(self.low_power)
            .with_rate(self.effective_odr())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the link bit.
    pub fn link(mut self, link: LinkMode) -> Self {
        self.config.link = link;
        self
    }

    /// Sets the autosleep bit.
    pub fn auto_sleep(mut self, auto_sleep: AutoSleep) -> Self {
        self.config.auto_sleep = auto_sleep;
        self
    }

    /// Selects standby or measurement mode.
    pub fn measure(mut self, measure: MeasureMode) -> Self {
        self.config.measure = measure;
        self
    }

    /// Selects normal or sleep mode.
    pub fn sleep(mut self, sleep: SleepMode) -> Self {
        self.config.sleep = sleep;
        self
    }

    /// Sets the sleep-mode sampling frequency.
    pub fn sleep_rate(mut self, sleep_rate: SleepRate) -> Self {
        self.config.sleep_rate = sleep_rate;
        self
    }

    /// Sets the SPI wire mode.
    pub fn spi(mut self, spi: SpiMode) -> Self {
        self.config.spi = spi;
        self
    }

    /// Sets the interrupt polarity.
    pub fn int_polarity(mut self, polarity: InterruptPolarity) -> Self {
        self.config.int_polarity = polarity;
        self
    }

    /// Sets the output resolution.
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Sets the data justification.
    pub fn justify(mut self, justify: Justify) -> Self {
        self.config.justify = justify;
        self
    }

    /// Overrides the measurement range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Selects normal or low-power operation.
    pub fn low_power(mut self, low_power: LowPowerMode) -> Self {
        self.config.low_power = low_power;
        self
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link: LinkMode::Off,
            auto_sleep: AutoSleep::Disabled,
            measure: MeasureMode::Measure,
            sleep: SleepMode::Normal,
            sleep_rate: SleepRate::Hz8,
            spi: SpiMode::FourWire,
            int_polarity: InterruptPolarity::ActiveHigh,
            resolution: Resolution::TenBit,
            justify: Justify::Right,
            range: Range::G2,
            low_power: LowPowerMode::Normal,
            odr: OutputDataRate::Hz100,
        }
    }
}

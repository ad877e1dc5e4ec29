//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::SpiDevice;

use super::Adxl345Interface;
use crate::registers::address_byte;

// Every register access is one address byte plus one data byte.
const FRAME_LEN: usize = 2;
// Clocked out while the device shifts the register value back.
const DUMMY_BYTE: u8 = 0x00;

/// SPI-based interface implementation for the ADXL345 driver.
///
/// Chip select is owned by the `SpiDevice`, which asserts it around each frame.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Adxl345Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        let frame: [u8; FRAME_LEN] = [address_byte(register, false), value];
        self.spi.write(&frame)
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut frame: [u8; FRAME_LEN] = [address_byte(register, true), DUMMY_BYTE];
        self.spi.transfer_in_place(&mut frame)?;
        Ok(frame[1])
    }
}

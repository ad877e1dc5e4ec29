//! Bus interface abstraction for the ADXL345 driver.

pub mod spi;

/// Abstraction over the low-level bus access required by the driver.
///
/// Every transaction is a single two-byte frame: the address byte followed by
/// either the value to write or a dummy byte clocked out during a read.
pub trait Adxl345Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;
}

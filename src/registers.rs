//! Register map definitions for the ADXL345 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    AutoSleep, InterruptPolarity, Justify, LinkMode, LowPowerMode, MeasureMode, OutputDataRate,
    Range, Resolution, SleepMode, SleepRate, SpiMode,
};

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `THRESH_TAP`.
pub const REG_THRESH_TAP: u8 = 0x1D;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `DUR`.
pub const REG_DUR: u8 = 0x21;
/// Register address of `LATENT`.
pub const REG_LATENT: u8 = 0x22;
/// Register address of `WINDOW`.
pub const REG_WINDOW: u8 = 0x23;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `TIME_INACT`.
pub const REG_TIME_INACT: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `THRESH_FF`.
pub const REG_THRESH_FF: u8 = 0x28;
/// Register address of `TIME_FF`.
pub const REG_TIME_FF: u8 = 0x29;
/// Register address of `TAP_AXES`.
pub const REG_TAP_AXES: u8 = 0x2A;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_MAP`.
pub const REG_INT_MAP: u8 = 0x2F;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0` (X-axis low byte).
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `DATAX1` (X-axis high byte).
pub const REG_DATAX1: u8 = 0x33;
/// Register address of `DATAY0` (Y-axis low byte).
pub const REG_DATAY0: u8 = 0x34;
/// Register address of `DATAY1` (Y-axis high byte).
pub const REG_DATAY1: u8 = 0x35;
/// Register address of `DATAZ0` (Z-axis low byte).
pub const REG_DATAZ0: u8 = 0x36;
/// Register address of `DATAZ1` (Z-axis high byte).
pub const REG_DATAZ1: u8 = 0x37;
/// Register address of `FIFO_CTL`.
pub const REG_FIFO_CTL: u8 = 0x38;

/// Fixed value of the `DEVID` register.
pub const EXPECTED_DEVID: u8 = 0xE5;

/// Direction bit OR-ed into the address byte of a read frame.
pub const READ_FLAG: u8 = 0x80;
/// Direction bit OR-ed into the address byte of a write frame.
pub const WRITE_FLAG: u8 = 0x00;
/// Bits of the address byte that carry the register address.
pub const ADDRESS_MASK: u8 = 0x7F;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Sleep-mode sampling frequency (bits 1:0).
    pub sleep_rate: SleepRate,
    // Sleep bit (bit 2).
    pub sleep: SleepMode,
    // Measure bit (bit 3).
    pub measure: MeasureMode,
    // Autosleep bit (bit 4).
    pub auto_sleep: AutoSleep,
    // Link bit (bit 5).
    pub link: LinkMode,
    #[skip]
    __: B2,
}

impl From<u8> for PowerControl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<PowerControl> for u8 {
    fn from(value: PowerControl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // Measurement range (bits 1:0).
    pub range: Range,
    // Justification (bit 2).
    pub justify: Justify,
    // Full-resolution bit (bit 3).
    pub resolution: Resolution,
    #[skip]
    __: B1,
    // Interrupt polarity (bit 5).
    pub int_invert: InterruptPolarity,
    // SPI wire mode (bit 6).
    pub spi: SpiMode,
    // SELF_TEST (bit 7) is never driven by this driver.
    #[skip]
    __: B1,
}

impl From<u8> for DataFormat {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<DataFormat> for u8 {
    fn from(value: DataFormat) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `BW_RATE` register (address `0x2C`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwRate {
    // Output data rate code (bits 3:0).
    pub rate: OutputDataRate,
    // Low-power bit (bit 4).
    pub low_power: LowPowerMode,
    #[skip]
    __: B3,
}

impl From<u8> for BwRate {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<BwRate> for u8 {
    fn from(value: BwRate) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for PowerControl {
    type Raw = u8;
    const ADDRESS: u8 = REG_POWER_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for DataFormat {
    type Raw = u8;
    const ADDRESS: u8 = REG_DATA_FORMAT;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for BwRate {
    type Raw = u8;
    const ADDRESS: u8 = REG_BW_RATE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x0A);
}

/// Builds the address byte that opens a register frame.
pub const fn address_byte(register: u8, is_read: bool) -> u8 {
    let flag = if is_read { READ_FLAG } else { WRITE_FLAG };
    (register & ADDRESS_MASK) | flag
}

//! Strongly typed parameter enumerations for the ADXL345 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl345::params::{MeasureMode, OutputDataRate, Range};
//!
//! let odr = OutputDataRate::Hz100;
//! let range = Range::G4;
//! let mode = MeasureMode::Measure;
//! assert_eq!(range.scale_factor(), 7.8);
//! let _ = (odr, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Milli-g per LSB at the ±2 g range; every wider range doubles it.
pub const BASE_SCALE_FACTOR: f32 = 3.9;

/// Link bit (`POWER_CTL.LINK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum LinkMode {
    /// Activity and inactivity detection run independently.
    Off = 0,
    /// Activity detection waits for inactivity and vice versa.
    On = 1,
}

/// Autosleep control bit (`POWER_CTL.AUTO_SLEEP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum AutoSleep {
    /// Autosleep disabled.
    Disabled = 0,
    /// Autosleep enabled.
    Enabled = 1,
}

/// Measurement bit (`POWER_CTL.MEASURE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum MeasureMode {
    /// Standby; no conversions, lowest power.
    Standby = 0,
    /// Measurement mode.
    Measure = 1,
}

/// Sleep bit (`POWER_CTL.SLEEP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum SleepMode {
    /// Normal operation.
    Normal = 0,
    /// Sleep mode, sampling at [`SleepRate`].
    Sleep = 1,
}

/// Sampling frequency while asleep (`POWER_CTL.WAKEUP[1:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum SleepRate {
    /// 8 Hz.
    Hz8 = 0b00,
    /// 4 Hz.
    Hz4 = 0b01,
    /// 2 Hz.
    Hz2 = 0b10,
    /// 1 Hz.
    Hz1 = 0b11,
}

impl SleepRate {
    /// Returns the sleep-mode sampling frequency in hertz.
    pub const fn hz(self) -> u8 {
        match self {
            Self::Hz8 => 8,
            Self::Hz4 => 4,
            Self::Hz2 => 2,
            Self::Hz1 => 1,
        }
    }
}

/// SPI wire mode (`DATA_FORMAT.SPI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum SpiMode {
    /// 4-wire SPI.
    FourWire = 0,
    /// 3-wire SPI (SDIO).
    ThreeWire = 1,
}

/// Interrupt pin polarity (`DATA_FORMAT.INT_INVERT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPolarity {
    /// Interrupts drive the pin high.
    ActiveHigh = 0,
    /// Interrupts drive the pin low.
    ActiveLow = 1,
}

/// Output resolution (`DATA_FORMAT.FULL_RES`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Resolution {
    /// Fixed 10-bit output at every range.
    TenBit = 0,
    /// Resolution grows with range, keeping 4 mg/LSB.
    Full = 1,
}

/// Data justification (`DATA_FORMAT.JUSTIFY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Justify {
    /// Right-justified with sign extension.
    Right = 0,
    /// Left-justified (MSB mode).
    Left = 1,
}

/// Measurement range (`DATA_FORMAT.RANGE[1:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl Range {
    /// Returns the full-scale magnitude in g.
    pub const fn g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Returns the milli-g per LSB used for unit conversion: `2^code × 3.9`.
    pub fn scale_factor(self) -> f32 {
        (1u8 << self as u8) as f32 * BASE_SCALE_FACTOR
    }
}

/// Low-power bit (`BW_RATE.LOW_POWER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum LowPowerMode {
    /// Normal operation.
    Normal = 0,
    /// Reduced power at the cost of noise; limits the usable data rates.
    LowPower = 1,
}

/// Output data rate selections (`BW_RATE.RATE[3:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// 0.10 Hz.
    Hz0_10 = 0,
    /// 0.20 Hz.
    Hz0_20 = 1,
    /// 0.39 Hz.
    Hz0_39 = 2,
    /// 0.78 Hz.
    Hz0_78 = 3,
    /// 1.56 Hz.
    Hz1_56 = 4,
    /// 3.13 Hz.
    Hz3_13 = 5,
    /// 6.25 Hz.
    Hz6_25 = 6,
    /// 12.5 Hz.
    Hz12_5 = 7,
    /// 25 Hz.
    Hz25 = 8,
    /// 50 Hz.
    Hz50 = 9,
    /// 100 Hz.
    Hz100 = 10,
    /// 200 Hz.
    Hz200 = 11,
    /// 400 Hz.
    Hz400 = 12,
    /// 800 Hz.
    Hz800 = 13,
    /// 1600 Hz.
    Hz1600 = 14,
    /// 3200 Hz.
    Hz3200 = 15,
}

impl OutputDataRate {
    /// Slowest rate usable in low-power mode.
    pub const LOW_POWER_MIN: Self = Self::Hz12_5;
    /// Fastest rate usable in low-power mode.
    pub const LOW_POWER_MAX: Self = Self::Hz400;

    /// Returns the rate for a 4-bit code; upper bits are ignored.
    pub const fn from_code(code: u8) -> Self {
        match code & 0x0F {
            0 => Self::Hz0_10,
            1 => Self::Hz0_20,
            2 => Self::Hz0_39,
            3 => Self::Hz0_78,
            4 => Self::Hz1_56,
            5 => Self::Hz3_13,
            6 => Self::Hz6_25,
            7 => Self::Hz12_5,
            8 => Self::Hz25,
            9 => Self::Hz50,
            10 => Self::Hz100,
            11 => Self::Hz200,
            12 => Self::Hz400,
            13 => Self::Hz800,
            14 => Self::Hz1600,
            _ => Self::Hz3200,
        }
    }

    /// Returns the 4-bit register code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the ODR in hertz.
    pub const fn hz(self) -> f32 {
        match self {
            Self::Hz0_10 => 0.10,
            Self::Hz0_20 => 0.20,
            Self::Hz0_39 => 0.39,
            Self::Hz0_78 => 0.78,
            Self::Hz1_56 => 1.56,
            Self::Hz3_13 => 3.13,
            Self::Hz6_25 => 6.25,
            Self::Hz12_5 => 12.5,
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::Hz800 => 800.0,
            Self::Hz1600 => 1_600.0,
            Self::Hz3200 => 3_200.0,
        }
    }

    /// Clamps the rate into the window supported in low-power mode.
    pub const fn clamp_low_power(self) -> Self {
        let code = self.code();
        if code < Self::LOW_POWER_MIN.code() {
            Self::LOW_POWER_MIN
        } else if code > Self::LOW_POWER_MAX.code() {
            Self::LOW_POWER_MAX
        } else {
            self
        }
    }
}

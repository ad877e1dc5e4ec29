//! Axis sampling and assembly of raw output codes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::Adxl345Interface;
use crate::registers::{
    REG_DATAX0, REG_DATAX1, REG_DATAY0, REG_DATAY1, REG_DATAZ0, REG_DATAZ1,
};
use crate::units::{convert, Unit};

/// Largest raw code an axis can report.
pub const RAW_MAX: u16 = 0x03FF;
// Only bits 9:8 of the high data register are kept.
const HIGH_BYTE_MASK: u16 = 0x0300;

/// One of the three measurement axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis (`DATAX0`/`DATAX1`).
    X,
    /// Y axis (`DATAY0`/`DATAY1`).
    Y,
    /// Z axis (`DATAZ0`/`DATAZ1`).
    Z,
}

impl Axis {
    /// All axes in read order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the `(low, high)` data register pair for this axis.
    pub const fn registers(self) -> (u8, u8) {
        match self {
            Self::X => (REG_DATAX0, REG_DATAX1),
            Self::Y => (REG_DATAY0, REG_DATAY1),
            Self::Z => (REG_DATAZ0, REG_DATAZ1),
        }
    }
}

/// Acceleration on all three axes, filled in by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

/// Combines the two data registers of one axis into a raw code.
///
/// The low byte provides bits 7:0 and only bits 1:0 of the high byte are kept
/// as bits 9:8. The result is never sign-extended, so it always lies in
/// `0..=RAW_MAX`.
#[inline]
pub const fn assemble_raw(low: u8, high: u8) -> u16 {
    (((high as u16) << 8) & HIGH_BYTE_MASK) | low as u16
}

/// Reads the low then the high register and assembles the raw code.
///
/// The registers are taken as given; pairing them correctly is up to the caller.
pub fn read_raw<IFACE>(interface: &mut IFACE, low: u8, high: u8) -> Result<u16, IFACE::Error>
where
    IFACE: Adxl345Interface,
{
    let lsb = interface.read_register(low)?;
    let msb = interface.read_register(high)?;
    Ok(assemble_raw(lsb, msb))
}

/// Reads the raw code of a single axis.
pub fn read_axis<IFACE>(interface: &mut IFACE, axis: Axis) -> Result<u16, IFACE::Error>
where
    IFACE: Adxl345Interface,
{
    let (low, high) = axis.registers();
    read_raw(interface, low, high)
}

/// Reads the raw codes of X, Y and Z in that order, stopping at the first
/// failing read.
pub fn read_xyz_raw<IFACE>(interface: &mut IFACE) -> Result<[u16; 3], IFACE::Error>
where
    IFACE: Adxl345Interface,
{
    let x = read_axis(interface, Axis::X)?;
    let y = read_axis(interface, Axis::Y)?;
    let z = read_axis(interface, Axis::Z)?;
    Ok([x, y, z])
}

/// Samples all axes and stores them in `sample` converted to `unit`.
///
/// Fails with [`Error::MissingInterface`] when no interface is supplied. The
/// first failing register read ends the pass; remaining axes are not read and
/// the sample is left untouched in both cases.
pub fn read_acceleration_in<IFACE>(
    interface: Option<&mut IFACE>,
    config: &Config,
    unit: Unit,
    sample: &mut Acceleration,
) -> Result<(), IFACE::Error>
where
    IFACE: Adxl345Interface,
{
    let interface = interface.ok_or(Error::MissingInterface)?;
    let [x, y, z] = read_xyz_raw(interface)?;
    trace!("raw sample x={} y={} z={}", x, y, z);

    let scale = config.scale_factor();
    sample.x = convert(f32::from(x), Unit::Raw, unit, scale);
    sample.y = convert(f32::from(y), Unit::Raw, unit, scale);
    sample.z = convert(f32::from(z), Unit::Raw, unit, scale);
    Ok(())
}

/// Samples all axes and stores them in `sample` in m/s².
pub fn read_acceleration<IFACE>(
    interface: Option<&mut IFACE>,
    config: &Config,
    sample: &mut Acceleration,
) -> Result<(), IFACE::Error>
where
    IFACE: Adxl345Interface,
{
    read_acceleration_in(interface, config, Unit::MetersPerSecondSquared, sample)
}

//! Error handling primitives for the ADXL345 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// No bus interface was supplied to an entry point that needs one.
    MissingInterface,
    /// `DEVID` returned something other than `0xE5`; carries the byte read.
    DeviceIdMismatch(u8),
}

impl<E> Error<E> {
    /// Collapses the error into the coarse status reported to callers.
    ///
    /// Bus faults and identity mismatches share [`Status::Failed`]; only a
    /// missing interface is reported separately.
    pub const fn status(&self) -> Status {
        match self {
            Self::Interface(_) | Self::DeviceIdMismatch(_) => Status::Failed,
            Self::MissingInterface => Status::MissingReference,
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}

/// Enumerated outcome of a driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// The operation completed.
    Ok,
    /// A bus transfer failed or the device did not identify as an ADXL345.
    Failed,
    /// The bus interface reference was absent.
    MissingReference,
}

impl Status {
    /// Derives the status of a finished driver call.
    pub fn of<T, E>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(err) => err.status(),
        }
    }
}

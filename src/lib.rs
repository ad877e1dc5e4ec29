#![no_std]

#[macro_use]
mod log;

mod error;

pub mod config;
pub mod data;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;
pub mod units;

pub use crate::data::Acceleration;
pub use crate::device::Adxl345;
pub use crate::error::{Error, Result, Status};

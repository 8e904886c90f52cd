//! Driver for the INA219 current/power monitor with fixed calibration profiles
//!
//! The driver talks to the device through the [`embedded-hal`](embedded_hal) I2C traits, either
//! blocking ([`SyncIna219`], feature `sync`) or non-blocking ([`AsyncIna219`], feature `async`).
//!
//! Bus and shunt voltage can be read right away. Current and power need a
//! [`CalibrationProfile`](calibration::CalibrationProfile) to be selected first:
//!
//! ```rust,no_run
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! use ina219_profiles::address::Address;
//! use ina219_profiles::calibration::CalibrationProfile;
//! use ina219_profiles::SyncIna219;
//!
//! let mut ina = SyncIna219::new(i2c, Address::default());
//! ina.select_profile(CalibrationProfile::RANGE_32V_1A).unwrap();
//!
//! let volts = ina.bus_voltage_v().unwrap();
//! let milli_amps = ina.current_ma().unwrap();
//! ```
//!
//! With the `defmt` feature every register transaction is logged at trace level.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(clippy::pedantic)]
#![warn(clippy::missing_const_for_fn)]

pub mod address;
pub mod calibration;
pub mod codec;
pub mod configuration;
pub mod errors;
pub mod measurements;
pub mod register;

#[cfg(feature = "async")]
mod r#async;

#[cfg(feature = "async")]
pub use r#async::INA219 as AsyncIna219;

#[cfg(feature = "sync")]
mod blocking {
    include!(concat!(env!("OUT_DIR"), "/blocking.rs"));
}

#[cfg(feature = "sync")]
pub use blocking::INA219 as SyncIna219;

#[cfg(all(test, feature = "sync"))]
mod tests;

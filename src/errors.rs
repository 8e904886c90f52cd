//! Errors that can be returned by the different functions
//!
//! Errors of the underlying I2C device are never retried or swallowed, they are handed back as is.
//! Operations that have no failure mode besides the bus return the bus error directly.

use crate::register::RegisterAddress;
use core::fmt::{Debug, Display, Formatter};

/// The session was created and a profile applied at the same time, but applying it failed
///
/// Contains the I2C device so it can be reused.
pub struct InitializationError<I2C, E> {
    /// Why the initialization failed
    pub reason: E,
    /// The I2C device that was passed to the driver
    pub device: I2C,
}

impl<I2C, E> InitializationError<I2C, E> {
    pub(crate) const fn new(reason: E, device: I2C) -> Self {
        Self { reason, device }
    }
}

impl<I2C, E: Debug> Debug for InitializationError<I2C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InitializationError")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

impl<I2C, E: Debug> Display for InitializationError<I2C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Applying the calibration profile failed: {:?}", self.reason)
    }
}

#[cfg(feature = "std")]
impl<I2C, E> std::error::Error for InitializationError<I2C, E>
where
    E: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Errors that can happen when a value derived from the calibration is read
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurrentReadError<I2cErr> {
    /// An I2C read or write failed
    I2cError(I2cErr),
    /// No calibration profile was selected yet, so current and power are not computed by the device
    NotCalibrated,
}

impl<E> From<E> for CurrentReadError<E> {
    fn from(value: E) -> Self {
        Self::I2cError(value)
    }
}

impl<E: Debug> Display for CurrentReadError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cError(err) => write!(f, "I2C error: {err:?}"),
            Self::NotCalibrated => write!(f, "No calibration profile selected"),
        }
    }
}

#[cfg(feature = "std")]
impl<I2cErr> std::error::Error for CurrentReadError<I2cErr>
where
    I2cErr: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::I2cError(err) => Some(err),
            Self::NotCalibrated => None,
        }
    }
}

/// Errors that can happen when a register is written directly
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWriteError<I2cErr> {
    /// The I2C write failed
    I2cError(I2cErr),
    /// The register can only be read
    ReadOnly(RegisterAddress),
}

impl<E> From<E> for RegisterWriteError<E> {
    fn from(value: E) -> Self {
        Self::I2cError(value)
    }
}

impl<E: Debug> Display for RegisterWriteError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cError(err) => write!(f, "I2C error: {err:?}"),
            Self::ReadOnly(reg) => write!(f, "Register {reg:?} is read only"),
        }
    }
}

#[cfg(feature = "std")]
impl<I2cErr> std::error::Error for RegisterWriteError<I2cErr>
where
    I2cErr: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::I2cError(err) => Some(err),
            Self::ReadOnly(_) => None,
        }
    }
}

#![allow(clippy::module_name_repetitions)]

//! Register map of the INA219
//!
//! Every register is 16 bits wide and is transferred most significant byte first. Some registers
//! hold unsigned values, the measurement registers hold two's complement values. See
//! [`codec`](crate::codec) for the conversion between the wire format and integers.

use crate::codec::Signedness;

/// Addresses of the internal registers of the INA219
///
/// See [`INA219::read_raw()`](crate::SyncIna219::read_raw)
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAddress {
    /// Configuration register, see [`Configuration`](crate::configuration::Configuration)
    Configuration = 0x00,
    /// Shunt voltage register, see [`ShuntVoltage`](crate::measurements::ShuntVoltage)
    ShuntVoltage = 0x01,
    /// Bus voltage register, see [`BusVoltage`](crate::measurements::BusVoltage)
    BusVoltage = 0x02,
    /// Power register, see [`PowerRegister`](crate::measurements::PowerRegister)
    Power = 0x03,
    /// Current register, see [`CurrentRegister`](crate::measurements::CurrentRegister)
    Current = 0x04,
    /// Calibration register, see [`CalibrationProfile`](crate::calibration::CalibrationProfile)
    Calibration = 0x05,
}

impl RegisterAddress {
    /// All registers in address order
    pub const ALL: [Self; 6] = [
        Self::Configuration,
        Self::ShuntVoltage,
        Self::BusVoltage,
        Self::Power,
        Self::Current,
        Self::Calibration,
    ];

    /// The 8 bit address of the register on the device
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// How the 16 bits of this register are interpreted
    #[must_use]
    pub const fn signedness(self) -> Signedness {
        match self {
            Self::Configuration | Self::BusVoltage | Self::Calibration => Signedness::Unsigned,
            Self::ShuntVoltage | Self::Power | Self::Current => Signedness::Signed,
        }
    }

    /// Only the configuration and calibration register accept writes
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Configuration | Self::Calibration)
    }
}

pub trait Register {
    const ADDRESS: RegisterAddress;
}

pub trait ReadRegister: Register {
    fn from_bits(bits: u16) -> Self;
}

pub trait WriteRegister: Register {
    fn as_bits(&self) -> u16;
}

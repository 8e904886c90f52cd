//! Typed contents of the measurement registers

use crate::codec::signed_from_bits;
use crate::register::{ReadRegister, Register, RegisterAddress};

/// A shunt voltage measurement as read from the shunt voltage register
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShuntVoltage(i16);

impl ShuntVoltage {
    /// Turns the bits read from the register into a `ShuntVoltage`
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(signed_from_bits(bits))
    }

    /// Get the shunt voltage in 10µV, this is the resolution used by the INA219.
    ///
    /// See also:
    /// * [`Self::shunt_voltage_uv`] for measurement in µV
    /// * [`Self::shunt_voltage_mv`] for measurement in mV
    #[must_use]
    pub const fn shunt_voltage_10uv(self) -> i16 {
        self.0
    }

    /// Get the shunt voltage in µV
    #[must_use]
    pub fn shunt_voltage_uv(self) -> i32 {
        i32::from(self.0) * 10
    }

    /// Get the shunt voltage in mV, truncating trailing digits
    #[must_use]
    pub const fn shunt_voltage_mv(self) -> i16 {
        self.0 / 100
    }

    /// Get the shunt voltage in mV including the fractional part
    #[must_use]
    pub fn millivolts(self) -> f32 {
        f32::from(self.0) * 0.01
    }
}

impl Register for ShuntVoltage {
    const ADDRESS: RegisterAddress = RegisterAddress::ShuntVoltage;
}

impl ReadRegister for ShuntVoltage {
    fn from_bits(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

/// Contents of the bus voltage register
///
/// Next to the measurement this contains two flags about the last conversion in the lowest bits.
/// Bit 2 is reserved.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusVoltage(u16);

impl BusVoltage {
    /// Create `BusVoltage` from the contents of the register.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Return the bus voltage in the internal resolution of 4mV
    ///
    /// See also [`Self::voltage_mv`]
    #[must_use]
    pub const fn voltage_4mv(self) -> u16 {
        self.0 >> 3
    }

    /// Return the bus voltage in mV
    #[must_use]
    pub const fn voltage_mv(self) -> u16 {
        self.voltage_4mv() * 4
    }

    /// Return the bus voltage in V
    #[must_use]
    pub fn volts(self) -> f32 {
        f32::from(self.voltage_mv()) * 0.001
    }

    /// Check if the conversion ready flag is set
    ///
    /// The registers of the INA219 always return the last measurement value. But this flag can be
    /// used to check if **new** data is available.
    ///
    /// The flag is set when a conversion finished.
    /// The flag is cleared if:
    /// * The operation mode of the configuration register is written (except for power down or ADC off)
    /// * The power register was read
    #[must_use]
    pub const fn is_conversion_ready(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// This flag is set if the power or current calculation overflowed. Thus the power and/or
    /// current data might be wrong.
    #[must_use]
    pub const fn has_math_overflowed(self) -> bool {
        self.0 & 1 != 0
    }
}

impl Register for BusVoltage {
    const ADDRESS: RegisterAddress = RegisterAddress::BusVoltage;
}

impl ReadRegister for BusVoltage {
    fn from_bits(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

/// Raw contents of the current register
///
/// Only meaningful once a calibration was written. One count equals the current LSB of the active
/// [`CalibrationProfile`](crate::calibration::CalibrationProfile).
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentRegister(pub i16);

impl Register for CurrentRegister {
    const ADDRESS: RegisterAddress = RegisterAddress::Current;
}

impl ReadRegister for CurrentRegister {
    fn from_bits(bits: u16) -> Self {
        Self(signed_from_bits(bits))
    }
}

/// Raw contents of the power register
///
/// The driver does not scale power. Divide by
/// [`CalibrationProfile::power_divider_mw`](crate::calibration::CalibrationProfile::power_divider_mw)
/// to get mW.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerRegister(pub i16);

impl Register for PowerRegister {
    const ADDRESS: RegisterAddress = RegisterAddress::Power;
}

impl ReadRegister for PowerRegister {
    fn from_bits(bits: u16) -> Self {
        Self(signed_from_bits(bits))
    }
}

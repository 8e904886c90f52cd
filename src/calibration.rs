//! Calibration profiles for the INA219
//!
//! A [`CalibrationProfile`] ties a measurement range to the value of the calibration register, the
//! value of the configuration register and the divisors used to turn raw current and power counts
//! into physical units.
//!
//! The calibration register follows the formula from the datasheet:
//!
//! ```text
//! calibration = trunc(0.04096 / (current_lsb * r_shunt))
//! power_lsb   = 20 * current_lsb
//! ```
//!
//! with the LSB in Ampere and the shunt in Ohm. The current LSB is picked between
//! `max_expected_current / 32767` and `max_expected_current / 4096`, preferably a round number
//! close to the lower end.
//!
//! Both canonical profiles assume a 0.1Ω shunt:
//!
//! | Profile | Current LSB | Calibration | Overflow at |
//! |---|---|---|---|
//! | [`CalibrationProfile::RANGE_32V_1A`] | 40µA  | 10240 (`0x2800`) | 1.31A |
//! | [`CalibrationProfile::RANGE_32V_2A`] | 100µA | 4096 (`0x1000`)  | 3.2A  |
//!
//! Their constants are fixed and not recomputed. Use [`CalibrationProfile::from_current_lsb`] to
//! derive a profile for other shunts or ranges.

use crate::configuration::{Configuration, Reset};
use crate::register::{Register, RegisterAddress, WriteRegister};
use core::ops::RangeInclusive;

/// Scaling factor derived from datasheet and µ SI prefix: 0.04096 * (1/µ)^2
const SCALING_FACTOR: u64 = 40_960_000_000;
const RANGE: RangeInclusive<u64> = (SCALING_FACTOR / (u16::MAX as u64))..=(SCALING_FACTOR / 2);

/// Value of one count of the current register in µA
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MicroAmpere(pub u32);

/// Contents of the calibration register
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRegister(pub u16);

impl Register for CalibrationRegister {
    const ADDRESS: RegisterAddress = RegisterAddress::Calibration;
}

impl WriteRegister for CalibrationRegister {
    fn as_bits(&self) -> u16 {
        self.0
    }
}

/// A named measurement range of the INA219
///
/// Profiles are immutable. Selecting one on the driver writes the calibration register and then the
/// configuration register.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationProfile {
    name: &'static str,
    calibration: CalibrationRegister,
    configuration: Configuration,
    current_divider_ma: f32,
    power_divider_mw: f32,
}

impl CalibrationProfile {
    /// Measure up to 32V and 1A with a 0.1Ω shunt
    ///
    /// One count of the current register is 40µA, so 25 counts make up a mA. The power divider of
    /// 1 is a legacy value kept for compatibility, it is not the number of power counts per mW of
    /// this calibration (that would be 1.25).
    pub const RANGE_32V_1A: Self = Self::new(
        "32V/1A",
        10_240,
        Configuration::CONTINUOUS_32V_320MV,
        25.0,
        1.0,
    );

    /// Measure up to 32V and 2A with a 0.1Ω shunt
    ///
    /// One count of the current register is 100µA, so 10 counts make up a mA. The power divider of
    /// 2 is a legacy value kept for compatibility, it is not the number of power counts per mW of
    /// this calibration (that would be 0.5).
    pub const RANGE_32V_2A: Self = Self::new(
        "32V/2A",
        4_096,
        Configuration::CONTINUOUS_32V_320MV,
        10.0,
        2.0,
    );

    const fn new(
        name: &'static str,
        calibration: u16,
        configuration: Configuration,
        current_divider_ma: f32,
        power_divider_mw: f32,
    ) -> Self {
        Self {
            name,
            calibration: CalibrationRegister(calibration),
            configuration: Configuration {
                reset: Reset::Run,
                ..configuration
            },
            current_divider_ma,
            power_divider_mw,
        }
    }

    /// Create a profile from precomputed constants
    ///
    /// `current_divider_ma` is the number of current register counts per mA and
    /// `power_divider_mw` the number of power register counts per mW. A reset requested in the
    /// configuration is dropped, selecting a profile never resets the device.
    ///
    /// Returns `None` if the calibration is zero or a divider is not a positive finite number.
    #[must_use]
    pub fn from_constants(
        name: &'static str,
        calibration: u16,
        configuration: Configuration,
        current_divider_ma: f32,
        power_divider_mw: f32,
    ) -> Option<Self> {
        let valid = |divider: f32| divider.is_finite() && divider > 0.0;
        if calibration == 0 || !valid(current_divider_ma) || !valid(power_divider_mw) {
            return None;
        }

        Some(Self::new(
            name,
            calibration,
            configuration,
            current_divider_ma,
            power_divider_mw,
        ))
    }

    /// Derive a profile from the least significant bit of the current register in µA and the
    /// shunt resistor in µΩ
    ///
    /// Returns `None` if the resulting calibration does not fit into the register. A reset requested
    /// in the configuration is dropped.
    ///
    /// # Example
    /// ```rust
    /// use ina219_profiles::calibration::{CalibrationProfile, MicroAmpere};
    /// use ina219_profiles::configuration::Configuration;
    ///
    /// let profile = CalibrationProfile::from_current_lsb(
    ///     "custom",
    ///     MicroAmpere(40),
    ///     100_000,
    ///     Configuration::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(profile.calibration_value(), 10_240);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_current_lsb(
        name: &'static str,
        current_lsb: MicroAmpere,
        r_shunt_uohm: u32,
        configuration: Configuration,
    ) -> Option<Self> {
        let product = u64::from(current_lsb.0) * u64::from(r_shunt_uohm);
        if !RANGE.contains(&product) {
            return None;
        }

        // According to Figure 27 of the datasheet the lowest bit is always 0
        let calibration = u16::try_from(SCALING_FACTOR / product).ok()? & !1;

        let lsb_ua = current_lsb.0 as f32;
        Some(Self::new(
            name,
            calibration,
            configuration,
            1_000.0 / lsb_ua,
            1_000.0 / (20.0 * lsb_ua),
        ))
    }

    /// Name of the measurement range, such as `"32V/1A"`
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Value written to the calibration register
    #[must_use]
    pub const fn calibration_value(&self) -> u16 {
        self.calibration.0
    }

    pub(crate) const fn calibration_register(&self) -> CalibrationRegister {
        self.calibration
    }

    /// Configuration written together with the calibration
    #[must_use]
    pub const fn configuration(&self) -> Configuration {
        self.configuration
    }

    /// Counts of the current register per mA
    #[must_use]
    pub const fn current_divider_ma(&self) -> f32 {
        self.current_divider_ma
    }

    /// Counts of the power register per mW
    ///
    /// The canonical profiles carry legacy values here, see [`Self::RANGE_32V_1A`]. The driver only
    /// returns raw power counts, scaling them is up to the caller.
    #[must_use]
    pub const fn power_divider_mw(&self) -> f32 {
        self.power_divider_mw
    }

    /// Scale a raw current register value to mA
    #[must_use]
    pub fn current_ma(&self, raw: i16) -> f32 {
        f32::from(raw) / self.current_divider_ma
    }
}

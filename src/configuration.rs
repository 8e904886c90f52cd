//! Types used to set the configuration for the INA219
//!
//! The configuration register is split into disjoint bit fields. Every field is modelled as an
//! enum with a `MASK` covering exactly its bits, so a [`Configuration`] can never set bits
//! outside of the field they belong to.
//!
//! | Field               | Mask     |
//! |---------------------|----------|
//! | [`Reset`]           | `0x8000` |
//! | [`BusVoltageRange`] | `0x2000` |
//! | [`ShuntVoltageRange`] (PGA gain) | `0x1800` |
//! | bus [`Resolution`]  | `0x0780` |
//! | shunt [`Resolution`] | `0x0078` |
//! | [`OperatingMode`]   | `0x0007` |
//!
//! # Example
//! The `..` completion can be used to set specific values to change. For example:
//! ```rust
//! use ina219_profiles::configuration::{Configuration, Resolution};
//! let conf = Configuration {
//!     bus_resolution: Resolution::Avg128,
//!     shunt_resolution: Resolution::Avg128,
//!     .. Default::default()
//! };
//! ```

use crate::register::{ReadRegister, Register, RegisterAddress, WriteRegister};
use core::ops::{RangeInclusive, RangeToInclusive};

/// Perform a system reset or continue work as normal
///
/// If set to `Reset` all registers are set to their defaults. The flag is cleared after the reset
/// was performed. So this should always read as `Run`.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reset {
    /// Continue normal operation
    #[default]
    Run,
    /// Perform system reset
    Reset,
}

impl Reset {
    pub const MASK: u16 = 0x8000;

    const fn from_register(reg: u16) -> Self {
        if reg & Self::MASK == 0 {
            Self::Run
        } else {
            Self::Reset
        }
    }

    const fn bits(self) -> u16 {
        match self {
            Self::Run => 0,
            Self::Reset => Self::MASK,
        }
    }
}

/// Measurement range for the bus voltage
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusVoltageRange {
    /// Maximum bus voltage of 16V
    Fsr16v,
    /// Maximum bus voltage of 32V (still limited by 26V IC maximum)
    #[default]
    Fsr32v,
}

impl BusVoltageRange {
    pub const MASK: u16 = 0x2000;

    /// The voltage range in Volts
    #[must_use]
    pub const fn range_v(self) -> RangeToInclusive<u16> {
        match self {
            Self::Fsr16v => ..=16,
            Self::Fsr32v => ..=32,
        }
    }

    const fn from_register(reg: u16) -> Self {
        if reg & Self::MASK == 0 {
            Self::Fsr16v
        } else {
            Self::Fsr32v
        }
    }

    const fn bits(self) -> u16 {
        match self {
            Self::Fsr16v => 0x0000,
            Self::Fsr32v => 0x2000,
        }
    }
}

/// Shunt voltage measurement range
///
/// This sets the gain of the [PGA](https://en.wikipedia.org/wiki/Programmable-gain_amplifier) and
/// thus the maximum shunt voltage that can be measured.
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShuntVoltageRange {
    /// Range of ±40mV, gain of 1
    Fsr40mv,
    /// Range of ±80mV, gain of 1/2
    Fsr80mv,
    /// Range of ±160mV, gain of 1/4
    Fsr160mv,
    /// Range of ±320mV, gain of 1/8
    #[default]
    Fsr320mv,
}

impl ShuntVoltageRange {
    pub const MASK: u16 = 0x1800;

    /// Maximum range in mV for the shunt voltage measurement
    #[must_use]
    pub const fn range_mv(self) -> RangeInclusive<i16> {
        match self {
            Self::Fsr40mv => -40..=40,
            Self::Fsr80mv => -80..=80,
            Self::Fsr160mv => -160..=160,
            Self::Fsr320mv => -320..=320,
        }
    }

    const fn from_register(reg: u16) -> Self {
        match reg & Self::MASK {
            0x0000 => Self::Fsr40mv,
            0x0800 => Self::Fsr80mv,
            0x1000 => Self::Fsr160mv,
            _ => Self::Fsr320mv,
        }
    }

    const fn bits(self) -> u16 {
        match self {
            Self::Fsr40mv => 0x0000,
            Self::Fsr80mv => 0x0800,
            Self::Fsr160mv => 0x1000,
            Self::Fsr320mv => 0x1800,
        }
    }
}

/// Resolution / Averaging mode for shunt or bus voltage
///
/// This sets resolution which is used when sampling the voltages.
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// Single 9 bit sample
    Res9Bit,
    /// Single 10 bit sample
    Res10Bit,
    /// Single 11 bit sample
    Res11Bit,
    /// Single 12 bit sample
    #[default]
    Res12Bit,
    /// 2 averaged 12 bit samples
    Avg2,
    /// 4 averaged 12 bit samples
    Avg4,
    /// 8 averaged 12 bit samples
    Avg8,
    /// 16 averaged 12 bit samples
    Avg16,
    /// 32 averaged 12 bit samples
    Avg32,
    /// 64 averaged 12 bit samples
    Avg64,
    /// 128 averaged 12 bit samples
    Avg128,
}

impl Resolution {
    /// Bits of the bus ADC setting (BADC1..BADC4)
    pub const BUS_MASK: u16 = 0x0780;
    /// Bits of the shunt ADC setting (SADC1..SADC4)
    pub const SHUNT_MASK: u16 = 0x0078;

    const BUS_SHIFT: u8 = 7;
    const SHUNT_SHIFT: u8 = 3;

    const fn from_nibble(nibble: u16) -> Self {
        match nibble & 0b1111 {
            0b0000 | 0b0100 => Self::Res9Bit,
            0b0001 | 0b0101 => Self::Res10Bit,
            0b0010 | 0b0110 => Self::Res11Bit,
            0b1001 => Self::Avg2,
            0b1010 => Self::Avg4,
            0b1011 => Self::Avg8,
            0b1100 => Self::Avg16,
            0b1101 => Self::Avg32,
            0b1110 => Self::Avg64,
            0b1111 => Self::Avg128,
            // 0b0011, 0b0111 and 0b1000 all select a single 12 bit sample
            _ => Self::Res12Bit,
        }
    }

    const fn averaging_nibble(self) -> u16 {
        match self {
            Self::Res9Bit => 0b0000,
            Self::Res10Bit => 0b0001,
            Self::Res11Bit => 0b0010,
            Self::Res12Bit => 0b0011,
            Self::Avg2 => 0b1001,
            Self::Avg4 => 0b1010,
            Self::Avg8 => 0b1011,
            Self::Avg16 => 0b1100,
            Self::Avg32 => 0b1101,
            Self::Avg64 => 0b1110,
            Self::Avg128 => 0b1111,
        }
    }

    const fn from_bus_register(reg: u16) -> Self {
        Self::from_nibble((reg & Self::BUS_MASK) >> Self::BUS_SHIFT)
    }

    /// Bits of this setting in the bus ADC field
    ///
    /// A single 12 bit sample is written as `0b1000` (`0x0400`) which is the encoding the
    /// calibration profiles have always used for the bus ADC.
    #[must_use]
    pub const fn bus_bits(self) -> u16 {
        let nibble = match self {
            Self::Res12Bit => 0b1000,
            other => other.averaging_nibble(),
        };
        nibble << Self::BUS_SHIFT
    }

    const fn from_shunt_register(reg: u16) -> Self {
        Self::from_nibble((reg & Self::SHUNT_MASK) >> Self::SHUNT_SHIFT)
    }

    /// Bits of this setting in the shunt ADC field
    #[must_use]
    pub const fn shunt_bits(self) -> u16 {
        self.averaging_nibble() << Self::SHUNT_SHIFT
    }

    /// Conversion time in µs when this resolution is active
    ///
    /// Values according to Table 5 in the datasheet.
    #[must_use]
    pub const fn conversion_time_us(self) -> u32 {
        match self {
            Self::Res9Bit => 84,
            Self::Res10Bit => 148,
            Self::Res11Bit => 276,
            Self::Res12Bit => 532,
            Self::Avg2 => 1_060,
            Self::Avg4 => 2_130,
            Self::Avg8 => 4_260,
            Self::Avg16 => 8_510,
            Self::Avg32 => 17_020,
            Self::Avg64 => 34_050,
            Self::Avg128 => 68_100,
        }
    }
}

/// Which signals are measured during a conversion
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasuredSignals {
    /// Only the shunt voltage is measured
    ShuntVoltage,
    /// Only the bus voltage is measured
    BusVoltage,
    /// Both voltages are measured
    #[default]
    ShuntAndBusVoltage,
}

impl MeasuredSignals {
    const fn bits(self) -> u16 {
        match self {
            Self::ShuntVoltage => 0b01,
            Self::BusVoltage => 0b10,
            Self::ShuntAndBusVoltage => 0b11,
        }
    }
}

/// Operation mode of the INA219
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Reduce power usage and disable current into the input pins
    ///
    /// Recovery takes 40µs.
    PowerDown,
    /// Stop the conversions
    AdcOff,
    /// Trigger a single conversion of the given signals
    Triggered(MeasuredSignals),
    /// Continuously measure the given signals
    Continuous(MeasuredSignals),
}

impl OperatingMode {
    pub const MASK: u16 = 0x0007;

    const fn from_register(reg: u16) -> Self {
        let signals = match reg & 0b11 {
            0b01 => MeasuredSignals::ShuntVoltage,
            0b10 => MeasuredSignals::BusVoltage,
            _ => MeasuredSignals::ShuntAndBusVoltage,
        };

        match reg & Self::MASK {
            0b000 => Self::PowerDown,
            0b100 => Self::AdcOff,
            0b001..=0b011 => Self::Triggered(signals),
            _ => Self::Continuous(signals),
        }
    }

    /// Return the bits representing this mode
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::PowerDown => 0b000,
            Self::AdcOff => 0b100,
            Self::Triggered(signals) => signals.bits(),
            Self::Continuous(signals) => signals.bits() | 0b100,
        }
    }

    const fn measured_signals(self) -> Option<MeasuredSignals> {
        match self {
            Self::PowerDown | Self::AdcOff => None,
            Self::Triggered(signals) | Self::Continuous(signals) => Some(signals),
        }
    }
}

impl Default for OperatingMode {
    fn default() -> Self {
        Self::Continuous(MeasuredSignals::ShuntAndBusVoltage)
    }
}

/// Configuration register
///
/// Configures the way the INA219 performs its measurements.
///
/// The default is the configuration written by both canonical calibration profiles: 32V bus
/// range, ±320mV shunt range, single 12 bit samples and continuous measurement of both voltages.
/// It encodes to `0x3C1F` and is equivalent to the power-on value `0x399F`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Indicate to perform a reset or continue to run normally
    pub reset: Reset,
    /// Maximum measurement range for the bus voltage
    pub bus_voltage_range: BusVoltageRange,
    /// Maximum measurement range for the shunt voltage
    pub shunt_voltage_range: ShuntVoltageRange,
    /// Resolution / Averaging mode for the bus voltage measurement
    pub bus_resolution: Resolution,
    /// Resolution / Averaging mode for the shunt voltage measurement
    pub shunt_resolution: Resolution,
    /// Which signals to measure and if continuous or triggered operation is set up
    pub operating_mode: OperatingMode,
}

impl Configuration {
    /// 32V bus range, ±320mV shunt range, single 12 bit samples, continuous shunt and bus
    /// measurements
    pub const CONTINUOUS_32V_320MV: Self = Self {
        reset: Reset::Run,
        bus_voltage_range: BusVoltageRange::Fsr32v,
        shunt_voltage_range: ShuntVoltageRange::Fsr320mv,
        bus_resolution: Resolution::Res12Bit,
        shunt_resolution: Resolution::Res12Bit,
        operating_mode: OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage),
    };

    /// Decode the bits of the configuration register
    ///
    /// Every bit pattern decodes, unused bits are ignored.
    #[must_use]
    pub const fn from_bits(reg: u16) -> Self {
        Self {
            reset: Reset::from_register(reg),
            bus_voltage_range: BusVoltageRange::from_register(reg),
            shunt_voltage_range: ShuntVoltageRange::from_register(reg),
            bus_resolution: Resolution::from_bus_register(reg),
            shunt_resolution: Resolution::from_shunt_register(reg),
            operating_mode: OperatingMode::from_register(reg),
        }
    }

    /// Turn this configuration into the bits written to the register
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        self.reset.bits()
            | self.bus_voltage_range.bits()
            | self.shunt_voltage_range.bits()
            | self.bus_resolution.bus_bits()
            | self.shunt_resolution.shunt_bits()
            | self.operating_mode.bits()
    }

    /// Time in µs a single conversion of the measured signals takes
    ///
    /// Returns `None` if the operating mode does not perform conversions.
    #[must_use]
    pub const fn conversion_time_us(self) -> Option<u32> {
        let bus = self.bus_resolution.conversion_time_us();
        let shunt = self.shunt_resolution.conversion_time_us();

        match self.operating_mode.measured_signals() {
            None => None,
            Some(MeasuredSignals::ShuntVoltage) => Some(shunt),
            Some(MeasuredSignals::BusVoltage) => Some(bus),
            Some(MeasuredSignals::ShuntAndBusVoltage) => Some(shunt + bus),
        }
    }
}

impl Register for Configuration {
    const ADDRESS: RegisterAddress = RegisterAddress::Configuration;
}

impl ReadRegister for Configuration {
    fn from_bits(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl WriteRegister for Configuration {
    fn as_bits(&self) -> u16 {
        (*self).as_bits()
    }
}

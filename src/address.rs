//! 7 bit I2C address of the INA219
//!
//! The address is strapped with the pins A0 and A1, see table 1 of the datasheet. Common breakout
//! boards only offer GND and VS which gives the four addresses available as constants on
//! [`Address`].

use core::fmt::Formatter;
use core::ops::RangeInclusive;

/// Signal an address pin is connected to
///
/// The discriminant is the two bit value the pin contributes to the address.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Strap {
    /// Connected to GND
    Gnd = 0b00,
    /// Connected to the supply voltage
    Vs = 0b01,
    /// Connected to SDA
    Sda = 0b10,
    /// Connected to SCL
    Scl = 0b11,
}

impl Strap {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Gnd,
            0b01 => Self::Vs,
            0b10 => Self::Sda,
            _ => Self::Scl,
        }
    }
}

/// I2C address of the INA219 on the bus
///
/// ```rust
/// use ina219_profiles::address::{Address, Strap};
///
/// assert_eq!(Address::default().as_byte(), 0x40);
/// assert_eq!(Address::from_straps(Strap::Vs, Strap::Vs), Address::A0_A1);
/// assert!(Address::from_byte(0x20).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    const VALID: RangeInclusive<u8> = 0x40..=0x4F;

    /// A0 and A1 connected to GND
    pub const DEFAULT: Self = Self(0x40);
    /// A0 connected to VS
    pub const A0: Self = Self(0x41);
    /// A1 connected to VS
    pub const A1: Self = Self(0x44);
    /// A0 and A1 connected to VS
    pub const A0_A1: Self = Self(0x45);

    /// Create the address selected by the signals on the pins A0 and A1
    #[must_use]
    pub const fn from_straps(a0: Strap, a1: Strap) -> Self {
        Self(*Self::VALID.start() | (a1 as u8) << 2 | a0 as u8)
    }

    /// Create an address from a byte
    ///
    /// # Errors
    /// Returns `Err` if the byte is not one of the sixteen addresses an INA219 can answer on.
    pub const fn from_byte(byte: u8) -> Result<Self, AddressOutOfRange> {
        if byte >= *Self::VALID.start() && byte <= *Self::VALID.end() {
            Ok(Self(byte))
        } else {
            Err(AddressOutOfRange(byte))
        }
    }

    /// Get the address as a byte
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Get the signals on A0 and A1 that select this address
    #[must_use]
    pub const fn straps(self) -> (Strap, Strap) {
        (Strap::from_bits(self.0), Strap::from_bits(self.0 >> 2))
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Address {
    type Error = AddressOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value)
    }
}

/// The given byte is not an address of an INA219
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressOutOfRange(pub u8);

impl core::fmt::Display for AddressOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Address {:#04x} is outside of {:#04x}..={:#04x}",
            self.0,
            Address::VALID.start(),
            Address::VALID.end(),
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AddressOutOfRange {}

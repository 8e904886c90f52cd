//! Conversion between integers and the 16 bit big endian wire format of the registers
//!
//! Values wider than 16 bits are masked to the register width, the same way the device truncates
//! them. Decoding is total over all 16 bit patterns.
//!
//! # Example
//! ```rust
//! use ina219_profiles::codec::{decode, encode, Signedness};
//!
//! assert_eq!(encode(0x1234), [0x12, 0x34]);
//! assert_eq!(decode([0xFF, 0xFF], Signedness::Signed), -1);
//! assert_eq!(decode([0xFF, 0xFF], Signedness::Unsigned), 65_535);
//! ```

/// Interpretation of the 16 bits of a register
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signedness {
    /// Plain binary in `0..=65535`
    Unsigned,
    /// Two's complement in `-32768..=32767`
    Signed,
}

/// Encode the lowest 16 bits of `value` as the two bytes sent to the device
///
/// Negative values are encoded as their two's complement.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn encode(value: i32) -> [u8; 2] {
    (value as u16).to_be_bytes()
}

/// Decode the two bytes read from the device
#[must_use]
#[allow(clippy::cast_lossless)] // `From` is not const
pub const fn decode(bytes: [u8; 2], signedness: Signedness) -> i32 {
    match signedness {
        Signedness::Unsigned => u16::from_be_bytes(bytes) as i32,
        Signedness::Signed => i16::from_be_bytes(bytes) as i32,
    }
}

/// Reinterpret the bits of a register as a two's complement value
#[must_use]
pub(crate) const fn signed_from_bits(bits: u16) -> i16 {
    i16::from_be_bytes(bits.to_be_bytes())
}

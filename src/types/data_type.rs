// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire data types for attribute writes.

use std::fmt;

use crate::error::ValueError;

/// ZCL attribute data type, as sent alongside a written value.
///
/// Only the types this library writes or range-checks are listed.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::types::DataType;
///
/// assert_eq!(DataType::Uint8.code(), 0x20);
/// assert_eq!(DataType::try_from(0x30).unwrap(), DataType::Enum8);
/// assert!(DataType::Uint8.check(255).is_ok());
/// assert!(DataType::Uint8.check(256).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum DataType {
    /// Boolean (`0x10`).
    Boolean,
    /// 8-bit bitmap (`0x18`).
    Bitmap8,
    /// 16-bit bitmap (`0x19`).
    Bitmap16,
    /// Unsigned 8-bit integer (`0x20`).
    Uint8,
    /// Unsigned 16-bit integer (`0x21`).
    Uint16,
    /// Unsigned 24-bit integer (`0x22`).
    Uint24,
    /// Unsigned 32-bit integer (`0x23`).
    Uint32,
    /// Signed 8-bit integer (`0x28`).
    Int8,
    /// Signed 16-bit integer (`0x29`).
    Int16,
    /// Signed 32-bit integer (`0x2b`).
    Int32,
    /// 8-bit enumeration (`0x30`).
    Enum8,
    /// 16-bit enumeration (`0x31`).
    Enum16,
    /// Single precision float (`0x39`).
    SinglePrecision,
    /// Character string (`0x42`).
    CharString,
}

impl DataType {
    /// Returns the ZCL type code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Boolean => 0x10,
            Self::Bitmap8 => 0x18,
            Self::Bitmap16 => 0x19,
            Self::Uint8 => 0x20,
            Self::Uint16 => 0x21,
            Self::Uint24 => 0x22,
            Self::Uint32 => 0x23,
            Self::Int8 => 0x28,
            Self::Int16 => 0x29,
            Self::Int32 => 0x2b,
            Self::Enum8 => 0x30,
            Self::Enum16 => 0x31,
            Self::SinglePrecision => 0x39,
            Self::CharString => 0x42,
        }
    }

    /// Returns the inclusive integer range for integral types.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            Self::Boolean => Some((0, 1)),
            Self::Bitmap8 | Self::Uint8 | Self::Enum8 => Some((0, 0xff)),
            Self::Bitmap16 | Self::Uint16 | Self::Enum16 => Some((0, 0xffff)),
            Self::Uint24 => Some((0, 0x00ff_ffff)),
            Self::Uint32 => Some((0, 0xffff_ffff)),
            Self::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::SinglePrecision | Self::CharString => None,
        }
    }

    /// Checks that an integer fits this type.
    ///
    /// Non-integral types accept any value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value does not fit.
    pub fn check(&self, value: i64) -> Result<i64, ValueError> {
        match self.integer_range() {
            Some((min, max)) if !(min..=max).contains(&value) => Err(ValueError::OutOfRange {
                min,
                max,
                actual: value,
            }),
            _ => Ok(value),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.code())
    }
}

impl From<DataType> for u8 {
    fn from(data_type: DataType) -> Self {
        data_type.code()
    }
}

impl TryFrom<u8> for DataType {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0x10 => Self::Boolean,
            0x18 => Self::Bitmap8,
            0x19 => Self::Bitmap16,
            0x20 => Self::Uint8,
            0x21 => Self::Uint16,
            0x22 => Self::Uint24,
            0x23 => Self::Uint32,
            0x28 => Self::Int8,
            0x29 => Self::Int16,
            0x2b => Self::Int32,
            0x30 => Self::Enum8,
            0x31 => Self::Enum16,
            0x39 => Self::SinglePrecision,
            0x42 => Self::CharString,
            other => return Err(ValueError::UnknownDataType(other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in [0x10, 0x18, 0x19, 0x20, 0x21, 0x22, 0x23, 0x28, 0x29, 0x2b, 0x30, 0x31, 0x39, 0x42] {
            let data_type = DataType::try_from(code).unwrap();
            assert_eq!(data_type.code(), code);
        }
    }

    #[test]
    fn unknown_code() {
        assert_eq!(
            DataType::try_from(0xff),
            Err(ValueError::UnknownDataType(0xff))
        );
    }

    #[test]
    fn signed_ranges() {
        assert!(DataType::Int8.check(-128).is_ok());
        assert!(DataType::Int8.check(-129).is_err());
        assert!(DataType::Int16.check(i64::from(i16::MAX)).is_ok());
    }

    #[test]
    fn float_accepts_anything() {
        assert!(DataType::SinglePrecision.check(i64::MAX).is_ok());
    }

    #[test]
    fn serde_uses_code() {
        assert_eq!(serde_json::to_string(&DataType::Uint8).unwrap(), "32");
        let parsed: DataType = serde_json::from_str("48").unwrap();
        assert_eq!(parsed, DataType::Enum8);
    }
}

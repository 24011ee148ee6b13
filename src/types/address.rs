// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint and device addressing types.

use std::fmt;

use crate::error::ValueError;

/// Application endpoint number on a device (1-240).
///
/// Endpoint 0 is the device object and 241-255 are reserved, so neither can
/// carry application clusters.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::types::EndpointId;
///
/// let ep = EndpointId::new(11).unwrap();
/// assert_eq!(ep.value(), 11);
///
/// assert!(EndpointId::new(0).is_err());
/// assert!(EndpointId::new(241).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct EndpointId(u8);

impl EndpointId {
    /// First application endpoint.
    pub const MIN: Self = Self(1);

    /// Last application endpoint.
    pub const MAX: Self = Self(240);

    /// Creates a new endpoint id.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is 0 or above 240.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value < Self::MIN.0 || value > Self::MAX.0 {
            return Err(ValueError::OutOfRange {
                min: i64::from(Self::MIN.0),
                max: i64::from(Self::MAX.0),
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates an endpoint id, clamping to the valid range.
    ///
    /// # Examples
    ///
    /// ```
    /// use zigbridge_lib::types::EndpointId;
    ///
    /// assert_eq!(EndpointId::clamped(0).value(), 1);
    /// assert_eq!(EndpointId::clamped(250).value(), 240);
    /// ```
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Returns the endpoint number.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for EndpointId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for EndpointId {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EndpointId> for u8 {
    fn from(id: EndpointId) -> Self {
        id.0
    }
}

/// 64-bit IEEE (EUI-64) device address.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::types::IeeeAddress;
///
/// let addr = IeeeAddress::new(0x0012_4b00_1cdd_a1b2);
/// assert_eq!(addr.to_string(), "0x00124b001cdda1b2");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct IeeeAddress(u64);

impl IeeeAddress {
    /// Creates an address from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw address.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for IeeeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Destination of a bind request.
///
/// Commissioning usually binds clusters to the coordinator's endpoint so
/// that attribute reports reach the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindTarget {
    /// A specific endpoint on a specific device.
    Endpoint {
        /// Address of the target device.
        ieee_address: IeeeAddress,
        /// Endpoint on the target device.
        endpoint: EndpointId,
    },
    /// A multicast group.
    Group(u16),
}

impl BindTarget {
    /// Creates an endpoint bind target.
    #[must_use]
    pub const fn endpoint(ieee_address: IeeeAddress, endpoint: EndpointId) -> Self {
        Self::Endpoint {
            ieee_address,
            endpoint,
        }
    }
}

impl Default for BindTarget {
    /// The coordinator at its conventional address and endpoint 1.
    fn default() -> Self {
        Self::endpoint(IeeeAddress::default(), EndpointId::MIN)
    }
}

impl fmt::Display for BindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoint {
                ieee_address,
                endpoint,
            } => write!(f, "{ieee_address}/{endpoint}"),
            Self::Group(group) => write!(f, "group {group}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_valid_values() {
        for v in 1..=240 {
            assert_eq!(EndpointId::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn endpoint_invalid_values() {
        assert!(EndpointId::new(0).is_err());
        assert!(EndpointId::new(242).is_err());
        assert!(EndpointId::new(255).is_err());
    }

    #[test]
    fn endpoint_ordering() {
        assert!(EndpointId::new(1).unwrap() < EndpointId::new(11).unwrap());
    }

    #[test]
    fn endpoint_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<EndpointId>("0").is_err());
        assert_eq!(
            serde_json::from_str::<EndpointId>("11").unwrap(),
            EndpointId::clamped(11)
        );
    }

    #[test]
    fn bind_target_display() {
        let target = BindTarget::endpoint(IeeeAddress::new(1), EndpointId::MIN);
        assert_eq!(target.to_string(), "0x0000000000000001/1");
        assert_eq!(BindTarget::Group(5).to_string(), "group 5");
    }
}

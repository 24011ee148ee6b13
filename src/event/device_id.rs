// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway-assigned device identifier.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Identifier of a device registered with a gateway.
///
/// Random UUID v4, independent of the device's network address, so a
/// device that rejoins with a new address keeps its identity. Serializes
/// as the plain hyphenated UUID.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::event::DeviceId;
///
/// let id: DeviceId = "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8".parse().unwrap();
/// assert_eq!(id.to_string(), "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8");
/// ```
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Allocates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

// Log lines only need enough of the UUID to tell devices apart.
impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        let short = &self.0.simple().encode_lower(&mut buf)[..8];
        write!(f, "DeviceId({short})")
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for DeviceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for DeviceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<DeviceId> for Uuid {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8";

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(DeviceId::new(), DeviceId::new());
    }

    #[test]
    fn parses_and_displays_hyphenated() {
        let id: DeviceId = SAMPLE.parse().unwrap();
        assert_eq!(id.to_string(), SAMPLE);
        assert_eq!(Uuid::from(id), Uuid::parse_str(SAMPLE).unwrap());
    }

    #[test]
    fn rejects_malformed_text() {
        assert!("0x1234".parse::<DeviceId>().is_err());
    }

    #[test]
    fn debug_shows_prefix_only() {
        let id: DeviceId = SAMPLE.parse().unwrap();
        assert_eq!(format!("{id:?}"), "DeviceId(a1a2a3a4)");
    }

    #[test]
    fn serializes_as_plain_uuid() {
        let id: DeviceId = SAMPLE.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        assert_eq!(serde_json::from_str::<DeviceId>(&json).unwrap(), id);
    }
}

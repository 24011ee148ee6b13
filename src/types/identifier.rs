// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute and cluster identifiers.
//!
//! Both can be addressed either by their numeric protocol id or by the
//! symbolic name the cluster dictionary assigns them. Names are kept as
//! `Cow<'static, str>` so that well-known identifiers can be `const`.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one attribute within a cluster.
///
/// Numeric ids are used for vendor-specific attributes that have no name in
/// the cluster dictionary (e.g. `0x8803`). In JSON, a numeric id is written
/// as a number, and a decimal string key (`"34819"`) is read back as a
/// numeric id.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::types::AttributeId;
///
/// let vendor = AttributeId::from(0x8803);
/// let named = AttributeId::named("batteryVoltage");
///
/// assert_eq!(vendor, AttributeId::from("34819".to_string()));
/// assert_eq!(named.to_string(), "batteryVoltage");
/// assert_eq!(vendor.to_string(), "0x8803");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeId {
    /// Numeric attribute id.
    Id(u16),
    /// Symbolic attribute name.
    Name(Cow<'static, str>),
}

impl AttributeId {
    /// Creates a named attribute id from a static string.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }

    /// Returns the numeric id, if this is one.
    #[must_use]
    pub const fn as_id(&self) -> Option<u16> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Name(_) => None,
        }
    }

    /// Returns the name, if this is one.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Name(name) => Some(name),
        }
    }
}

/// Identifies a cluster on an endpoint.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::types::ClusterId;
///
/// assert_eq!(ClusterId::GEN_BASIC.to_string(), "genBasic");
/// assert_eq!(ClusterId::from(0x0006).to_string(), "0x0006");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClusterId {
    /// Numeric cluster id.
    Id(u16),
    /// Symbolic cluster name.
    Name(Cow<'static, str>),
}

impl ClusterId {
    /// Basic cluster.
    pub const GEN_BASIC: Self = Self::named("genBasic");
    /// Power configuration cluster.
    pub const GEN_POWER_CFG: Self = Self::named("genPowerCfg");
    /// Device temperature configuration cluster.
    pub const GEN_DEVICE_TEMP_CFG: Self = Self::named("genDeviceTempCfg");
    /// On/off cluster.
    pub const GEN_ON_OFF: Self = Self::named("genOnOff");
    /// Level control cluster.
    pub const GEN_LEVEL_CTRL: Self = Self::named("genLevelCtrl");
    /// Binary input cluster.
    pub const GEN_BINARY_INPUT: Self = Self::named("genBinaryInput");
    /// Over-the-air upgrade cluster.
    pub const GEN_OTA: Self = Self::named("genOta");
    /// Door lock cluster.
    pub const CLOSURES_DOOR_LOCK: Self = Self::named("closuresDoorLock");
    /// Window covering cluster.
    pub const CLOSURES_WINDOW_COVERING: Self = Self::named("closuresWindowCovering");
    /// Thermostat cluster.
    pub const HVAC_THERMOSTAT: Self = Self::named("hvacThermostat");
    /// Fan control cluster.
    pub const HVAC_FAN_CTRL: Self = Self::named("hvacFanCtrl");
    /// Thermostat user interface configuration cluster.
    pub const HVAC_USER_INTERFACE_CFG: Self = Self::named("hvacUserInterfaceCfg");
    /// Color control cluster.
    pub const LIGHTING_COLOR_CTRL: Self = Self::named("lightingColorCtrl");
    /// Illuminance measurement cluster.
    pub const MS_ILLUMINANCE_MEASUREMENT: Self = Self::named("msIlluminanceMeasurement");
    /// Temperature measurement cluster.
    pub const MS_TEMPERATURE_MEASUREMENT: Self = Self::named("msTemperatureMeasurement");
    /// Pressure measurement cluster.
    pub const MS_PRESSURE_MEASUREMENT: Self = Self::named("msPressureMeasurement");
    /// Relative humidity measurement cluster.
    pub const MS_RELATIVE_HUMIDITY: Self = Self::named("msRelativeHumidity");
    /// Occupancy sensing cluster.
    pub const MS_OCCUPANCY_SENSING: Self = Self::named("msOccupancySensing");
    /// Soil moisture measurement cluster.
    pub const MS_SOIL_MOISTURE: Self = Self::named("msSoilMoisture");
    /// Carbon dioxide measurement cluster.
    pub const MS_CO2: Self = Self::named("msCO2");
    /// Simple metering cluster.
    pub const SE_METERING: Self = Self::named("seMetering");
    /// Electrical measurement cluster.
    pub const HA_ELECTRICAL_MEASUREMENT: Self = Self::named("haElectricalMeasurement");

    /// Creates a named cluster id from a static string.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

macro_rules! impl_identifier {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    Self::Id(id) => write!(f, "0x{id:04x}"),
                    Self::Name(name) => f.write_str(name),
                }
            }
        }

        impl From<u16> for $ty {
            fn from(id: u16) -> Self {
                Self::Id(id)
            }
        }

        // Decimal strings become numeric ids; anything else is a name.
        impl From<&'static str> for $ty {
            fn from(name: &'static str) -> Self {
                match name.parse::<u16>() {
                    Ok(id) => Self::Id(id),
                    Err(_) => Self::named(name),
                }
            }
        }

        impl From<String> for $ty {
            fn from(raw: String) -> Self {
                match raw.parse::<u16>() {
                    Ok(id) => Self::Id(id),
                    Err(_) => Self::Name(Cow::Owned(raw)),
                }
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    Self::Id(id) => serializer.serialize_u16(*id),
                    Self::Name(name) => serializer.serialize_str(name),
                }
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(match RawIdentifier::deserialize(deserializer)? {
                    RawIdentifier::Numeric(id) => Self::Id(id),
                    RawIdentifier::Text(raw) => Self::from(raw),
                })
            }
        }
    };
}

impl_identifier!(AttributeId);
impl_identifier!(ClusterId);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Numeric(u16),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_string_becomes_numeric_id() {
        assert_eq!(AttributeId::from("34819".to_string()), AttributeId::Id(0x8803));
        assert_eq!(
            AttributeId::from("onOff".to_string()),
            AttributeId::named("onOff")
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(AttributeId::Id(16387).to_string(), "0x4003");
        assert_eq!(ClusterId::GEN_ON_OFF.to_string(), "genOnOff");
    }

    #[test]
    fn serialize_numeric_as_number() {
        let json = serde_json::to_string(&AttributeId::Id(0x8803)).unwrap();
        assert_eq!(json, "34819");
        let json = serde_json::to_string(&AttributeId::named("onTime")).unwrap();
        assert_eq!(json, "\"onTime\"");
    }

    #[test]
    fn deserialize_number_and_string() {
        let id: AttributeId = serde_json::from_str("34819").unwrap();
        assert_eq!(id, AttributeId::Id(0x8803));
        let id: ClusterId = serde_json::from_str("\"genBasic\"").unwrap();
        assert_eq!(id, ClusterId::GEN_BASIC);
    }

    #[test]
    fn deserialize_as_map_key() {
        let map: std::collections::BTreeMap<AttributeId, u8> =
            serde_json::from_str(r#"{"34819": 1, "onOff": 0}"#).unwrap();
        assert_eq!(map.get(&AttributeId::Id(0x8803)), Some(&1));
        assert_eq!(map.get(&AttributeId::named("onOff")), Some(&0));
    }

    #[test]
    fn accessors() {
        assert_eq!(AttributeId::Id(5).as_id(), Some(5));
        assert_eq!(AttributeId::Id(5).as_name(), None);
        assert_eq!(AttributeId::named("x").as_name(), Some("x"));
    }
}

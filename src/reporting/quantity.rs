// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of reportable physical quantities.
//!
//! Each [`Quantity`] maps to a [`QuantityDescriptor`] holding the cluster,
//! attribute and default reporting thresholds used when a device is
//! commissioned. Quantities can be selected by their snake-case name, which
//! is how device profiles refer to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::payload::interval::{HOUR, MAX, MINUTE, MINUTES_5};
use crate::error::ValueError;
use crate::types::{AttributeId, ClusterId};

/// Default reporting setup of one quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityDescriptor {
    /// Cluster holding the attribute.
    pub cluster: ClusterId,
    /// Reported attribute.
    pub attribute: AttributeId,
    /// Default minimum report interval in seconds.
    pub min: u16,
    /// Default maximum report interval in seconds.
    pub max: u16,
    /// Default reportable change, `None` for discrete attributes.
    pub change: Option<i64>,
    /// Whether the attribute is read right after reporting is configured.
    ///
    /// Sleepy battery devices may not report for an hour, so their battery
    /// attributes are read once to get an initial value.
    pub read_after_configure: bool,
}

macro_rules! quantities {
    ($(
        $(#[$doc:meta])*
        $variant:ident => $name:literal, $cluster:ident, $attribute:literal,
            $min:expr, $max:expr, $change:expr, $read:literal;
    )+) => {
        /// A reportable physical quantity.
        ///
        /// # Examples
        ///
        /// ```
        /// use zigbridge_lib::reporting::Quantity;
        ///
        /// let quantity: Quantity = "battery_voltage".parse().unwrap();
        /// let descriptor = quantity.descriptor();
        ///
        /// assert_eq!(quantity, Quantity::BatteryVoltage);
        /// assert_eq!(descriptor.min, 3600);
        /// assert!(descriptor.read_after_configure);
        /// ```
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Quantity {
            $($(#[$doc])* $variant,)+
        }

        impl Quantity {
            /// Every quantity, in registry order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the snake-case name of the quantity.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Returns the default reporting setup of the quantity.
            #[must_use]
            pub const fn descriptor(self) -> QuantityDescriptor {
                match self {
                    $(Self::$variant => QuantityDescriptor {
                        cluster: ClusterId::$cluster,
                        attribute: AttributeId::named($attribute),
                        min: $min,
                        max: $max,
                        change: $change,
                        read_after_configure: $read,
                    },)+
                }
            }
        }
    };
}

quantities! {
    /// Window covering lift position.
    CurrentPositionLiftPercentage => "current_position_lift_percentage",
        CLOSURES_WINDOW_COVERING, "currentPositionLiftPercentage", 1, MAX, Some(1), false;
    /// Window covering tilt position.
    CurrentPositionTiltPercentage => "current_position_tilt_percentage",
        CLOSURES_WINDOW_COVERING, "currentPositionTiltPercentage", 1, MAX, Some(1), false;
    /// Remaining battery, in half percent.
    BatteryPercentageRemaining => "battery_percentage_remaining",
        GEN_POWER_CFG, "batteryPercentageRemaining", HOUR, MAX, Some(0), true;
    /// Battery voltage, in 100 mV.
    BatteryVoltage => "battery_voltage",
        GEN_POWER_CFG, "batteryVoltage", HOUR, MAX, Some(0), true;
    /// Battery alarm bitmap.
    BatteryAlarmState => "battery_alarm_state",
        GEN_POWER_CFG, "batteryAlarmState", HOUR, MAX, Some(0), true;
    /// On/off state.
    OnOff => "on_off", GEN_ON_OFF, "onOff", 0, HOUR, Some(0), false;
    /// On time.
    OnTime => "on_time", GEN_ON_OFF, "onTime", 0, HOUR, Some(40), false;
    /// Lock state.
    LockState => "lock_state", CLOSURES_DOOR_LOCK, "lockState", 0, HOUR, Some(0), false;
    /// Door state.
    DoorState => "door_state", CLOSURES_DOOR_LOCK, "doorState", 0, HOUR, Some(0), false;
    /// Light level.
    Brightness => "brightness", GEN_LEVEL_CTRL, "currentLevel", 1, HOUR, Some(1), false;
    /// Color temperature, in mireds.
    ColorTemperature => "color_temperature",
        LIGHTING_COLOR_CTRL, "colorTemperature", 0, HOUR, Some(1), false;
    /// Occupancy.
    Occupancy => "occupancy", MS_OCCUPANCY_SENSING, "occupancy", 0, HOUR, Some(0), false;
    /// Temperature, in 0.01 °C.
    Temperature => "temperature",
        MS_TEMPERATURE_MEASUREMENT, "measuredValue", 10, HOUR, Some(100), false;
    /// CO2 concentration.
    Co2 => "co2", MS_CO2, "measuredValue", 10, HOUR, Some(1), false;
    /// Internal device temperature.
    DeviceTemperature => "device_temperature",
        GEN_DEVICE_TEMP_CFG, "currentTemperature", MINUTES_5, HOUR, Some(1), false;
    /// Pressure.
    Pressure => "pressure",
        MS_PRESSURE_MEASUREMENT, "measuredValue", 10, HOUR, Some(5), false;
    /// Pressure with extended precision.
    PressureExtended => "pressure_extended",
        MS_PRESSURE_MEASUREMENT, "scaledValue", 10, HOUR, Some(5), false;
    /// Illuminance, on the logarithmic wire scale.
    Illuminance => "illuminance",
        MS_ILLUMINANCE_MEASUREMENT, "measuredValue", 10, HOUR, Some(5), false;
    /// Instantaneous power demand.
    InstantaneousDemand => "instantaneous_demand",
        SE_METERING, "instantaneousDemand", 5, HOUR, Some(1), false;
    /// Energy delivered.
    CurrentSummDelivered => "current_summ_delivered",
        SE_METERING, "currentSummDelivered", 5, HOUR, Some(257), false;
    /// Energy received.
    CurrentSummReceived => "current_summ_received",
        SE_METERING, "currentSummReceived", 5, HOUR, Some(257), false;
    /// Thermostat system mode.
    ThermostatSystemMode => "thermostat_system_mode",
        HVAC_THERMOSTAT, "systemMode", 10, HOUR, None, false;
    /// Relative humidity, in 0.01 %.
    Humidity => "humidity",
        MS_RELATIVE_HUMIDITY, "measuredValue", 10, HOUR, Some(100), false;
    /// Thermostat keypad lockout.
    ThermostatKeypadLockMode => "thermostat_keypad_lock_mode",
        HVAC_USER_INTERFACE_CFG, "keypadLockout", 10, HOUR, None, false;
    /// Thermostat local temperature.
    ThermostatTemperature => "thermostat_temperature",
        HVAC_THERMOSTAT, "localTemp", 0, HOUR, Some(10), false;
    /// Thermostat local temperature calibration.
    ThermostatTemperatureCalibration => "thermostat_temperature_calibration",
        HVAC_THERMOSTAT, "localTemperatureCalibration", 0, HOUR, Some(0), false;
    /// Occupied heating setpoint.
    ThermostatOccupiedHeatingSetpoint => "thermostat_occupied_heating_setpoint",
        HVAC_THERMOSTAT, "occupiedHeatingSetpoint", 0, HOUR, Some(10), false;
    /// Unoccupied heating setpoint.
    ThermostatUnoccupiedHeatingSetpoint => "thermostat_unoccupied_heating_setpoint",
        HVAC_THERMOSTAT, "unoccupiedHeatingSetpoint", 0, HOUR, Some(10), false;
    /// Occupied cooling setpoint.
    ThermostatOccupiedCoolingSetpoint => "thermostat_occupied_cooling_setpoint",
        HVAC_THERMOSTAT, "occupiedCoolingSetpoint", 0, HOUR, Some(10), false;
    /// Unoccupied cooling setpoint.
    ThermostatUnoccupiedCoolingSetpoint => "thermostat_unoccupied_cooling_setpoint",
        HVAC_THERMOSTAT, "unoccupiedCoolingSetpoint", 0, HOUR, Some(10), false;
    /// Heating demand.
    ThermostatPiHeatingDemand => "thermostat_pi_heating_demand",
        HVAC_THERMOSTAT, "pIHeatingDemand", 0, HOUR, Some(10), false;
    /// Cooling demand.
    ThermostatPiCoolingDemand => "thermostat_pi_cooling_demand",
        HVAC_THERMOSTAT, "pICoolingDemand", 0, HOUR, Some(10), false;
    /// Thermostat running state.
    ThermostatRunningState => "thermostat_running_state",
        HVAC_THERMOSTAT, "runningState", 0, HOUR, Some(0), false;
    /// Thermostat running mode.
    ThermostatRunningMode => "thermostat_running_mode",
        HVAC_THERMOSTAT, "runningMode", 10, HOUR, None, false;
    /// Thermostat occupancy.
    ThermostatOccupancy => "thermostat_occupancy",
        HVAC_THERMOSTAT, "occupancy", 0, HOUR, Some(0), false;
    /// Setpoint hold.
    ThermostatTemperatureSetpointHold => "thermostat_temperature_setpoint_hold",
        HVAC_THERMOSTAT, "tempSetpointHold", 0, HOUR, Some(0), false;
    /// Setpoint hold duration.
    ThermostatTemperatureSetpointHoldDuration => "thermostat_temperature_setpoint_hold_duration",
        HVAC_THERMOSTAT, "tempSetpointHoldDuration", 0, HOUR, Some(10), false;
    /// Air conditioner louver position.
    ThermostatAcLouverPosition => "thermostat_ac_louver_position",
        HVAC_THERMOSTAT, "acLouverPosition", 0, HOUR, None, false;
    /// Binary input present value.
    PresentValue => "present_value",
        GEN_BINARY_INPUT, "presentValue", 10, MINUTE, Some(1), false;
    /// Active power.
    ActivePower => "active_power",
        HA_ELECTRICAL_MEASUREMENT, "activePower", 5, HOUR, Some(1), false;
    /// Reactive power.
    ReactivePower => "reactive_power",
        HA_ELECTRICAL_MEASUREMENT, "reactivePower", 5, HOUR, Some(1), false;
    /// Apparent power.
    ApparentPower => "apparent_power",
        HA_ELECTRICAL_MEASUREMENT, "apparentPower", 5, HOUR, Some(1), false;
    /// RMS current.
    RmsCurrent => "rms_current",
        HA_ELECTRICAL_MEASUREMENT, "rmsCurrent", 5, HOUR, Some(1), false;
    /// RMS voltage.
    RmsVoltage => "rms_voltage",
        HA_ELECTRICAL_MEASUREMENT, "rmsVoltage", 5, HOUR, Some(1), false;
    /// Power factor.
    PowerFactor => "power_factor",
        HA_ELECTRICAL_MEASUREMENT, "powerFactor", 0, MAX, Some(1), false;
    /// Fan mode.
    FanMode => "fan_mode", HVAC_FAN_CTRL, "fanMode", 0, HOUR, Some(0), false;
    /// Soil moisture.
    SoilMoisture => "soil_moisture",
        MS_SOIL_MOISTURE, "measuredValue", 10, HOUR, Some(100), false;
    /// AC frequency.
    AcFrequency => "ac_frequency",
        HA_ELECTRICAL_MEASUREMENT, "acFrequency", 5, MINUTES_5, Some(10), false;
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quantity {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|quantity| quantity.name() == s)
            .ok_or_else(|| ValueError::UnknownQuantity(s.to_string()))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_every_quantity_once() {
        assert_eq!(Quantity::ALL.len(), 49);
        for (i, a) in Quantity::ALL.iter().enumerate() {
            for b in &Quantity::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn names_parse_back() {
        for quantity in Quantity::ALL {
            assert_eq!(quantity.name().parse::<Quantity>(), Ok(*quantity));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "flux_capacitance".parse::<Quantity>(),
            Err(ValueError::UnknownQuantity("flux_capacitance".to_string()))
        );
    }

    #[test]
    fn only_battery_quantities_read_back() {
        let read_back: Vec<_> = Quantity::ALL
            .iter()
            .filter(|q| q.descriptor().read_after_configure)
            .map(|q| q.name())
            .collect();
        assert_eq!(
            read_back,
            vec![
                "battery_percentage_remaining",
                "battery_voltage",
                "battery_alarm_state"
            ]
        );
    }

    #[test]
    fn selected_defaults() {
        let d = Quantity::OnTime.descriptor();
        assert_eq!((d.min, d.max, d.change), (0, 3600, Some(40)));

        let d = Quantity::CurrentSummDelivered.descriptor();
        assert_eq!(d.cluster, ClusterId::SE_METERING);
        assert_eq!((d.min, d.max, d.change), (5, 3600, Some(257)));

        let d = Quantity::PowerFactor.descriptor();
        assert_eq!((d.min, d.max), (0, 62000));

        let d = Quantity::AcFrequency.descriptor();
        assert_eq!((d.min, d.max, d.change), (5, 300, Some(10)));

        let d = Quantity::PresentValue.descriptor();
        assert_eq!(d.max, 60);

        let d = Quantity::DeviceTemperature.descriptor();
        assert_eq!(d.min, 300);
        assert_eq!(d.attribute, AttributeId::named("currentTemperature"));
    }

    #[test]
    fn discrete_quantities_have_no_change() {
        for q in [
            Quantity::ThermostatSystemMode,
            Quantity::ThermostatKeypadLockMode,
            Quantity::ThermostatRunningMode,
            Quantity::ThermostatAcLouverPosition,
        ] {
            assert_eq!(q.descriptor().change, None, "{q}");
        }
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Quantity::RmsVoltage).unwrap();
        assert_eq!(json, r#""rms_voltage""#);
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Quantity::RmsVoltage);
    }
}

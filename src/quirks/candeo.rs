// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Candeo switch modules, dimmers and sensors.
//!
//! Candeo modules accept an external wall switch whose type (momentary push
//! button or toggle) is stored in a vendor attribute of the basic cluster.

use super::common;
use crate::codec::Scale;
use crate::codec::enumeration::SWITCH_TYPE;
use crate::codec::scale::calibrated_lux;
use crate::converter::{EnumAttribute, InboundConverter, NumericAttribute, OutboundConverter};
use crate::profile::{CommissionStep, DeviceProfile, EndpointMap};
use crate::reporting::{Override, Quantity};
use crate::types::{AttributeId, ClusterId, DataType, EndpointId, TypedValue};

/// Candeo manufacturer code.
pub const MANUFACTURER_CODE: u16 = 0x1224;

/// Vendor attribute holding the external switch type.
pub const SWITCH_TYPE_ATTRIBUTE: u16 = 0x8803;

/// Wire type of the switch type attribute.
pub const SWITCH_TYPE_DATA_TYPE: DataType = DataType::Uint8;

/// `startUpOnOff` on `genOnOff`.
const START_UP_ON_OFF: u16 = 0x4003;

/// Reporting used for the motion sensor's illuminance.
pub const MOTION_SENSOR_ILLUMINANCE: Override = Override::new().with_min(1).with_max(65535).with_change(1);

const EP1: EndpointId = EndpointId::clamped(1);
const EP2: EndpointId = EndpointId::clamped(2);
const EP11: EndpointId = EndpointId::clamped(11);

/// The external switch type property, `external_switch_type`.
#[must_use]
pub const fn switch_type() -> EnumAttribute {
    EnumAttribute {
        cluster: ClusterId::GEN_BASIC,
        attribute: AttributeId::Id(SWITCH_TYPE_ATTRIBUTE),
        property: "external_switch_type",
        codec: &SWITCH_TYPE,
        data_type: SWITCH_TYPE_DATA_TYPE,
        manufacturer_code: Some(MANUFACTURER_CODE),
    }
}

/// Illuminance on Candeo's calibrated curve.
#[must_use]
pub const fn illuminance() -> NumericAttribute {
    NumericAttribute::new(ClusterId::MS_ILLUMINANCE_MEASUREMENT, "measuredValue", "illuminance")
        .with_scale(Scale::Function(calibrated_lux))
        .with_precision(0)
}

fn read_switch_type(endpoint: EndpointId) -> CommissionStep {
    CommissionStep::read(endpoint, ClusterId::GEN_BASIC, [SWITCH_TYPE_ATTRIBUTE])
        .with_manufacturer_code(MANUFACTURER_CODE)
}

/// Restores the previous relay state after a power cut.
fn power_on_previous(endpoint: EndpointId) -> CommissionStep {
    CommissionStep::write(
        endpoint,
        ClusterId::GEN_ON_OFF,
        START_UP_ON_OFF,
        TypedValue::new(0xffu8, DataType::Enum8),
    )
}

fn with_switch_type(profile: DeviceProfile) -> DeviceProfile {
    profile
        .with_inbound(InboundConverter::Enum(switch_type()))
        .with_inbound(InboundConverter::Ignore(ClusterId::GEN_OTA))
        .with_outbound(OutboundConverter::Enum(switch_type()))
}

fn electricity_meter(profile: DeviceProfile, endpoint: EndpointId) -> DeviceProfile {
    profile
        .with_inbound(InboundConverter::Numeric(
            NumericAttribute::new(ClusterId::HA_ELECTRICAL_MEASUREMENT, "activePower", "power"),
        ))
        .with_inbound(InboundConverter::Numeric(
            NumericAttribute::new(ClusterId::HA_ELECTRICAL_MEASUREMENT, "rmsCurrent", "current")
                .with_scale(Scale::Factor(1000.0)),
        ))
        .with_inbound(InboundConverter::Numeric(
            NumericAttribute::new(ClusterId::HA_ELECTRICAL_MEASUREMENT, "rmsVoltage", "voltage"),
        ))
        .with_inbound(InboundConverter::Numeric(
            NumericAttribute::new(ClusterId::SE_METERING, "currentSummDelivered", "energy")
                .with_scale(Scale::Factor(1000.0)),
        ))
        .with_steps([
            CommissionStep::bind(
                endpoint,
                [ClusterId::HA_ELECTRICAL_MEASUREMENT, ClusterId::SE_METERING],
            ),
            CommissionStep::ReadElectricalScaling {
                endpoint,
                read_frequency: false,
            },
            CommissionStep::ReadMeteringScaling { endpoint },
            CommissionStep::configure(endpoint, Quantity::ActivePower),
            CommissionStep::configure(endpoint, Quantity::RmsCurrent),
            CommissionStep::configure(endpoint, Quantity::RmsVoltage),
            CommissionStep::configure(endpoint, Quantity::CurrentSummDelivered),
        ])
}

/// C205 switch module.
///
/// Commissioning binds and reports on/off, makes the relay restore its
/// previous state after a power cut, and reads back the switch type.
#[must_use]
pub fn switch_module() -> DeviceProfile {
    with_switch_type(
        DeviceProfile::new("C205", "Candeo")
            .with_description("Zigbee switch module")
            .with_inbound(InboundConverter::OnOff),
    )
    .with_steps([
        CommissionStep::bind(EP1, [ClusterId::GEN_ON_OFF]),
        CommissionStep::configure(EP1, Quantity::OnOff),
        power_on_previous(EP1),
        CommissionStep::read(EP1, ClusterId::GEN_ON_OFF, ["startUpOnOff"]),
        read_switch_type(EP1),
    ])
}

/// C204 micro dimmer with metering.
///
/// After light and meter setup, the on level, transition time and start-up
/// level are written, each followed by a read of the written attribute.
#[must_use]
pub fn micro_dimmer() -> DeviceProfile {
    let profile = with_switch_type(
        DeviceProfile::new("C204", "Candeo")
            .with_description("Zigbee micro smart dimmer")
            .with_inbound(InboundConverter::OnOff)
            .with_inbound(InboundConverter::Numeric(common::brightness())),
    )
    .with_steps([
        CommissionStep::bind(EP1, [ClusterId::GEN_ON_OFF, ClusterId::GEN_LEVEL_CTRL]),
        CommissionStep::configure(EP1, Quantity::OnOff),
        CommissionStep::configure(EP1, Quantity::Brightness),
    ]);

    electricity_meter(profile, EP1).with_steps([
        power_on_previous(EP1),
        CommissionStep::read(EP1, ClusterId::GEN_ON_OFF, ["startUpOnOff"]),
        CommissionStep::write(
            EP1,
            ClusterId::GEN_LEVEL_CTRL,
            17u16,
            TypedValue::new(0xffu8, DataType::Uint8),
        ),
        CommissionStep::read(EP1, ClusterId::GEN_LEVEL_CTRL, ["onLevel"]),
        CommissionStep::write(
            EP1,
            ClusterId::GEN_LEVEL_CTRL,
            16u16,
            TypedValue::new(0x0au8, DataType::Uint16),
        ),
        CommissionStep::read(EP1, ClusterId::GEN_LEVEL_CTRL, ["onOffTransitionTime"]),
        CommissionStep::write(
            EP1,
            ClusterId::GEN_LEVEL_CTRL,
            16384u16,
            TypedValue::new(0xffu8, DataType::Uint8),
        ),
        CommissionStep::read(EP1, ClusterId::GEN_LEVEL_CTRL, ["startUpCurrentLevel"]),
        read_switch_type(EP1),
    ])
}

/// C-ZB-SM205-2G two gang switch module.
///
/// Relays sit on endpoints `l1` and `l2`; the switch type lives on the
/// configuration endpoint `e11`. Meter readings are device-wide and keep
/// their plain keys.
#[must_use]
pub fn two_gang_switch_module() -> DeviceProfile {
    let profile = with_switch_type(
        DeviceProfile::new("C-ZB-SM205-2G", "Candeo")
            .with_description("Smart 2 gang switch module")
            .with_endpoints(
                EndpointMap::new()
                    .with("l1", EP1)
                    .with("l2", EP2)
                    .with("e11", EP11),
            )
            .with_multi_endpoint_skip(["power", "current", "voltage", "energy"])
            .with_inbound(InboundConverter::OnOff),
    )
    .with_steps([
        CommissionStep::bind(EP1, [ClusterId::GEN_ON_OFF]),
        CommissionStep::configure(EP1, Quantity::OnOff),
        CommissionStep::bind(EP2, [ClusterId::GEN_ON_OFF]),
        CommissionStep::configure(EP2, Quantity::OnOff),
    ]);

    electricity_meter(profile, EP1).with_steps([
        power_on_previous(EP1),
        CommissionStep::read(EP1, ClusterId::GEN_ON_OFF, [START_UP_ON_OFF]),
        power_on_previous(EP2),
        CommissionStep::read(EP2, ClusterId::GEN_ON_OFF, [START_UP_ON_OFF]),
        read_switch_type(EP11),
    ])
}

/// C-ZB-SEMO motion sensor.
///
/// Illuminance is reported on every change of one unit, at most once a
/// second.
#[must_use]
pub fn motion_sensor() -> DeviceProfile {
    DeviceProfile::new("C-ZB-SEMO", "Candeo")
        .with_description("Motion sensor")
        .with_inbound(InboundConverter::Numeric(common::battery()))
        .with_inbound(InboundConverter::Numeric(illuminance()))
        .with_steps([
            CommissionStep::bind(
                EP1,
                [ClusterId::GEN_POWER_CFG, ClusterId::MS_ILLUMINANCE_MEASUREMENT],
            ),
            CommissionStep::configure(EP1, Quantity::BatteryPercentageRemaining),
            CommissionStep::configure_with(EP1, Quantity::Illuminance, MOTION_SENSOR_ILLUMINANCE),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_valid() {
        for profile in [
            switch_module(),
            micro_dimmer(),
            two_gang_switch_module(),
            motion_sensor(),
        ] {
            assert!(profile.validate().is_ok(), "{}", profile.model());
        }
    }

    #[test]
    fn switch_module_writes_power_on_behaviour_first() {
        let steps = switch_module();
        let steps = steps.commissioning();
        let write = steps
            .iter()
            .position(|s| matches!(s, CommissionStep::Write { .. }))
            .unwrap();
        assert_eq!(steps[write + 1].kind(), "read");
        assert_eq!(steps.last().unwrap(), &read_switch_type(EP1));
    }

    #[test]
    fn dimmer_write_then_read_pairs() {
        let profile = micro_dimmer();
        let writes: Vec<_> = profile
            .commissioning()
            .windows(2)
            .filter(|pair| matches!(pair[0], CommissionStep::Write { .. }))
            .map(|pair| pair[1].kind())
            .collect();
        assert_eq!(writes, vec!["read"; 4]);
    }

    #[test]
    fn two_gang_reads_switch_type_on_configuration_endpoint() {
        let profile = two_gang_switch_module();
        let last = profile.commissioning().last().unwrap();
        assert_eq!(last.endpoint(), EP11);
        assert_eq!(profile.endpoints().name_of(EP11), Some("e11"));
    }

    #[test]
    fn motion_sensor_illuminance_override() {
        let profile = motion_sensor();
        assert!(profile.commissioning().iter().any(|s| matches!(
            s,
            CommissionStep::ConfigureReporting {
                quantity: Quantity::Illuminance,
                overrides: Some(Override { min: Some(1), max: Some(65535), change: Some(1) }),
                ..
            }
        )));
    }
}

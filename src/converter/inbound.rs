// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converters from inbound attribute frames to normalized state.

use serde_json::Value;

use super::ConvertContext;
use super::attribute::{EnumAttribute, NumericAttribute};
use crate::message::{AttributeMessage, MessageKind};
use crate::state::PartialState;
use crate::types::{AttributeId, ClusterId};

const REPORT_AND_READ: &[MessageKind] = &[MessageKind::AttributeReport, MessageKind::ReadResponse];

static ON_OFF_CLUSTER: ClusterId = ClusterId::GEN_ON_OFF;
static ON_OFF: AttributeId = AttributeId::named("onOff");

/// Translates attribute frames of one cluster into state.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::converter::{ConvertContext, ConverterOptions, InboundConverter};
/// use zigbridge_lib::message::{AttributeMessage, MessageKind};
/// use zigbridge_lib::quirks::candeo;
/// use zigbridge_lib::types::{ClusterId, EndpointId};
///
/// let converter = InboundConverter::Enum(candeo::switch_type());
/// let options = ConverterOptions::new();
/// let ctx = ConvertContext::new("C205", &options);
///
/// let msg = AttributeMessage::new(ClusterId::GEN_BASIC, MessageKind::AttributeReport, EndpointId::MIN)
///     .with_attribute(0x8803, 5);
/// let state = converter.convert(&msg, &ctx).unwrap();
///
/// assert_eq!(state.get("external_switch_type").unwrap(), "unknown");
/// assert_eq!(state.get("external_switch_type_numeric").unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub enum InboundConverter {
    /// Enumerated attribute published as label plus raw value.
    Enum(EnumAttribute),
    /// Numeric attribute published after scaling.
    Numeric(NumericAttribute),
    /// `genOnOff` `onOff` published as `state`: `"ON"` or `"OFF"`.
    OnOff,
    /// Swallows frames of a cluster without producing state.
    Ignore(ClusterId),
}

impl InboundConverter {
    /// Returns the cluster this converter listens to.
    #[must_use]
    pub fn cluster(&self) -> &ClusterId {
        match self {
            Self::Enum(attr) => &attr.cluster,
            Self::Numeric(attr) => &attr.cluster,
            Self::OnOff => &ON_OFF_CLUSTER,
            Self::Ignore(cluster) => cluster,
        }
    }

    /// Returns the frame kinds this converter handles.
    #[must_use]
    pub const fn kinds(&self) -> &'static [MessageKind] {
        REPORT_AND_READ
    }

    /// Returns `true` if the converter handles frames like `msg`.
    #[must_use]
    pub fn matches(&self, msg: &AttributeMessage) -> bool {
        self.cluster() == &msg.cluster && self.kinds().contains(&msg.kind)
    }

    /// Converts a frame.
    ///
    /// Returns `None` when the frame does not carry the converter's
    /// attribute, or for ignored clusters. Unknown enum values are not an
    /// error: they decode to the `"unknown"` label with the raw value kept.
    #[must_use]
    pub fn convert(&self, msg: &AttributeMessage, ctx: &ConvertContext<'_>) -> Option<PartialState> {
        if !self.matches(msg) {
            return None;
        }
        match self {
            Self::Enum(attr) => {
                let raw = msg.get(&attr.attribute)?;
                let label = raw
                    .as_i64()
                    .map_or(crate::codec::enumeration::UNKNOWN_LABEL, |numeric| {
                        attr.codec.decode(numeric).label()
                    });
                tracing::trace!(model = ctx.model, property = attr.property, raw = %raw, label, "Decoded enum attribute");
                let numeric = serde_json::to_value(raw).unwrap_or(Value::Null);
                Some(
                    PartialState::new()
                        .with(attr.property, label)
                        .with(attr.numeric_property(), numeric),
                )
            }
            Self::Numeric(attr) => {
                let raw = msg.get(&attr.attribute)?;
                let options = ctx.options;
                let Some(value) = attr.decode(
                    raw,
                    options.calibration(attr.property),
                    options.precision(attr.property),
                ) else {
                    tracing::debug!(model = ctx.model, property = attr.property, raw = %raw, "Ignoring non-numeric value");
                    return None;
                };
                Some(PartialState::new().with(attr.property, value))
            }
            Self::OnOff => {
                let on = msg.get(&ON_OFF)?.as_bool()?;
                Some(PartialState::new().with("state", if on { "ON" } else { "OFF" }))
            }
            Self::Ignore(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Scale;
    use crate::codec::scale::calibrated_lux;
    use crate::converter::ConverterOptions;
    use crate::quirks::candeo;
    use crate::types::EndpointId;

    fn report(cluster: ClusterId) -> AttributeMessage {
        AttributeMessage::new(cluster, MessageKind::AttributeReport, EndpointId::MIN)
    }

    fn convert(converter: &InboundConverter, msg: &AttributeMessage) -> Option<PartialState> {
        let options = ConverterOptions::new();
        converter.convert(msg, &ConvertContext::new("test", &options))
    }

    #[test]
    fn switch_type_known_values() {
        let converter = InboundConverter::Enum(candeo::switch_type());
        for (raw, label) in [(0, "momentary"), (1, "toggle")] {
            let state = convert(&converter, &report(ClusterId::GEN_BASIC).with_attribute(0x8803, raw)).unwrap();
            assert_eq!(
                state,
                PartialState::new()
                    .with("external_switch_type", label)
                    .with("external_switch_type_numeric", raw)
            );
        }
    }

    #[test]
    fn switch_type_absent_key_yields_nothing() {
        let converter = InboundConverter::Enum(candeo::switch_type());
        let msg = report(ClusterId::GEN_BASIC).with_attribute("modelId", "C205");
        assert!(convert(&converter, &msg).is_none());
    }

    #[test]
    fn switch_type_read_response_with_named_key() {
        let converter = InboundConverter::Enum(candeo::switch_type());
        let msg = AttributeMessage::from_json(
            r#"{"cluster":"genBasic","type":"readResponse","endpoint":11,"data":{"34819":1}}"#,
        )
        .unwrap();
        let state = convert(&converter, &msg).unwrap();
        assert_eq!(state.get("external_switch_type").unwrap(), "toggle");
    }

    #[test]
    fn other_cluster_is_not_matched() {
        let converter = InboundConverter::Enum(candeo::switch_type());
        let msg = report(ClusterId::GEN_ON_OFF).with_attribute(0x8803, 1);
        assert!(convert(&converter, &msg).is_none());
    }

    #[test]
    fn on_off_state() {
        let msg = report(ClusterId::GEN_ON_OFF).with_attribute("onOff", 1);
        let state = convert(&InboundConverter::OnOff, &msg).unwrap();
        assert_eq!(state.get("state").unwrap(), "ON");

        let msg = report(ClusterId::GEN_ON_OFF).with_attribute("onOff", false);
        let state = convert(&InboundConverter::OnOff, &msg).unwrap();
        assert_eq!(state.get("state").unwrap(), "OFF");
    }

    #[test]
    fn ignore_swallows_frames() {
        let converter = InboundConverter::Ignore(ClusterId::GEN_OTA);
        assert!(converter.matches(&report(ClusterId::GEN_OTA)));
        assert!(convert(&converter, &report(ClusterId::GEN_OTA).with_attribute("imageType", 1)).is_none());
    }

    #[test]
    fn illuminance_uses_scale_and_options() {
        let converter = InboundConverter::Numeric(
            NumericAttribute::new(ClusterId::MS_ILLUMINANCE_MEASUREMENT, "measuredValue", "illuminance")
                .with_scale(Scale::Function(calibrated_lux))
                .with_precision(0),
        );
        let msg = report(ClusterId::MS_ILLUMINANCE_MEASUREMENT).with_attribute("measuredValue", 1);
        let state = convert(&converter, &msg).unwrap();
        assert_eq!(state.get("illuminance").unwrap(), 1);

        let options = ConverterOptions::new().with("illuminance_calibration", 5);
        let state = converter
            .convert(&msg, &ConvertContext::new("test", &options))
            .unwrap();
        assert_eq!(state.get("illuminance").unwrap(), 6);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound attribute frames.
//!
//! The transport hands over every attribute report and read response as an
//! [`AttributeMessage`]. Frames arrive either already decoded or as JSON,
//! for which [`AttributeMessage::from_json`] is provided.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{AttributeId, AttributeMap, AttributeValue, ClusterId, EndpointId};

/// Kind of inbound attribute frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    /// Unsolicited report sent by the device.
    AttributeReport,
    /// Answer to a read request.
    ReadResponse,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeReport => f.write_str("attributeReport"),
            Self::ReadResponse => f.write_str("readResponse"),
        }
    }
}

/// An attribute frame received from a device endpoint.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::message::{AttributeMessage, MessageKind};
/// use zigbridge_lib::types::{AttributeId, ClusterId};
///
/// let json = r#"{"cluster":"genBasic","type":"attributeReport","endpoint":1,"data":{"34819":1}}"#;
/// let msg = AttributeMessage::from_json(json).unwrap();
///
/// assert_eq!(msg.cluster, ClusterId::GEN_BASIC);
/// assert_eq!(msg.kind, MessageKind::AttributeReport);
/// assert_eq!(msg.get(&AttributeId::from(0x8803)).and_then(|v| v.as_i64()), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeMessage {
    /// Cluster the frame belongs to.
    pub cluster: ClusterId,
    /// Frame kind.
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Source endpoint.
    pub endpoint: EndpointId,
    /// Attribute values carried by the frame.
    #[serde(default)]
    pub data: AttributeMap,
}

impl AttributeMessage {
    /// Creates an empty frame.
    #[must_use]
    pub fn new(cluster: impl Into<ClusterId>, kind: MessageKind, endpoint: EndpointId) -> Self {
        Self {
            cluster: cluster.into(),
            kind,
            endpoint,
            data: AttributeMap::new(),
        }
    }

    /// Adds an attribute value to the frame.
    #[must_use]
    pub fn with_attribute(
        mut self,
        attribute: impl Into<AttributeId>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.data.insert(attribute.into(), value.into());
        self
    }

    /// Parses a frame from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the input is not a valid frame.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(ParseError::Json)
    }

    /// Returns the value of an attribute, if the frame carries it.
    #[must_use]
    pub fn get(&self, attribute: &AttributeId) -> Option<&AttributeValue> {
        self.data.get(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_read_response() {
        let json = r#"{
            "cluster": "msIlluminanceMeasurement",
            "type": "readResponse",
            "endpoint": 1,
            "data": {"measuredValue": 30001}
        }"#;
        let msg = AttributeMessage::from_json(json).unwrap();
        assert_eq!(msg.kind, MessageKind::ReadResponse);
        assert_eq!(
            msg.get(&AttributeId::named("measuredValue")),
            Some(&AttributeValue::Int(30001))
        );
    }

    #[test]
    fn missing_data_is_empty() {
        let msg = AttributeMessage::from_json(
            r#"{"cluster":"genOnOff","type":"attributeReport","endpoint":2}"#,
        )
        .unwrap();
        assert!(msg.data.is_empty());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = AttributeMessage::from_json(
            r#"{"cluster":"genOnOff","type":"commandOn","endpoint":1,"data":{}}"#,
        );
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn endpoint_out_of_range_is_rejected() {
        let result = AttributeMessage::from_json(
            r#"{"cluster":"genOnOff","type":"attributeReport","endpoint":0,"data":{}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn builder_matches_parsed() {
        let built = AttributeMessage::new(ClusterId::GEN_ON_OFF, MessageKind::AttributeReport, EndpointId::MIN)
            .with_attribute("onOff", 1);
        let parsed = AttributeMessage::from_json(
            r#"{"cluster":"genOnOff","type":"attributeReport","endpoint":1,"data":{"onOff":1}}"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
    }
}

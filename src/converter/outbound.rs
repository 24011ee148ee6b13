// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converters from property commands to attribute writes and reads.

use serde_json::Value;

use super::ConvertContext;
use super::attribute::{EnumAttribute, NumericAttribute};
use crate::endpoint::Endpoint;
use crate::error::{Error, ValueError};
use crate::state::PartialState;
use crate::types::{AttributeWrites, ClusterId};

/// Translates a property `set` or `get` into endpoint requests.
#[derive(Debug, Clone)]
pub enum OutboundConverter {
    /// Enumerated attribute set by label or integer string.
    Enum(EnumAttribute),
    /// Numeric attribute set by number.
    Numeric(NumericAttribute),
}

impl OutboundConverter {
    /// Returns the property keys this converter handles.
    #[must_use]
    pub fn keys(&self) -> &[&'static str] {
        match self {
            Self::Enum(attr) => std::slice::from_ref(&attr.property),
            Self::Numeric(attr) => std::slice::from_ref(&attr.property),
        }
    }

    /// Returns `true` if the converter handles `key`.
    #[must_use]
    pub fn handles(&self, key: &str) -> bool {
        self.keys().contains(&key)
    }

    /// Returns the cluster the converter writes to.
    #[must_use]
    pub fn cluster(&self) -> &ClusterId {
        match self {
            Self::Enum(attr) => &attr.cluster,
            Self::Numeric(attr) => &attr.cluster,
        }
    }

    /// Writes a property value to `entity`.
    ///
    /// Returns the state the device is expected to be in once the write
    /// lands, keyed by the plain property name. Enum properties echo the
    /// input as given, so setting `"1"` reports `"1"`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value has the wrong JSON type or cannot
    /// be encoded; nothing is written then. Returns `Error::Transport` if the
    /// write fails.
    pub async fn convert_set<E: Endpoint>(
        &self,
        entity: &E,
        key: &str,
        value: &Value,
        ctx: &ConvertContext<'_>,
    ) -> Result<PartialState, Error> {
        match self {
            Self::Enum(attr) => {
                let input = value.as_str().ok_or_else(|| invalid_type(key, "string", value))?;
                let typed = attr.encode(input)?;
                tracing::debug!(
                    model = ctx.model,
                    endpoint = %entity.id(),
                    property = attr.property,
                    value = %typed.value,
                    "Writing enum attribute"
                );

                let mut writes = AttributeWrites::new();
                writes.insert(attr.attribute.clone(), typed);
                entity
                    .write(&attr.cluster, &writes, attr.request_options())
                    .await?;

                Ok(PartialState::new().with(attr.property, input))
            }
            Self::Numeric(attr) => {
                let number = value.as_f64().ok_or_else(|| invalid_type(key, "number", value))?;
                let typed = attr.encode(number)?;
                tracing::debug!(
                    model = ctx.model,
                    endpoint = %entity.id(),
                    property = attr.property,
                    value = %typed.value,
                    "Writing numeric attribute"
                );

                let mut writes = AttributeWrites::new();
                writes.insert(attr.attribute.clone(), typed);
                entity
                    .write(&attr.cluster, &writes, attr.request_options())
                    .await?;

                Ok(PartialState::new().with(attr.property, value.clone()))
            }
        }
    }

    /// Requests a fresh value of the property from `entity`.
    ///
    /// The answer arrives later as a read response frame, so no state is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the read fails.
    pub async fn convert_get<E: Endpoint>(
        &self,
        entity: &E,
        key: &str,
        ctx: &ConvertContext<'_>,
    ) -> Result<(), Error> {
        let (cluster, attribute, options) = match self {
            Self::Enum(attr) => (&attr.cluster, &attr.attribute, attr.request_options()),
            Self::Numeric(attr) => (&attr.cluster, &attr.attribute, attr.request_options()),
        };
        tracing::debug!(model = ctx.model, endpoint = %entity.id(), key, "Reading attribute");
        entity
            .read(cluster, std::slice::from_ref(attribute), options)
            .await?;
        Ok(())
    }
}

fn invalid_type(key: &str, expected: &'static str, actual: &Value) -> ValueError {
    ValueError::InvalidType {
        property: key.to_string(),
        expected,
        actual: actual.to_string(),
    }
}

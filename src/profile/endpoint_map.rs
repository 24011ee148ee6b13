// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint naming for multi-endpoint devices.

use serde::{Deserialize, Serialize};

use crate::error::DeviceError;
use crate::types::EndpointId;

/// Names given to the endpoints of a device.
///
/// Multi-gang devices expose the same property once per endpoint. The name
/// is used as key suffix, so `state` on endpoint `l1` becomes `state_l1`.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::profile::EndpointMap;
/// use zigbridge_lib::types::EndpointId;
///
/// let map = EndpointMap::new()
///     .with("l1", EndpointId::clamped(1))
///     .with("l2", EndpointId::clamped(2))
///     .with("e11", EndpointId::clamped(11));
///
/// assert_eq!(map.id_of("e11"), Some(EndpointId::clamped(11)));
/// assert_eq!(map.name_of(EndpointId::clamped(2)), Some("l2"));
/// assert!(map.is_multi());
///
/// // Keys are split at the last underscore.
/// assert_eq!(
///     map.split_key("external_switch_type_e11"),
///     ("external_switch_type", Some(EndpointId::clamped(11)))
/// );
/// assert_eq!(map.split_key("brightness"), ("brightness", None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointMap(Vec<(String, EndpointId)>);

impl EndpointMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Names an endpoint.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, id: EndpointId) -> Self {
        self.0.push((name.into(), id));
        self
    }

    /// Returns the endpoint with the given name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<EndpointId> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, id)| *id)
    }

    /// Returns the name of an endpoint.
    #[must_use]
    pub fn name_of(&self, id: EndpointId) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, i)| *i == id)
            .map(|(name, _)| name.as_str())
    }

    /// Returns `true` if more than one endpoint is named.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.0.len() > 1
    }

    /// Returns `true` if no endpoint is named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, id)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EndpointId)> {
        self.0.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Splits a property key into its base and the endpoint its suffix
    /// names.
    ///
    /// Returns the key unchanged with `None` when it carries no known
    /// endpoint suffix.
    #[must_use]
    pub fn split_key<'k>(&self, key: &'k str) -> (&'k str, Option<EndpointId>) {
        if let Some((base, suffix)) = key.rsplit_once('_')
            && !base.is_empty()
            && let Some(id) = self.id_of(suffix)
        {
            return (base, Some(id));
        }
        (key, None)
    }

    /// Checks that names and endpoints are unique.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::InvalidProfile` naming the duplicate.
    pub fn validate(&self) -> Result<(), DeviceError> {
        for (i, (name, id)) in self.0.iter().enumerate() {
            for (other_name, other_id) in &self.0[i + 1..] {
                if name == other_name {
                    return Err(DeviceError::InvalidProfile(format!(
                        "endpoint name '{name}' used twice"
                    )));
                }
                if id == other_id {
                    return Err(DeviceError::InvalidProfile(format!(
                        "endpoint {id} named twice"
                    )));
                }
            }
            if name.is_empty() || name.contains('_') {
                return Err(DeviceError::InvalidProfile(format!(
                    "endpoint name '{name}' must be non-empty and free of underscores"
                )));
            }
        }
        Ok(())
    }
}

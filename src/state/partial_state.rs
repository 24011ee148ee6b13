// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial state produced by converters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A set of normalized property values.
///
/// Inbound converters return one for each frame they understand, and
/// outbound set operations return the state the device will be in once the
/// write lands. Keys are property names such as `external_switch_type` or
/// `state_l1`; values are plain JSON.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::state::PartialState;
///
/// let state = PartialState::new()
///     .with("external_switch_type", "toggle")
///     .with("external_switch_type_numeric", 1);
///
/// assert_eq!(state.len(), 2);
/// assert_eq!(state.get("external_switch_type").and_then(|v| v.as_str()), Some("toggle"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialState(Map<String, Value>);

impl PartialState {
    /// Creates an empty partial state.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Adds a property.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a property, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns a property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merges another partial state into this one. Its values win.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Appends `_<suffix>` to every key, except those listed in `skip`.
    #[must_use]
    pub fn with_key_suffix(self, suffix: &str, skip: &[String]) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|(key, value)| {
                    if skip.iter().any(|s| *s == key) {
                        (key, value)
                    } else {
                        (format!("{key}_{suffix}"), value)
                    }
                })
                .collect(),
        )
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for PartialState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl IntoIterator for PartialState {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_skips_listed_keys() {
        let state = PartialState::new()
            .with("state", "ON")
            .with("power", 12.5)
            .with_key_suffix("l1", &["power".to_string()]);

        assert!(state.get("state_l1").is_some());
        assert!(state.get("power").is_some());
        assert!(state.get("state").is_none());
    }

    #[test]
    fn merge_overwrites() {
        let mut a = PartialState::new().with("x", 1).with("y", 1);
        a.merge(PartialState::new().with("y", 2));
        assert_eq!(a.get("y"), Some(&Value::from(2)));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn serializes_as_plain_object() {
        let state = PartialState::new().with("occupancy", true);
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({"occupancy": true})
        );
    }
}

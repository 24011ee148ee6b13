// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::PartialState;

/// Last known normalized state of a device.
///
/// Properties start out unknown and are filled in as converters produce
/// partial states. `last_seen` is updated on every applied frame, whether or
/// not a property actually changed.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::state::{DeviceState, PartialState};
///
/// let mut state = DeviceState::new();
/// let update = PartialState::new().with("state", "ON");
///
/// assert!(state.apply(&update));
/// assert!(!state.apply(&update));
/// assert_eq!(state.get_str("state"), Some("ON"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceState {
    properties: Map<String, Value>,
    last_seen: Option<DateTime<Utc>>,
}

impl DeviceState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Returns a string property.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Returns a numeric property.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }

    /// Returns all known properties.
    #[must_use]
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Returns when the device last sent a frame that produced state.
    #[must_use]
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_seen
    }

    /// Marks the device as seen now.
    pub fn touch(&mut self) {
        self.last_seen = Some(Utc::now());
    }

    /// Applies a partial state and returns whether any property changed.
    pub fn apply(&mut self, update: &PartialState) -> bool {
        let mut changed = false;
        for (key, value) in update.iter() {
            if self.properties.get(key) != Some(value) {
                self.properties.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        self.touch();
        changed
    }

    /// Returns only the properties of `update` that differ from this state.
    #[must_use]
    pub fn diff(&self, update: &PartialState) -> PartialState {
        update
            .iter()
            .filter(|(key, value)| self.properties.get(key.as_str()) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<Map<_, _>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = DeviceState::new();
        assert!(state.properties().is_empty());
        assert!(state.last_seen().is_none());
    }

    #[test]
    fn apply_tracks_changes() {
        let mut state = DeviceState::new();
        assert!(state.apply(&PartialState::new().with("illuminance", 215.0)));
        assert_eq!(state.get_f64("illuminance"), Some(215.0));
        assert!(state.last_seen().is_some());

        assert!(!state.apply(&PartialState::new().with("illuminance", 215.0)));
        assert!(state.apply(&PartialState::new().with("illuminance", 216.0)));
    }

    #[test]
    fn empty_update_only_touches() {
        let mut state = DeviceState::new();
        assert!(!state.apply(&PartialState::new()));
        assert!(state.last_seen().is_some());
    }

    #[test]
    fn diff_returns_changed_keys() {
        let mut state = DeviceState::new();
        state.apply(&PartialState::new().with("a", 1).with("b", 2));

        let diff = state.diff(&PartialState::new().with("a", 1).with("b", 3).with("c", 4));
        assert_eq!(diff, PartialState::new().with("b", 3).with("c", 4));
    }
}

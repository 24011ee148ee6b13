// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway configuration.

use serde::{Deserialize, Serialize};

use crate::reporting::ReportingConfigurator;
use crate::types::BindTarget;

/// Default event bus capacity.
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Configuration of a [`Gateway`](super::Gateway).
///
/// Every field has a default, so a partial document deserializes.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::manager::GatewayConfig;
/// use zigbridge_lib::types::BindTarget;
///
/// let config = GatewayConfig::default()
///     .with_event_capacity(1024)
///     .with_strict_intervals(true);
/// assert!(config.strict_intervals);
///
/// let parsed: GatewayConfig = serde_json::from_str(r#"{"coordinator": {"group": 5}}"#).unwrap();
/// assert_eq!(parsed.coordinator, BindTarget::Group(5));
/// assert_eq!(parsed.event_capacity, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Number of events buffered for slow subscribers.
    pub event_capacity: usize,
    /// Reject inverted reporting intervals before sending them.
    pub strict_intervals: bool,
    /// Destination of commissioning bind steps.
    pub coordinator: BindTarget,
}

impl GatewayConfig {
    /// Sets the event bus capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Enables or disables strict reporting interval checks.
    #[must_use]
    pub fn with_strict_intervals(mut self, strict: bool) -> Self {
        self.strict_intervals = strict;
        self
    }

    /// Sets the bind destination.
    #[must_use]
    pub fn with_coordinator(mut self, coordinator: BindTarget) -> Self {
        self.coordinator = coordinator;
        self
    }

    /// Returns the reporting configurator these settings describe.
    #[must_use]
    pub fn configurator(&self) -> ReportingConfigurator {
        ReportingConfigurator::new().with_strict_intervals(self.strict_intervals)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            strict_intervals: false,
            coordinator: BindTarget::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EndpointId, IeeeAddress};

    #[test]
    fn defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.event_capacity, 256);
        assert!(!config.strict_intervals);
        assert_eq!(config.coordinator, BindTarget::default());
        assert!(!config.configurator().strict_intervals());
    }

    #[test]
    fn strict_flag_reaches_configurator() {
        let config = GatewayConfig::default().with_strict_intervals(true);
        assert!(config.configurator().strict_intervals());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: GatewayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn serde_round_trip() {
        let config = GatewayConfig::default()
            .with_strict_intervals(true)
            .with_coordinator(BindTarget::endpoint(
                IeeeAddress::new(0x00124b0012345678),
                EndpointId::clamped(2),
            ));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"strictIntervals\":true"));
        let back: GatewayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use serde::Serialize;

use super::DeviceId;
use crate::state::{DeviceState, PartialState};

/// Events emitted by the gateway.
///
/// Every event names the device it concerns.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::event::{DeviceEvent, DeviceId};
///
/// let device_id = DeviceId::new();
///
/// let failed = DeviceEvent::commissioning_failed(device_id, "timed out after 10000 ms");
/// assert!(failed.is_commissioning());
/// assert_eq!(failed.device_id(), device_id);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum DeviceEvent {
    /// A device was added to the gateway.
    #[serde(rename_all = "camelCase")]
    DeviceAdded {
        /// The ID of the added device.
        device_id: DeviceId,
        /// Model of the device's profile.
        model: String,
    },

    /// A device was removed from the gateway.
    #[serde(rename_all = "camelCase")]
    DeviceRemoved {
        /// The ID of the removed device.
        device_id: DeviceId,
    },

    /// Every commissioning step of a device succeeded.
    #[serde(rename_all = "camelCase")]
    Commissioned {
        /// The ID of the device.
        device_id: DeviceId,
    },

    /// Commissioning of a device stopped at a failing step.
    ///
    /// Steps already executed are not undone.
    #[serde(rename_all = "camelCase")]
    CommissioningFailed {
        /// The ID of the device.
        device_id: DeviceId,
        /// Description of the failure.
        error: String,
    },

    /// An inbound frame or a property write changed the device state.
    #[serde(rename_all = "camelCase")]
    StateChanged {
        /// The ID of the device.
        device_id: DeviceId,
        /// The properties produced, with endpoint suffixes applied.
        update: PartialState,
        /// The complete new state of the device.
        new_state: DeviceState,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::DeviceAdded { device_id, .. }
            | Self::DeviceRemoved { device_id }
            | Self::Commissioned { device_id }
            | Self::CommissioningFailed { device_id, .. }
            | Self::StateChanged { device_id, .. } => *device_id,
        }
    }

    /// Returns `true` if this is a device lifecycle event (added/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceRemoved { .. })
    }

    /// Returns `true` if this reports a commissioning outcome.
    #[must_use]
    pub fn is_commissioning(&self) -> bool {
        matches!(
            self,
            Self::Commissioned { .. } | Self::CommissioningFailed { .. }
        )
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(device_id: DeviceId, model: impl Into<String>) -> Self {
        Self::DeviceAdded {
            device_id,
            model: model.into(),
        }
    }

    /// Creates a device removed event.
    #[must_use]
    pub fn device_removed(device_id: DeviceId) -> Self {
        Self::DeviceRemoved { device_id }
    }

    /// Creates a commissioned event.
    #[must_use]
    pub fn commissioned(device_id: DeviceId) -> Self {
        Self::Commissioned { device_id }
    }

    /// Creates a commissioning failure event.
    #[must_use]
    pub fn commissioning_failed(device_id: DeviceId, error: impl Into<String>) -> Self {
        Self::CommissioningFailed {
            device_id,
            error: error.into(),
        }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(device_id: DeviceId, update: PartialState, new_state: DeviceState) -> Self {
        Self::StateChanged {
            device_id,
            update,
            new_state,
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway coordinating several devices.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinSet;

use super::gateway_config::GatewayConfig;
use super::report::CommissioningReport;
use crate::device::Device;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::message::AttributeMessage;
use crate::profile::DeviceProfile;
use crate::state::{DeviceState, PartialState};

/// Registry of devices with commissioning, frame dispatch and events.
///
/// Cloning a gateway yields a handle to the same registry and event bus.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use zigbridge_lib::endpoint::RecordingEndpoint;
/// use zigbridge_lib::manager::Gateway;
/// use zigbridge_lib::quirks::candeo;
/// use zigbridge_lib::types::EndpointId;
///
/// # async fn example() -> zigbridge_lib::Result<()> {
/// let gateway = Gateway::new();
/// let mut events = gateway.subscribe();
///
/// let id = gateway
///     .add(Arc::new(candeo::switch_module()), [RecordingEndpoint::new(EndpointId::MIN)])
///     .await?;
///
/// let report = gateway.commission_all().await;
/// assert!(report.all_succeeded());
/// assert_eq!(events.recv().await.unwrap().device_id(), id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gateway<E: Endpoint> {
    devices: Arc<RwLock<HashMap<DeviceId, Arc<Device<E>>>>>,
    event_bus: EventBus,
    config: GatewayConfig,
}

impl<E: Endpoint + 'static> Gateway<E> {
    /// Creates a gateway with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    /// Creates a gateway with the given settings.
    #[must_use]
    pub fn with_config(config: GatewayConfig) -> Self {
        Self {
            devices: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::with_capacity(config.event_capacity),
            config,
        }
    }

    /// Returns the settings.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to the events of every device.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Device Management
    // =========================================================================

    /// Creates a device from a profile and registers it.
    ///
    /// Bind steps of the device target the configured coordinator.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if the profile is invalid or no endpoint is
    /// given.
    pub async fn add(
        &self,
        profile: Arc<DeviceProfile>,
        endpoints: impl IntoIterator<Item = E>,
    ) -> Result<DeviceId, Error> {
        let device = Device::new(profile, endpoints)?.with_bind_target(self.config.coordinator);
        Ok(self.add_device(device).await)
    }

    /// Registers an already built device.
    pub async fn add_device(&self, device: Device<E>) -> DeviceId {
        let device_id = device.id();
        let model = device.model().to_string();

        self.devices.write().await.insert(device_id, Arc::new(device));
        tracing::debug!(device = %device_id, model = %model, "Device added");

        self.event_bus.publish(DeviceEvent::device_added(device_id, model));
        device_id
    }

    /// Removes a device.
    ///
    /// Returns `true` if the device was registered.
    pub async fn remove_device(&self, device_id: DeviceId) -> bool {
        let removed = self.devices.write().await.remove(&device_id).is_some();

        if removed {
            tracing::debug!(device = %device_id, "Device removed");
            self.event_bus.publish(DeviceEvent::device_removed(device_id));
        }
        removed
    }

    /// Returns a registered device.
    pub async fn device(&self, device_id: DeviceId) -> Option<Arc<Device<E>>> {
        self.devices.read().await.get(&device_id).cloned()
    }

    /// Returns the identifiers of all registered devices.
    pub async fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.read().await.keys().copied().collect()
    }

    /// Returns the number of registered devices.
    pub async fn device_count(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Returns a snapshot of a device's state.
    pub async fn state(&self, device_id: DeviceId) -> Option<DeviceState> {
        self.device(device_id).await.map(|device| device.state())
    }

    // =========================================================================
    // Commissioning
    // =========================================================================

    /// Commissions one device.
    ///
    /// State read during commissioning is published as a state change when
    /// it differs from what the device held before.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown device, otherwise the
    /// error of the failing step.
    pub async fn commission(&self, device_id: DeviceId) -> Result<(), Error> {
        let device = self.require(device_id).await?;
        let before = device.state();
        let result = device.commission(&self.config.configurator()).await;
        self.publish_outcome(&device, &before, result)
    }

    /// Commissions every registered device concurrently.
    ///
    /// A failing device never stops the others; each outcome is reported
    /// and published as an event.
    pub async fn commission_all(&self) -> CommissioningReport {
        let devices: Vec<_> = self.devices.read().await.values().cloned().collect();
        let configurator = self.config.configurator();

        let mut pending: Vec<DeviceId> = devices.iter().map(|device| device.id()).collect();
        let mut tasks = JoinSet::new();
        for device in devices {
            tasks.spawn(async move {
                let before = device.state();
                let result = device.commission(&configurator).await;
                (device, before, result)
            });
        }

        let mut report = CommissioningReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((device, before, result)) => {
                    let device_id = device.id();
                    pending.retain(|id| *id != device_id);
                    let outcome = self.publish_outcome(&device, &before, result);
                    report.record(device_id, outcome);
                }
                Err(e) => tracing::warn!(error = %e, "Commissioning task aborted"),
            }
        }

        for device_id in pending {
            self.event_bus
                .publish(DeviceEvent::commissioning_failed(device_id, "commissioning task aborted"));
            report.record_aborted(device_id);
        }
        report
    }

    fn publish_outcome(
        &self,
        device: &Device<E>,
        before: &DeviceState,
        result: Result<PartialState, Error>,
    ) -> Result<(), Error> {
        let device_id = device.id();
        match result {
            Ok(produced) => {
                let changed = before.diff(&produced);
                if !changed.is_empty() {
                    self.event_bus.publish(DeviceEvent::state_changed(
                        device_id,
                        changed,
                        device.state(),
                    ));
                }
                self.event_bus.publish(DeviceEvent::commissioned(device_id));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(device = %device_id, error = %e, "Commissioning failed");
                self.event_bus
                    .publish(DeviceEvent::commissioning_failed(device_id, e.to_string()));
                Err(e)
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Hands an inbound frame to a device.
    ///
    /// Publishes a state change event when the frame produced state.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown device.
    pub async fn dispatch(
        &self,
        device_id: DeviceId,
        msg: &AttributeMessage,
    ) -> Result<Option<PartialState>, Error> {
        let device = self.require(device_id).await?;
        let update = device.handle_message(msg);
        if let Some(update) = &update {
            self.event_bus.publish(DeviceEvent::state_changed(
                device_id,
                update.clone(),
                device.state(),
            ));
        }
        Ok(update)
    }

    /// Parses a JSON frame and hands it to a device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for a malformed frame, otherwise as
    /// [`dispatch`](Self::dispatch).
    pub async fn dispatch_json(
        &self,
        device_id: DeviceId,
        json: &str,
    ) -> Result<Option<PartialState>, Error> {
        let msg = AttributeMessage::from_json(json)?;
        self.dispatch(device_id, &msg).await
    }

    /// Writes a property of a device.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown device, otherwise as
    /// [`Device::set`].
    pub async fn set(&self, device_id: DeviceId, key: &str, value: &Value) -> Result<PartialState, Error> {
        let device = self.require(device_id).await?;
        let update = device.set(key, value).await?;
        self.event_bus.publish(DeviceEvent::state_changed(
            device_id,
            update.clone(),
            device.state(),
        ));
        Ok(update)
    }

    /// Requests a fresh value of a device property.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown device, otherwise as
    /// [`Device::get`].
    pub async fn get(&self, device_id: DeviceId, key: &str) -> Result<(), Error> {
        self.require(device_id).await?.get(key).await
    }

    async fn require(&self, device_id: DeviceId) -> Result<Arc<Device<E>>, Error> {
        self.device(device_id).await.ok_or(Error::DeviceNotFound)
    }
}

impl<E: Endpoint + 'static> Default for Gateway<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Endpoint> Clone for Gateway<E> {
    fn clone(&self) -> Self {
        Self {
            devices: Arc::clone(&self.devices),
            event_bus: self.event_bus.clone(),
            config: self.config.clone(),
        }
    }
}

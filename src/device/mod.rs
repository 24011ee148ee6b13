// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A device profile bound to concrete endpoints.
//!
//! A [`Device`] routes everything that concerns one physical device:
//!
//! - commissioning steps go to the endpoint they name
//! - inbound frames go through every matching inbound converter and land in
//!   the device state
//! - property `set`/`get` go to the outbound converter handling the key, on
//!   the endpoint its suffix names
//!
//! # Multi-endpoint devices
//!
//! When the profile names more than one endpoint, state keys produced by a
//! frame from a named endpoint carry the endpoint name as suffix
//! (`state_l1`), and a suffixed key given to [`Device::set`] is routed to
//! that endpoint. Properties on the profile's skip list keep their plain key.
//!
//! ```
//! use std::sync::Arc;
//!
//! use zigbridge_lib::device::Device;
//! use zigbridge_lib::endpoint::RecordingEndpoint;
//! use zigbridge_lib::message::{AttributeMessage, MessageKind};
//! use zigbridge_lib::quirks::candeo;
//! use zigbridge_lib::types::{ClusterId, EndpointId};
//!
//! let ep1 = RecordingEndpoint::new(EndpointId::clamped(1));
//! let ep2 = ep1.sibling(EndpointId::clamped(2));
//! let ep11 = ep1.sibling(EndpointId::clamped(11));
//!
//! let device = Device::new(Arc::new(candeo::two_gang_switch_module()), [ep1, ep2, ep11]).unwrap();
//!
//! let msg = AttributeMessage::new(ClusterId::GEN_ON_OFF, MessageKind::AttributeReport, EndpointId::clamped(2))
//!     .with_attribute("onOff", 1);
//! let update = device.handle_message(&msg).unwrap();
//!
//! assert_eq!(update.get("state_l2").unwrap(), "ON");
//! assert_eq!(device.state().get_str("state_l2"), Some("ON"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::converter::{ConvertContext, ConverterOptions};
use crate::endpoint::Endpoint;
use crate::error::{DeviceError, Error};
use crate::event::DeviceId;
use crate::message::{AttributeMessage, MessageKind};
use crate::profile::{CommissionStep, DeviceProfile};
use crate::reporting::ReportingConfigurator;
use crate::state::{DeviceState, PartialState};
use crate::types::{AttributeMap, BindTarget, ClusterId, EndpointId};

/// A device handled according to its profile.
///
/// Requests to one device are issued one after another, and only one
/// commissioning run drives the endpoints at a time. The state lock is
/// never held across a request.
#[derive(Debug)]
pub struct Device<E: Endpoint> {
    id: DeviceId,
    profile: Arc<DeviceProfile>,
    endpoints: BTreeMap<EndpointId, E>,
    bind_target: BindTarget,
    options: ConverterOptions,
    state: RwLock<DeviceState>,
    commissioning: Mutex<()>,
}

impl<E: Endpoint> Device<E> {
    /// Binds a profile to the device's endpoints.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::InvalidProfile` if the profile does not
    /// validate or no endpoint is given.
    pub fn new(
        profile: Arc<DeviceProfile>,
        endpoints: impl IntoIterator<Item = E>,
    ) -> Result<Self, DeviceError> {
        profile.validate()?;
        let endpoints: BTreeMap<_, _> = endpoints.into_iter().map(|e| (e.id(), e)).collect();
        if endpoints.is_empty() {
            return Err(DeviceError::InvalidProfile(format!(
                "device of model '{}' has no endpoints",
                profile.model()
            )));
        }

        Ok(Self {
            id: DeviceId::new(),
            profile,
            endpoints,
            bind_target: BindTarget::default(),
            options: ConverterOptions::new(),
            state: RwLock::new(DeviceState::new()),
            commissioning: Mutex::new(()),
        })
    }

    /// Uses a known identifier instead of a fresh one.
    #[must_use]
    pub fn with_id(mut self, id: DeviceId) -> Self {
        self.id = id;
        self
    }

    /// Sets the destination of bind steps.
    #[must_use]
    pub fn with_bind_target(mut self, target: BindTarget) -> Self {
        self.bind_target = target;
        self
    }

    /// Sets the user options passed to converters.
    #[must_use]
    pub fn with_options(mut self, options: ConverterOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Returns the device profile.
    #[must_use]
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Returns the model name of the profile.
    #[must_use]
    pub fn model(&self) -> &str {
        self.profile.model()
    }

    /// Returns the bind step destination.
    #[must_use]
    pub fn bind_target(&self) -> &BindTarget {
        &self.bind_target
    }

    /// Returns the converter options.
    #[must_use]
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Returns a snapshot of the device state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Returns the endpoint with the given number.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnknownEndpoint` if the device has no such
    /// endpoint.
    pub fn endpoint(&self, id: EndpointId) -> Result<&E, DeviceError> {
        self.endpoints.get(&id).ok_or(DeviceError::UnknownEndpoint(id))
    }

    /// Iterates over the endpoints in ascending order.
    pub fn endpoints(&self) -> impl Iterator<Item = &E> {
        self.endpoints.values()
    }

    /// Runs the profile's commissioning steps in declaration order.
    ///
    /// Answers to read steps and to battery read-backs go through the
    /// inbound converters; the properties they produced are returned. A
    /// second call waits until a running one has finished.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step; later steps are not
    /// run and earlier ones are not undone. A step naming an endpoint the
    /// device lacks fails with `DeviceError::UnknownEndpoint`.
    pub async fn commission(
        &self,
        configurator: &ReportingConfigurator,
    ) -> Result<PartialState, Error> {
        let _session = self.commissioning.lock().await;
        let steps = self.profile.commissioning();
        tracing::info!(device = %self.id, model = self.model(), steps = steps.len(), "Commissioning device");

        let mut produced = PartialState::new();
        for (index, step) in steps.iter().enumerate() {
            let endpoint = self.endpoint(step.endpoint())?;
            tracing::debug!(
                device = %self.id,
                step = index,
                kind = step.kind(),
                endpoint = %endpoint.id(),
                "Running commissioning step"
            );
            match self.run_step(configurator, endpoint, step).await {
                Ok(Some(update)) => produced.merge(update),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(device = %self.id, step = index, kind = step.kind(), error = %e, "Commissioning step failed");
                    return Err(e);
                }
            }
        }

        tracing::info!(device = %self.id, model = self.model(), properties = produced.len(), "Device commissioned");
        Ok(produced)
    }

    async fn run_step(
        &self,
        configurator: &ReportingConfigurator,
        endpoint: &E,
        step: &CommissionStep,
    ) -> Result<Option<PartialState>, Error> {
        match step {
            CommissionStep::Bind { clusters, .. } => {
                configurator
                    .bind(endpoint, &self.bind_target, clusters)
                    .await?;
            }
            CommissionStep::ConfigureReporting {
                quantity,
                overrides,
                ..
            } => {
                let values = configurator
                    .configure(endpoint, *quantity, overrides.as_ref())
                    .await?;
                return Ok(self.absorb_read(&quantity.descriptor().cluster, endpoint.id(), values));
            }
            CommissionStep::Write {
                cluster,
                attributes,
                options,
                ..
            } => {
                endpoint.write(cluster, attributes, *options).await?;
            }
            CommissionStep::Read {
                cluster,
                attributes,
                options,
                ..
            } => {
                let values = endpoint.read(cluster, attributes, *options).await?;
                return Ok(self.absorb_read(cluster, endpoint.id(), values));
            }
            CommissionStep::ReadElectricalScaling { read_frequency, .. } => {
                configurator
                    .read_electrical_measurement_multiplier_divisors(endpoint, *read_frequency)
                    .await?;
            }
            CommissionStep::ReadMeteringScaling { .. } => {
                configurator.read_metering_multiplier_divisor(endpoint).await?;
            }
        }
        Ok(None)
    }

    /// Feeds a read answer through the inbound converters as a read
    /// response frame.
    fn absorb_read(
        &self,
        cluster: &ClusterId,
        endpoint: EndpointId,
        values: AttributeMap,
    ) -> Option<PartialState> {
        if values.is_empty() {
            return None;
        }
        let mut msg = AttributeMessage::new(cluster.clone(), MessageKind::ReadResponse, endpoint);
        msg.data = values;
        self.handle_message(&msg)
    }

    /// Converts an inbound frame and applies the result to the state.
    ///
    /// Every converter matching the frame runs; their outputs are merged in
    /// profile order. Returns `None` when no converter produced a property.
    pub fn handle_message(&self, msg: &AttributeMessage) -> Option<PartialState> {
        let endpoint_name = self.suffix_for(msg.endpoint);
        let ctx = ConvertContext::new(self.model(), &self.options).with_endpoint_name(endpoint_name);

        let mut matched = false;
        let mut update = PartialState::new();
        for converter in self.profile.inbound().iter().filter(|c| c.matches(msg)) {
            matched = true;
            if let Some(part) = converter.convert(msg, &ctx) {
                update.merge(part);
            }
        }

        if !matched {
            tracing::trace!(
                device = %self.id,
                cluster = %msg.cluster,
                kind = %msg.kind,
                "No converter for frame"
            );
            return None;
        }
        if update.is_empty() {
            self.state.write().touch();
            return None;
        }

        let update = match endpoint_name {
            Some(name) => update.with_key_suffix(name, self.profile.multi_endpoint_skip()),
            None => update,
        };
        let changed = self.state.write().apply(&update);
        tracing::debug!(device = %self.id, properties = update.len(), changed, "Applied inbound frame");
        Some(update)
    }

    /// Writes a property.
    ///
    /// On multi-endpoint devices a key suffixed with an endpoint name is
    /// sent to that endpoint; other keys go to the lowest endpoint. The
    /// expected state is applied right away and returned with the key as
    /// given.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedProperty` if no converter handles
    /// the key, `DeviceError::UnknownEndpoint` if the suffix names an
    /// endpoint the device lacks, or the converter's error.
    pub async fn set(&self, key: &str, value: &Value) -> Result<PartialState, Error> {
        let (base, endpoint, name) = self.route(key)?;
        let converter = self
            .profile
            .outbound_for(base)
            .ok_or_else(|| DeviceError::UnsupportedProperty(key.to_string()))?;
        let ctx = ConvertContext::new(self.model(), &self.options).with_endpoint_name(name);

        let update = converter.convert_set(endpoint, base, value, &ctx).await?;
        let update = match name {
            Some(name) => update.with_key_suffix(name, self.profile.multi_endpoint_skip()),
            None => update,
        };
        self.state.write().apply(&update);
        Ok(update)
    }

    /// Requests a fresh value of a property.
    ///
    /// The value arrives later as a read response frame.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set), without value errors.
    pub async fn get(&self, key: &str) -> Result<(), Error> {
        let (base, endpoint, name) = self.route(key)?;
        let converter = self
            .profile
            .outbound_for(base)
            .ok_or_else(|| DeviceError::UnsupportedProperty(key.to_string()))?;
        let ctx = ConvertContext::new(self.model(), &self.options).with_endpoint_name(name);
        converter.convert_get(endpoint, base, &ctx).await
    }

    /// Splits a key into base property, target endpoint and the suffix to
    /// put back on the resulting state.
    fn route<'k>(&self, key: &'k str) -> Result<(&'k str, &E, Option<&str>), DeviceError> {
        let map = self.profile.endpoints();
        match map.split_key(key) {
            (base, Some(id)) => Ok((base, self.endpoint(id)?, self.suffix_for(id))),
            (base, None) => {
                let endpoint = self
                    .endpoints
                    .values()
                    .next()
                    .ok_or(DeviceError::UnknownEndpoint(EndpointId::MIN))?;
                Ok((base, endpoint, None))
            }
        }
    }

    /// Returns the key suffix for frames of an endpoint.
    fn suffix_for(&self, id: EndpointId) -> Option<&str> {
        let map = self.profile.endpoints();
        if map.is_multi() { map.name_of(id) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::endpoint::{EndpointCall, RecordingEndpoint, RequestOptions};
    use crate::error::{TransportError, ValueError};
    use crate::quirks::{candeo, nous};
    use crate::types::{AttributeId, ClusterId, DataType, TypedValue};

    fn ep(id: u8) -> EndpointId {
        EndpointId::new(id).unwrap()
    }

    fn two_gang() -> (Device<RecordingEndpoint>, RecordingEndpoint) {
        let ep1 = RecordingEndpoint::new(ep(1));
        let ep2 = ep1.sibling(ep(2));
        let ep11 = ep1.sibling(ep(11));
        let device = Device::new(
            Arc::new(candeo::two_gang_switch_module()),
            [ep1.clone(), ep2, ep11],
        )
        .unwrap();
        (device, ep1)
    }

    fn switch_type_write(value: u8) -> EndpointCall {
        let mut attributes = crate::types::AttributeWrites::new();
        attributes.insert(
            AttributeId::Id(candeo::SWITCH_TYPE_ATTRIBUTE),
            TypedValue::new(value, DataType::Uint8),
        );
        EndpointCall::Write {
            cluster: ClusterId::GEN_BASIC,
            attributes,
            options: RequestOptions::manufacturer(candeo::MANUFACTURER_CODE),
        }
    }

    #[test]
    fn device_without_endpoints_is_rejected() {
        let endpoints: [RecordingEndpoint; 0] = [];
        let result = Device::new(Arc::new(candeo::switch_module()), endpoints);
        assert!(matches!(result, Err(DeviceError::InvalidProfile(_))));
    }

    #[tokio::test]
    async fn switch_module_commissioning_order() {
        let endpoint = RecordingEndpoint::new(ep(1));
        let device = Device::new(Arc::new(candeo::switch_module()), [endpoint.clone()]).unwrap();

        device
            .commission(&ReportingConfigurator::new())
            .await
            .unwrap();

        let ops: Vec<_> = endpoint
            .calls()
            .iter()
            .map(|c| (c.operation(), c.cluster().clone()))
            .collect();
        assert_eq!(
            ops,
            vec![
                ("bind", ClusterId::GEN_ON_OFF),
                ("configureReporting", ClusterId::GEN_ON_OFF),
                ("write", ClusterId::GEN_ON_OFF),
                ("read", ClusterId::GEN_ON_OFF),
                ("read", ClusterId::GEN_BASIC),
            ]
        );
        assert!(matches!(
            endpoint.calls().last(),
            Some(EndpointCall::Read { options, .. }) if options.manufacturer_code == Some(0x1224)
        ));
    }

    #[tokio::test]
    async fn commissioning_stops_at_failing_step() {
        let endpoint = RecordingEndpoint::new(ep(1));
        endpoint.fail_on("write", None, TransportError::Timeout(10_000));
        let device = Device::new(Arc::new(candeo::switch_module()), [endpoint.clone()]).unwrap();

        let err = device
            .commission(&ReportingConfigurator::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Timeout(10_000))));
        assert_eq!(endpoint.calls().len(), 3);
    }

    #[tokio::test]
    async fn missing_endpoint_fails_commissioning() {
        let endpoint = RecordingEndpoint::new(ep(1));
        let device = Device::new(
            Arc::new(candeo::two_gang_switch_module()),
            [endpoint.clone()],
        )
        .unwrap();

        let err = device
            .commission(&ReportingConfigurator::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Device(DeviceError::UnknownEndpoint(id)) if id == ep(2)));
        assert_eq!(endpoint.calls().len(), 2);
    }

    #[tokio::test]
    async fn commissioning_read_lands_in_state() {
        let endpoint = RecordingEndpoint::new(ep(1)).with_value(
            ClusterId::GEN_BASIC,
            candeo::SWITCH_TYPE_ATTRIBUTE,
            1,
        );
        let device = Device::new(Arc::new(candeo::switch_module()), [endpoint]).unwrap();

        device
            .commission(&ReportingConfigurator::new())
            .await
            .unwrap();

        let state = device.state();
        assert_eq!(state.get_str("external_switch_type"), Some("toggle"));
        assert!(state.last_seen().is_some());
    }

    #[tokio::test]
    async fn commissioning_returns_read_state() {
        let endpoint = RecordingEndpoint::new(ep(1))
            .with_value(ClusterId::GEN_POWER_CFG, "batteryPercentageRemaining", 120);
        let device = Device::new(Arc::new(candeo::motion_sensor()), [endpoint]).unwrap();

        let produced = device
            .commission(&ReportingConfigurator::new())
            .await
            .unwrap();

        assert_eq!(produced, PartialState::new().with("battery", 60));
        assert_eq!(device.state().get_f64("battery"), Some(60.0));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_commissioning_runs_one_at_a_time() {
        let endpoint = RecordingEndpoint::new(ep(1)).with_latency(std::time::Duration::from_millis(20));
        let device = Device::new(Arc::new(candeo::switch_module()), [endpoint.clone()]).unwrap();
        let configurator = ReportingConfigurator::new();

        let (first, second) = tokio::join!(
            device.commission(&configurator),
            device.commission(&configurator)
        );
        first.unwrap();
        second.unwrap();

        let ops: Vec<_> = endpoint.calls().iter().map(EndpointCall::operation).collect();
        let run = ["bind", "configureReporting", "write", "read", "read"];
        assert_eq!(ops, [run, run].concat());
    }

    #[tokio::test]
    async fn two_gang_switch_type_routed_to_configuration_endpoint() {
        let (device, ep1) = two_gang();

        let update = device
            .set("external_switch_type_e11", &json!("momentary"))
            .await
            .unwrap();

        assert_eq!(update.get("external_switch_type_e11").unwrap(), "momentary");
        assert_eq!(ep1.journal(), vec![(ep(11), switch_type_write(0))]);
    }

    #[tokio::test]
    async fn plain_key_goes_to_lowest_endpoint() {
        let (device, ep1) = two_gang();

        let update = device
            .set("external_switch_type", &json!("1"))
            .await
            .unwrap();

        assert_eq!(update.get("external_switch_type").unwrap(), "1");
        assert_eq!(ep1.journal(), vec![(ep(1), switch_type_write(1))]);
    }

    #[tokio::test]
    async fn unsupported_key_is_rejected() {
        let (device, ep1) = two_gang();

        let err = device.set("brightness_l1", &json!(10)).await.unwrap_err();

        assert!(matches!(err, Error::Device(DeviceError::UnsupportedProperty(key)) if key == "brightness_l1"));
        assert!(ep1.journal().is_empty());
    }

    #[tokio::test]
    async fn invalid_value_writes_nothing() {
        let (device, ep1) = two_gang();

        let err = device
            .set("external_switch_type_e11", &json!("rocker"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::UnknownEnumValue(_))));
        assert!(ep1.journal().is_empty());
        assert!(device.state().get("external_switch_type_e11").is_none());
    }

    #[tokio::test]
    async fn get_reads_on_suffixed_endpoint() {
        let (device, ep1) = two_gang();

        device.get("external_switch_type_e11").await.unwrap();

        let journal = ep1.journal();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].0, ep(11));
        assert_eq!(journal[0].1.operation(), "read");
    }

    #[test]
    fn skipped_properties_keep_plain_key() {
        let (device, _) = two_gang();
        let msg = AttributeMessage::new(
            ClusterId::HA_ELECTRICAL_MEASUREMENT,
            MessageKind::AttributeReport,
            ep(1),
        )
        .with_attribute("activePower", 42);

        let update = device.handle_message(&msg).unwrap();

        assert_eq!(update, PartialState::new().with("power", 42.0));
    }

    #[test]
    fn unknown_switch_type_on_configuration_endpoint() {
        let (device, _) = two_gang();
        let msg = AttributeMessage::new(ClusterId::GEN_BASIC, MessageKind::ReadResponse, ep(11))
            .with_attribute(0x8803, 5);

        let update = device.handle_message(&msg).unwrap();

        assert_eq!(
            update,
            PartialState::new()
                .with("external_switch_type_e11", "unknown")
                .with("external_switch_type_numeric_e11", 5)
        );
    }

    #[test]
    fn single_endpoint_keys_are_plain() {
        let device = Device::new(Arc::new(nous::e5()), [RecordingEndpoint::new(ep(1))]).unwrap();
        let msg = AttributeMessage::new(
            ClusterId::MS_TEMPERATURE_MEASUREMENT,
            MessageKind::AttributeReport,
            ep(1),
        )
        .with_attribute("measuredValue", 2150);

        let update = device.handle_message(&msg).unwrap();

        assert_eq!(update, PartialState::new().with("temperature", 21.5));
    }

    #[test]
    fn unmatched_and_ignored_frames_yield_nothing() {
        let device = Device::new(Arc::new(candeo::switch_module()), [RecordingEndpoint::new(ep(1))]).unwrap();

        let unmatched = AttributeMessage::new(ClusterId::HVAC_THERMOSTAT, MessageKind::AttributeReport, ep(1))
            .with_attribute("localTemperature", 2000);
        assert!(device.handle_message(&unmatched).is_none());
        assert!(device.state().last_seen().is_none());

        let ignored = AttributeMessage::new(ClusterId::GEN_OTA, MessageKind::AttributeReport, ep(1))
            .with_attribute("imageType", 1);
        assert!(device.handle_message(&ignored).is_none());
        assert!(device.state().last_seen().is_some());
    }
}

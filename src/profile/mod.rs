// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device profiles.
//!
//! A [`DeviceProfile`] describes how one device model is handled: its named
//! endpoints, the converters for its properties, and the requests issued
//! when it joins. Profiles are supplied by the caller; matching a joining
//! device to its profile is not done here. A few vendor profiles are
//! provided in [`quirks`](crate::quirks).

mod endpoint_map;
mod step;

pub use endpoint_map::EndpointMap;
pub use step::CommissionStep;

use crate::converter::{InboundConverter, OutboundConverter};
use crate::error::DeviceError;

/// How a device model is handled.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::converter::InboundConverter;
/// use zigbridge_lib::profile::{CommissionStep, DeviceProfile};
/// use zigbridge_lib::reporting::Quantity;
/// use zigbridge_lib::types::{ClusterId, EndpointId};
///
/// let profile = DeviceProfile::new("SW-1", "Acme")
///     .with_description("Wall switch")
///     .with_inbound(InboundConverter::OnOff)
///     .with_inbound(InboundConverter::Ignore(ClusterId::GEN_OTA))
///     .with_step(CommissionStep::bind(EndpointId::MIN, [ClusterId::GEN_ON_OFF]))
///     .with_step(CommissionStep::configure(EndpointId::MIN, Quantity::OnOff));
///
/// assert!(profile.validate().is_ok());
/// assert_eq!(profile.commissioning().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeviceProfile {
    model: String,
    vendor: String,
    description: String,
    endpoints: EndpointMap,
    multi_endpoint_skip: Vec<String>,
    inbound: Vec<InboundConverter>,
    outbound: Vec<OutboundConverter>,
    commissioning: Vec<CommissionStep>,
}

impl DeviceProfile {
    /// Creates an empty profile.
    #[must_use]
    pub fn new(model: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            vendor: vendor.into(),
            ..Self::default()
        }
    }

    /// Sets a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Names the device endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: EndpointMap) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Lists properties that keep their plain key on multi-endpoint
    /// devices.
    #[must_use]
    pub fn with_multi_endpoint_skip<S: Into<String>>(
        mut self,
        properties: impl IntoIterator<Item = S>,
    ) -> Self {
        self.multi_endpoint_skip = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an inbound converter.
    #[must_use]
    pub fn with_inbound(mut self, converter: InboundConverter) -> Self {
        self.inbound.push(converter);
        self
    }

    /// Adds an outbound converter.
    #[must_use]
    pub fn with_outbound(mut self, converter: OutboundConverter) -> Self {
        self.outbound.push(converter);
        self
    }

    /// Appends a commissioning step.
    #[must_use]
    pub fn with_step(mut self, step: CommissionStep) -> Self {
        self.commissioning.push(step);
        self
    }

    /// Appends several commissioning steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = CommissionStep>) -> Self {
        self.commissioning.extend(steps);
        self
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the vendor name.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the endpoint names.
    #[must_use]
    pub fn endpoints(&self) -> &EndpointMap {
        &self.endpoints
    }

    /// Returns the properties exempt from endpoint suffixes.
    #[must_use]
    pub fn multi_endpoint_skip(&self) -> &[String] {
        &self.multi_endpoint_skip
    }

    /// Returns the inbound converters.
    #[must_use]
    pub fn inbound(&self) -> &[InboundConverter] {
        &self.inbound
    }

    /// Returns the outbound converters.
    #[must_use]
    pub fn outbound(&self) -> &[OutboundConverter] {
        &self.outbound
    }

    /// Returns the commissioning steps, in execution order.
    #[must_use]
    pub fn commissioning(&self) -> &[CommissionStep] {
        &self.commissioning
    }

    /// Returns the outbound converter handling a property key.
    #[must_use]
    pub fn outbound_for(&self, key: &str) -> Option<&OutboundConverter> {
        self.outbound.iter().find(|c| c.handles(key))
    }

    /// Checks the profile for wiring mistakes.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::InvalidProfile` for an empty model name,
    /// duplicate endpoint names or ids, or two outbound converters claiming
    /// the same key.
    pub fn validate(&self) -> Result<(), DeviceError> {
        if self.model.is_empty() {
            return Err(DeviceError::InvalidProfile("model name is empty".to_string()));
        }
        self.endpoints.validate()?;

        let mut keys: Vec<&str> = self.outbound.iter().flat_map(|c| c.keys().iter().copied()).collect();
        keys.sort_unstable();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DeviceError::InvalidProfile(format!(
                "key '{}' handled by two converters",
                pair[0]
            )));
        }
        Ok(())
    }
}

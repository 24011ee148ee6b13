// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The endpoint seam towards the radio transport.
//!
//! This crate never talks to a radio. Everything it sends goes through the
//! [`Endpoint`] trait, implemented by the transport collaborator. Each call
//! is one network round trip and an `await` point; a failed call surfaces as
//! a [`TransportError`] that this crate propagates without retrying.
//!
//! [`RecordingEndpoint`] is an in-memory implementation that records every
//! request, for tests and dry runs.

mod recording;

use std::future::Future;

pub use recording::{EndpointCall, RecordingEndpoint};

use crate::error::TransportError;
use crate::reporting::ReportingPayload;
use crate::types::{AttributeId, AttributeMap, AttributeWrites, BindTarget, ClusterId, EndpointId};

/// Per-request options.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::endpoint::RequestOptions;
///
/// let plain = RequestOptions::default();
/// assert_eq!(plain.manufacturer_code, None);
///
/// let scoped = RequestOptions::manufacturer(0x1224);
/// assert_eq!(scoped.manufacturer_code, Some(0x1224));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    /// Restricts the request to devices of this vendor.
    pub manufacturer_code: Option<u16>,
}

impl RequestOptions {
    /// Creates options scoped to a manufacturer code.
    #[must_use]
    pub const fn manufacturer(code: u16) -> Self {
        Self {
            manufacturer_code: Some(code),
        }
    }

    /// Creates options with an optional manufacturer code.
    #[must_use]
    pub const fn with_manufacturer(code: Option<u16>) -> Self {
        Self {
            manufacturer_code: code,
        }
    }
}

/// An addressable endpoint on a device.
///
/// Implementations must be usable from concurrently running commissioning
/// sessions of different devices, hence `Send + Sync` and `Send` futures.
/// Within one device, requests are issued strictly one after another.
pub trait Endpoint: Send + Sync {
    /// Returns the endpoint number.
    fn id(&self) -> EndpointId;

    /// Reads attributes and returns the values the device answered with.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails.
    fn read(
        &self,
        cluster: &ClusterId,
        attributes: &[AttributeId],
        options: RequestOptions,
    ) -> impl Future<Output = Result<AttributeMap, TransportError>> + Send;

    /// Writes typed attribute values.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails.
    fn write(
        &self,
        cluster: &ClusterId,
        attributes: &AttributeWrites,
        options: RequestOptions,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Binds a cluster on this endpoint to a target.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails.
    fn bind(
        &self,
        cluster: &ClusterId,
        target: &BindTarget,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Installs reporting rules for a batch of attributes.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails.
    fn configure_reporting(
        &self,
        cluster: &ClusterId,
        payload: &[ReportingPayload],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

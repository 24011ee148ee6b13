// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory endpoint that records requests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::{Endpoint, RequestOptions};
use crate::error::TransportError;
use crate::reporting::ReportingPayload;
use crate::types::{
    AttributeId, AttributeMap, AttributeValue, AttributeWrites, BindTarget, ClusterId, EndpointId,
};

/// A request issued to an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointCall {
    /// Attribute read.
    Read {
        /// Target cluster.
        cluster: ClusterId,
        /// Requested attributes, in request order.
        attributes: Vec<AttributeId>,
        /// Request options.
        options: RequestOptions,
    },
    /// Attribute write.
    Write {
        /// Target cluster.
        cluster: ClusterId,
        /// Written values.
        attributes: AttributeWrites,
        /// Request options.
        options: RequestOptions,
    },
    /// Cluster bind.
    Bind {
        /// Bound cluster.
        cluster: ClusterId,
        /// Bind destination.
        target: BindTarget,
    },
    /// Reporting configuration.
    ConfigureReporting {
        /// Target cluster.
        cluster: ClusterId,
        /// Reporting rules sent.
        payload: Vec<ReportingPayload>,
    },
}

impl EndpointCall {
    /// Returns the cluster the call addressed.
    #[must_use]
    pub fn cluster(&self) -> &ClusterId {
        match self {
            Self::Read { cluster, .. }
            | Self::Write { cluster, .. }
            | Self::Bind { cluster, .. }
            | Self::ConfigureReporting { cluster, .. } => cluster,
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
            Self::Bind { .. } => "bind",
            Self::ConfigureReporting { .. } => "configureReporting",
        }
    }
}

#[derive(Debug)]
struct Failure {
    operation: &'static str,
    cluster: Option<ClusterId>,
    error: TransportError,
}

#[derive(Debug, Default)]
struct Journal {
    calls: Vec<(EndpointId, EndpointCall)>,
    values: HashMap<(EndpointId, ClusterId), AttributeMap>,
    failures: Vec<(EndpointId, Failure)>,
}

/// An [`Endpoint`] that records every request instead of sending it.
///
/// Clones share the same journal, and [`sibling`](Self::sibling) creates
/// another endpoint of the same device on that journal, so the order of
/// requests across endpoints can be checked. Writes update the stored
/// attribute values, and reads answer from them.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::endpoint::{Endpoint, EndpointCall, RecordingEndpoint, RequestOptions};
/// use zigbridge_lib::types::{AttributeId, ClusterId, EndpointId};
///
/// # async fn example() {
/// let ep = RecordingEndpoint::new(EndpointId::MIN)
///     .with_value(ClusterId::GEN_POWER_CFG, "batteryVoltage", 30);
///
/// let values = ep
///     .read(
///         &ClusterId::GEN_POWER_CFG,
///         &[AttributeId::named("batteryVoltage")],
///         RequestOptions::default(),
///     )
///     .await
///     .unwrap();
/// assert_eq!(values.len(), 1);
/// assert!(matches!(ep.calls()[0], EndpointCall::Read { .. }));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecordingEndpoint {
    id: EndpointId,
    latency: Duration,
    journal: Arc<Mutex<Journal>>,
}

impl RecordingEndpoint {
    /// Creates an endpoint with an empty journal.
    #[must_use]
    pub fn new(id: EndpointId) -> Self {
        Self {
            id,
            latency: Duration::ZERO,
            journal: Arc::new(Mutex::new(Journal::default())),
        }
    }

    /// Creates another endpoint sharing this endpoint's journal.
    #[must_use]
    pub fn sibling(&self, id: EndpointId) -> Self {
        Self {
            id,
            latency: self.latency,
            journal: Arc::clone(&self.journal),
        }
    }

    /// Delays every request by `latency` before it is recorded.
    ///
    /// Siblings created afterwards inherit the delay.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Stores an attribute value that reads will answer with.
    #[must_use]
    pub fn with_value(
        self,
        cluster: impl Into<ClusterId>,
        attribute: impl Into<AttributeId>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.set_value(cluster, attribute, value);
        self
    }

    /// Stores an attribute value that reads will answer with.
    pub fn set_value(
        &self,
        cluster: impl Into<ClusterId>,
        attribute: impl Into<AttributeId>,
        value: impl Into<AttributeValue>,
    ) {
        self.journal
            .lock()
            .values
            .entry((self.id, cluster.into()))
            .or_default()
            .insert(attribute.into(), value.into());
    }

    /// Makes every request of `operation` on this endpoint fail.
    ///
    /// `operation` is one of `"read"`, `"write"`, `"bind"`,
    /// `"configureReporting"`. When `cluster` is given, only requests on
    /// that cluster fail. Failing requests are still recorded.
    pub fn fail_on(
        &self,
        operation: &'static str,
        cluster: Option<ClusterId>,
        error: TransportError,
    ) {
        self.journal.lock().failures.push((
            self.id,
            Failure {
                operation,
                cluster,
                error,
            },
        ));
    }

    /// Returns the requests issued to this endpoint, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<EndpointCall> {
        self.journal
            .lock()
            .calls
            .iter()
            .filter(|(id, _)| *id == self.id)
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// Returns the requests issued to every endpoint sharing the journal.
    #[must_use]
    pub fn journal(&self) -> Vec<(EndpointId, EndpointCall)> {
        self.journal.lock().calls.clone()
    }

    /// Forgets all recorded requests. Stored values and failures remain.
    pub fn clear_calls(&self) {
        self.journal.lock().calls.clear();
    }

    async fn settle(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn record(&self, call: EndpointCall) -> Result<(), TransportError> {
        let mut journal = self.journal.lock();
        let failure = journal.failures.iter().find(|(id, failure)| {
            *id == self.id
                && failure.operation == call.operation()
                && failure
                    .cluster
                    .as_ref()
                    .is_none_or(|cluster| cluster == call.cluster())
        });
        let result = match failure {
            Some((_, failure)) => Err(failure.error.clone()),
            None => Ok(()),
        };
        journal.calls.push((self.id, call));
        result
    }
}

impl Endpoint for RecordingEndpoint {
    fn id(&self) -> EndpointId {
        self.id
    }

    async fn read(
        &self,
        cluster: &ClusterId,
        attributes: &[AttributeId],
        options: RequestOptions,
    ) -> Result<AttributeMap, TransportError> {
        self.settle().await;
        self.record(EndpointCall::Read {
            cluster: cluster.clone(),
            attributes: attributes.to_vec(),
            options,
        })?;
        let journal = self.journal.lock();
        let stored = journal.values.get(&(self.id, cluster.clone()));
        Ok(attributes
            .iter()
            .filter_map(|attribute| {
                stored
                    .and_then(|values| values.get(attribute))
                    .map(|value| (attribute.clone(), value.clone()))
            })
            .collect())
    }

    async fn write(
        &self,
        cluster: &ClusterId,
        attributes: &AttributeWrites,
        options: RequestOptions,
    ) -> Result<(), TransportError> {
        self.settle().await;
        self.record(EndpointCall::Write {
            cluster: cluster.clone(),
            attributes: attributes.clone(),
            options,
        })?;
        let mut journal = self.journal.lock();
        let stored = journal.values.entry((self.id, cluster.clone())).or_default();
        for (attribute, typed) in attributes {
            stored.insert(attribute.clone(), typed.value.clone());
        }
        Ok(())
    }

    async fn bind(&self, cluster: &ClusterId, target: &BindTarget) -> Result<(), TransportError> {
        self.settle().await;
        self.record(EndpointCall::Bind {
            cluster: cluster.clone(),
            target: *target,
        })
    }

    async fn configure_reporting(
        &self,
        cluster: &ClusterId,
        payload: &[ReportingPayload],
    ) -> Result<(), TransportError> {
        self.settle().await;
        self.record(EndpointCall::ConfigureReporting {
            cluster: cluster.clone(),
            payload: payload.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, TypedValue};

    fn ep(id: u8) -> EndpointId {
        EndpointId::new(id).unwrap()
    }

    #[tokio::test]
    async fn write_then_read_returns_written_value() {
        let endpoint = RecordingEndpoint::new(ep(1));
        let mut writes = AttributeWrites::new();
        writes.insert(
            AttributeId::named("onLevel"),
            TypedValue::new(0xffu8, DataType::Uint8),
        );
        endpoint
            .write(&ClusterId::GEN_LEVEL_CTRL, &writes, RequestOptions::default())
            .await
            .unwrap();

        let values = endpoint
            .read(
                &ClusterId::GEN_LEVEL_CTRL,
                &[AttributeId::named("onLevel")],
                RequestOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(
            values.get(&AttributeId::named("onLevel")),
            Some(&AttributeValue::Int(255))
        );
    }

    #[tokio::test]
    async fn scripted_failure_is_recorded_and_returned() {
        let endpoint = RecordingEndpoint::new(ep(1));
        endpoint.fail_on(
            "bind",
            Some(ClusterId::GEN_BASIC),
            TransportError::Timeout(100),
        );

        let result = endpoint
            .bind(&ClusterId::GEN_BASIC, &BindTarget::default())
            .await;
        assert_eq!(result, Err(TransportError::Timeout(100)));

        endpoint
            .bind(&ClusterId::GEN_ON_OFF, &BindTarget::default())
            .await
            .unwrap();
        assert_eq!(endpoint.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_each_request() {
        let endpoint = RecordingEndpoint::new(ep(1)).with_latency(Duration::from_millis(250));
        let sibling = endpoint.sibling(ep(2));
        let start = tokio::time::Instant::now();

        endpoint
            .bind(&ClusterId::GEN_ON_OFF, &BindTarget::default())
            .await
            .unwrap();
        sibling
            .bind(&ClusterId::GEN_ON_OFF, &BindTarget::default())
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(500));
        assert_eq!(endpoint.journal().len(), 2);
    }

    #[tokio::test]
    async fn siblings_share_journal_but_not_values() {
        let first = RecordingEndpoint::new(ep(1)).with_value(ClusterId::GEN_ON_OFF, "onOff", 1u8);
        let second = first.sibling(ep(2));

        let values = second
            .read(
                &ClusterId::GEN_ON_OFF,
                &[AttributeId::named("onOff")],
                RequestOptions::default(),
            )
            .await
            .unwrap();
        assert!(values.is_empty());
        assert!(first.calls().is_empty());
        assert_eq!(second.calls().len(), 1);
        assert_eq!(first.journal().len(), 1);
        assert_eq!(first.journal()[0].0, ep(2));
    }
}

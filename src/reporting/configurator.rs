// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reporting configuration, binding and scaling reads against an endpoint.

use super::payload::{Override, payload};
use super::quantity::Quantity;
use crate::endpoint::{Endpoint, RequestOptions};
use crate::error::{Error, TransportError};
use crate::types::{AttributeId, AttributeMap, BindTarget, ClusterId};

static ELECTRICAL_VOLTAGE_CURRENT: [AttributeId; 3] = [
    AttributeId::named("acVoltageMultiplier"),
    AttributeId::named("acVoltageDivisor"),
    AttributeId::named("acCurrentMultiplier"),
];

static ELECTRICAL_CURRENT_POWER: [AttributeId; 3] = [
    AttributeId::named("acCurrentDivisor"),
    AttributeId::named("acPowerMultiplier"),
    AttributeId::named("acPowerDivisor"),
];

static ELECTRICAL_FREQUENCY: [AttributeId; 2] = [
    AttributeId::named("acFrequencyDivisor"),
    AttributeId::named("acFrequencyMultiplier"),
];

static METERING: [AttributeId; 2] = [
    AttributeId::named("multiplier"),
    AttributeId::named("divisor"),
];

/// Issues reporting setup requests to device endpoints.
///
/// Every method is a fixed sequence of endpoint round trips. A failing
/// request ends the sequence and its error is returned unchanged; requests
/// already sent are not undone.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::endpoint::{EndpointCall, RecordingEndpoint};
/// use zigbridge_lib::reporting::{Override, Quantity, ReportingConfigurator};
/// use zigbridge_lib::types::EndpointId;
///
/// # async fn example() -> zigbridge_lib::Result<()> {
/// let endpoint = RecordingEndpoint::new(EndpointId::MIN);
/// let configurator = ReportingConfigurator::new();
///
/// configurator
///     .configure(&endpoint, Quantity::Temperature, Some(&Override::new().with_change(50)))
///     .await?;
///
/// assert!(matches!(
///     endpoint.calls()[0],
///     EndpointCall::ConfigureReporting { .. }
/// ));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportingConfigurator {
    strict_intervals: bool,
}

impl ReportingConfigurator {
    /// Creates a configurator that sends intervals unchecked.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict_intervals: false,
        }
    }

    /// Rejects payloads whose minimum interval exceeds the maximum.
    ///
    /// The check happens before anything is sent.
    #[must_use]
    pub const fn with_strict_intervals(mut self, strict: bool) -> Self {
        self.strict_intervals = strict;
        self
    }

    /// Returns whether inverted intervals are rejected.
    #[must_use]
    pub const fn strict_intervals(&self) -> bool {
        self.strict_intervals
    }

    /// Configures reporting of one quantity.
    ///
    /// Builds the payload from the quantity defaults and `overrides`, sends
    /// it, then reads the attribute back for battery quantities. Returns the
    /// read-back answer, empty when the quantity has none.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for an inverted interval in strict mode, or
    /// `Error::Transport` if a request fails.
    pub async fn configure<E: Endpoint>(
        &self,
        endpoint: &E,
        quantity: Quantity,
        overrides: Option<&Override>,
    ) -> Result<AttributeMap, Error> {
        let descriptor = quantity.descriptor();
        let batch = payload(
            descriptor.attribute.clone(),
            descriptor.min,
            descriptor.max,
            descriptor.change,
            overrides,
        );

        if self.strict_intervals {
            for entry in &batch {
                entry.validate()?;
            }
        }

        tracing::debug!(
            endpoint = %endpoint.id(),
            cluster = %descriptor.cluster,
            quantity = %quantity,
            "Configuring reporting"
        );
        endpoint
            .configure_reporting(&descriptor.cluster, &batch)
            .await?;

        if !descriptor.read_after_configure {
            return Ok(AttributeMap::new());
        }
        let values = endpoint
            .read(
                &descriptor.cluster,
                &[descriptor.attribute],
                RequestOptions::default(),
            )
            .await?;
        Ok(values)
    }

    /// Binds each cluster to `target`, one after another.
    ///
    /// # Errors
    ///
    /// Returns the first bind failure; later clusters are not bound.
    pub async fn bind<E: Endpoint>(
        &self,
        endpoint: &E,
        target: &BindTarget,
        clusters: &[ClusterId],
    ) -> Result<(), TransportError> {
        for cluster in clusters {
            tracing::debug!(endpoint = %endpoint.id(), cluster = %cluster, target = %target, "Binding");
            if let Err(e) = endpoint.bind(cluster, target).await {
                tracing::debug!(endpoint = %endpoint.id(), cluster = %cluster, error = %e, "Bind failed");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Reads the electrical measurement scaling factors.
    ///
    /// Issues two reads, plus a third for the frequency factors when
    /// `read_frequency` is set. Devices reject larger batches, so the
    /// attributes are split across requests. Returns every value the device
    /// answered with.
    ///
    /// # Errors
    ///
    /// Returns the first failing read; later reads are not issued.
    pub async fn read_electrical_measurement_multiplier_divisors<E: Endpoint>(
        &self,
        endpoint: &E,
        read_frequency: bool,
    ) -> Result<AttributeMap, TransportError> {
        let cluster = ClusterId::HA_ELECTRICAL_MEASUREMENT;
        let mut chunks = vec![&ELECTRICAL_VOLTAGE_CURRENT[..], &ELECTRICAL_CURRENT_POWER[..]];
        if read_frequency {
            chunks.push(&ELECTRICAL_FREQUENCY[..]);
        }

        let mut values = AttributeMap::new();
        for chunk in chunks {
            tracing::trace!(endpoint = %endpoint.id(), attributes = chunk.len(), "Reading electrical scaling");
            values.extend(
                endpoint
                    .read(&cluster, chunk, RequestOptions::default())
                    .await?,
            );
        }
        Ok(values)
    }

    /// Reads the metering multiplier and divisor in one request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the read fails.
    pub async fn read_metering_multiplier_divisor<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<AttributeMap, TransportError> {
        tracing::trace!(endpoint = %endpoint.id(), "Reading metering scaling");
        endpoint
            .read(&ClusterId::SE_METERING, &METERING, RequestOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{EndpointCall, RecordingEndpoint};
    use crate::error::ValueError;
    use crate::reporting::ReportingPayload;
    use crate::types::{EndpointId, IeeeAddress};

    fn endpoint() -> RecordingEndpoint {
        RecordingEndpoint::new(EndpointId::MIN)
    }

    fn read_attributes(call: &EndpointCall) -> Vec<AttributeId> {
        match call {
            EndpointCall::Read { attributes, .. } => attributes.clone(),
            other => panic!("expected read, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn configure_sends_defaults() {
        let ep = endpoint();
        ReportingConfigurator::new()
            .configure(&ep, Quantity::Humidity, None)
            .await
            .unwrap();

        assert_eq!(
            ep.calls(),
            vec![EndpointCall::ConfigureReporting {
                cluster: ClusterId::MS_RELATIVE_HUMIDITY,
                payload: vec![ReportingPayload {
                    attribute: AttributeId::named("measuredValue"),
                    minimum_report_interval: 10,
                    maximum_report_interval: 3600,
                    reportable_change: Some(100),
                }],
            }]
        );
    }

    #[tokio::test]
    async fn battery_quantity_reads_back() {
        let ep = endpoint().with_value(ClusterId::GEN_POWER_CFG, "batteryPercentageRemaining", 180);
        let values = ReportingConfigurator::new()
            .configure(&ep, Quantity::BatteryPercentageRemaining, None)
            .await
            .unwrap();

        let calls = ep.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].operation(), "configureReporting");
        assert_eq!(
            read_attributes(&calls[1]),
            vec![AttributeId::named("batteryPercentageRemaining")]
        );
        assert_eq!(
            values[&AttributeId::named("batteryPercentageRemaining")].as_i64(),
            Some(180)
        );
    }

    #[tokio::test]
    async fn non_battery_quantity_answers_nothing() {
        let ep = endpoint();
        let values = ReportingConfigurator::new()
            .configure(&ep, Quantity::Temperature, None)
            .await
            .unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn configure_failure_skips_read_back() {
        let ep = endpoint();
        ep.fail_on("configureReporting", None, TransportError::Timeout(10));

        let result = ReportingConfigurator::new()
            .configure(&ep, Quantity::BatteryVoltage, None)
            .await;

        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Timeout(10)))
        ));
        assert_eq!(ep.calls().len(), 1);
    }

    #[tokio::test]
    async fn inverted_interval_sent_unless_strict() {
        let inverted = Override::new().with_min(100).with_max(10);

        let ep = endpoint();
        ReportingConfigurator::new()
            .configure(&ep, Quantity::OnOff, Some(&inverted))
            .await
            .unwrap();
        assert_eq!(ep.calls().len(), 1);

        let ep = endpoint();
        let result = ReportingConfigurator::new()
            .with_strict_intervals(true)
            .configure(&ep, Quantity::OnOff, Some(&inverted))
            .await;
        assert!(matches!(
            result,
            Err(Error::Value(ValueError::InvertedInterval { min: 100, max: 10 }))
        ));
        assert!(ep.calls().is_empty());
    }

    #[tokio::test]
    async fn bind_stops_at_first_failure() {
        let ep = endpoint();
        ep.fail_on(
            "bind",
            Some(ClusterId::GEN_LEVEL_CTRL),
            TransportError::NoRoute("0x0001".to_string()),
        );
        let target = BindTarget::endpoint(IeeeAddress::new(0x00124b0001), EndpointId::MIN);

        let result = ReportingConfigurator::new()
            .bind(
                &ep,
                &target,
                &[
                    ClusterId::GEN_ON_OFF,
                    ClusterId::GEN_LEVEL_CTRL,
                    ClusterId::HA_ELECTRICAL_MEASUREMENT,
                ],
            )
            .await;

        assert_eq!(result, Err(TransportError::NoRoute("0x0001".to_string())));
        let clusters: Vec<_> = ep.calls().iter().map(|c| c.cluster().clone()).collect();
        assert_eq!(clusters, vec![ClusterId::GEN_ON_OFF, ClusterId::GEN_LEVEL_CTRL]);
    }

    #[tokio::test]
    async fn failed_first_bind_skips_the_rest() {
        let ep = endpoint();
        ep.fail_on(
            "bind",
            Some(ClusterId::GEN_BASIC),
            TransportError::Rejected {
                cluster: ClusterId::GEN_BASIC,
                status: 0x8b,
            },
        );
        let target = BindTarget::endpoint(IeeeAddress::new(0x00124b0001), EndpointId::MIN);

        let result = ReportingConfigurator::new()
            .bind(&ep, &target, &[ClusterId::GEN_BASIC, ClusterId::GEN_ON_OFF])
            .await;

        assert!(matches!(result, Err(TransportError::Rejected { status: 0x8b, .. })));
        assert_eq!(
            ep.calls(),
            vec![EndpointCall::Bind {
                cluster: ClusterId::GEN_BASIC,
                target,
            }]
        );
    }

    #[tokio::test]
    async fn electrical_reads_in_chunks() {
        let ep = endpoint();
        let configurator = ReportingConfigurator::new();

        configurator
            .read_electrical_measurement_multiplier_divisors(&ep, false)
            .await
            .unwrap();
        assert_eq!(ep.calls().len(), 2);

        ep.clear_calls();
        configurator
            .read_electrical_measurement_multiplier_divisors(&ep, true)
            .await
            .unwrap();
        let calls = ep.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(read_attributes(&calls[0]), ELECTRICAL_VOLTAGE_CURRENT.to_vec());
        assert_eq!(read_attributes(&calls[1]), ELECTRICAL_CURRENT_POWER.to_vec());
        assert_eq!(read_attributes(&calls[2]), ELECTRICAL_FREQUENCY.to_vec());
    }

    #[tokio::test]
    async fn electrical_reads_merge_answers() {
        let ep = endpoint()
            .with_value(ClusterId::HA_ELECTRICAL_MEASUREMENT, "acVoltageDivisor", 10)
            .with_value(ClusterId::HA_ELECTRICAL_MEASUREMENT, "acPowerDivisor", 100);

        let values = ReportingConfigurator::new()
            .read_electrical_measurement_multiplier_divisors(&ep, false)
            .await
            .unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(
            values[&AttributeId::named("acPowerDivisor")].as_i64(),
            Some(100)
        );
    }

    #[tokio::test]
    async fn metering_reads_once() {
        let ep = endpoint();
        ReportingConfigurator::new()
            .read_metering_multiplier_divisor(&ep)
            .await
            .unwrap();

        let calls = ep.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].cluster(), &ClusterId::SE_METERING);
        assert_eq!(read_attributes(&calls[0]), METERING.to_vec());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commissioning steps.

use crate::endpoint::RequestOptions;
use crate::reporting::{Override, Quantity};
use crate::types::{AttributeId, AttributeWrites, ClusterId, EndpointId, TypedValue};

/// One request sequence run when a device joins.
///
/// Steps run in the order they are declared, each one against a single
/// endpoint. The first failing step ends commissioning.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::profile::CommissionStep;
/// use zigbridge_lib::reporting::{Override, Quantity};
/// use zigbridge_lib::types::{ClusterId, DataType, EndpointId, TypedValue};
///
/// let steps = vec![
///     CommissionStep::bind(EndpointId::MIN, [ClusterId::GEN_ON_OFF]),
///     CommissionStep::configure(EndpointId::MIN, Quantity::OnOff),
///     CommissionStep::configure_with(
///         EndpointId::MIN,
///         Quantity::Illuminance,
///         Override::new().with_min(1).with_max(65535).with_change(1),
///     ),
///     CommissionStep::write(
///         EndpointId::MIN,
///         ClusterId::GEN_LEVEL_CTRL,
///         17u16,
///         TypedValue::new(0xffu8, DataType::Uint8),
///     ),
///     CommissionStep::read(EndpointId::MIN, ClusterId::GEN_LEVEL_CTRL, ["onLevel"]),
/// ];
/// assert_eq!(steps[3].endpoint(), EndpointId::MIN);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CommissionStep {
    /// Binds clusters to the device's bind target.
    Bind {
        /// Source endpoint.
        endpoint: EndpointId,
        /// Clusters to bind, in order.
        clusters: Vec<ClusterId>,
    },
    /// Configures reporting of a quantity.
    ConfigureReporting {
        /// Reporting endpoint.
        endpoint: EndpointId,
        /// The quantity.
        quantity: Quantity,
        /// Replaced defaults.
        overrides: Option<Override>,
    },
    /// Writes attribute values.
    Write {
        /// Target endpoint.
        endpoint: EndpointId,
        /// Target cluster.
        cluster: ClusterId,
        /// Values to write.
        attributes: AttributeWrites,
        /// Request options.
        options: RequestOptions,
    },
    /// Reads attribute values.
    ///
    /// The answer is fed through the device's inbound converters.
    Read {
        /// Target endpoint.
        endpoint: EndpointId,
        /// Target cluster.
        cluster: ClusterId,
        /// Attributes to read.
        attributes: Vec<AttributeId>,
        /// Request options.
        options: RequestOptions,
    },
    /// Reads the electrical measurement multipliers and divisors.
    ReadElectricalScaling {
        /// Target endpoint.
        endpoint: EndpointId,
        /// Whether the frequency factors are read too.
        read_frequency: bool,
    },
    /// Reads the metering multiplier and divisor.
    ReadMeteringScaling {
        /// Target endpoint.
        endpoint: EndpointId,
    },
}

impl CommissionStep {
    /// Creates a bind step.
    #[must_use]
    pub fn bind(endpoint: EndpointId, clusters: impl IntoIterator<Item = ClusterId>) -> Self {
        Self::Bind {
            endpoint,
            clusters: clusters.into_iter().collect(),
        }
    }

    /// Creates a reporting step with default thresholds.
    #[must_use]
    pub const fn configure(endpoint: EndpointId, quantity: Quantity) -> Self {
        Self::ConfigureReporting {
            endpoint,
            quantity,
            overrides: None,
        }
    }

    /// Creates a reporting step with replaced thresholds.
    #[must_use]
    pub const fn configure_with(endpoint: EndpointId, quantity: Quantity, overrides: Override) -> Self {
        Self::ConfigureReporting {
            endpoint,
            quantity,
            overrides: Some(overrides),
        }
    }

    /// Creates a single-attribute write step.
    #[must_use]
    pub fn write(
        endpoint: EndpointId,
        cluster: ClusterId,
        attribute: impl Into<AttributeId>,
        value: TypedValue,
    ) -> Self {
        let mut attributes = AttributeWrites::new();
        attributes.insert(attribute.into(), value);
        Self::Write {
            endpoint,
            cluster,
            attributes,
            options: RequestOptions::default(),
        }
    }

    /// Creates a read step.
    #[must_use]
    pub fn read<A: Into<AttributeId>>(
        endpoint: EndpointId,
        cluster: ClusterId,
        attributes: impl IntoIterator<Item = A>,
    ) -> Self {
        Self::Read {
            endpoint,
            cluster,
            attributes: attributes.into_iter().map(Into::into).collect(),
            options: RequestOptions::default(),
        }
    }

    /// Scopes a read or write step to a manufacturer.
    ///
    /// Other steps are returned unchanged.
    #[must_use]
    pub fn with_manufacturer_code(mut self, code: u16) -> Self {
        if let Self::Write { options, .. } | Self::Read { options, .. } = &mut self {
            *options = RequestOptions::manufacturer(code);
        }
        self
    }

    /// Returns the endpoint the step runs against.
    #[must_use]
    pub const fn endpoint(&self) -> EndpointId {
        match self {
            Self::Bind { endpoint, .. }
            | Self::ConfigureReporting { endpoint, .. }
            | Self::Write { endpoint, .. }
            | Self::Read { endpoint, .. }
            | Self::ReadElectricalScaling { endpoint, .. }
            | Self::ReadMeteringScaling { endpoint } => *endpoint,
        }
    }

    /// Returns a short name of the step kind, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bind { .. } => "bind",
            Self::ConfigureReporting { .. } => "configureReporting",
            Self::Write { .. } => "write",
            Self::Read { .. } => "read",
            Self::ReadElectricalScaling { .. } => "readElectricalScaling",
            Self::ReadMeteringScaling { .. } => "readMeteringScaling",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn manufacturer_scope_applies_to_reads_and_writes() {
        let read = CommissionStep::read(EndpointId::MIN, ClusterId::GEN_BASIC, [0x8803u16])
            .with_manufacturer_code(0x1224);
        assert!(matches!(
            read,
            CommissionStep::Read { options, .. } if options.manufacturer_code == Some(0x1224)
        ));

        let bind = CommissionStep::bind(EndpointId::MIN, [ClusterId::GEN_BASIC])
            .with_manufacturer_code(0x1224);
        assert_eq!(bind, CommissionStep::bind(EndpointId::MIN, [ClusterId::GEN_BASIC]));
    }

    #[test]
    fn write_holds_single_attribute() {
        let step = CommissionStep::write(
            EndpointId::MIN,
            ClusterId::GEN_ON_OFF,
            16387u16,
            TypedValue::new(0xffu8, DataType::Enum8),
        );
        let CommissionStep::Write { attributes, .. } = step else {
            panic!("expected write step");
        };
        assert_eq!(attributes.len(), 1);
        assert!(attributes.contains_key(&AttributeId::Id(16387)));
    }

    #[test]
    fn kind_names() {
        assert_eq!(CommissionStep::configure(EndpointId::MIN, Quantity::OnOff).kind(), "configureReporting");
        assert_eq!(
            CommissionStep::ReadMeteringScaling { endpoint: EndpointId::MIN }.kind(),
            "readMeteringScaling"
        );
    }
}

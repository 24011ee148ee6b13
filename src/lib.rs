// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ZigBridge` Lib - Attribute reporting and value conversion for Zigbee-style
//! cluster devices.
//!
//! This library is the device-support layer of a home-automation bridge. It
//! configures how devices report their attributes, converts between raw
//! attribute values and normalized state, and commissions devices according
//! to per-model profiles. The radio transport is abstracted behind the
//! [`Endpoint`](endpoint::Endpoint) trait.
//!
//! # Supported Features
//!
//! - **Reporting configuration**: Per-quantity default intervals and
//!   thresholds, overridable per device ([`reporting`])
//! - **Scaling reads**: Electrical measurement and metering multipliers and
//!   divisors
//! - **Value conversion**: Enumerated, scaled numeric and on/off attributes,
//!   both directions ([`converter`])
//! - **Multi-endpoint devices**: Endpoint-suffixed state keys and routing
//! - **Commissioning**: Ordered per-profile request sequences, run
//!   concurrently across devices ([`manager`])
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use zigbridge_lib::endpoint::RecordingEndpoint;
//! use zigbridge_lib::manager::Gateway;
//! use zigbridge_lib::quirks::candeo;
//! use zigbridge_lib::types::EndpointId;
//!
//! #[tokio::main]
//! async fn main() -> zigbridge_lib::Result<()> {
//!     let gateway = Gateway::new();
//!
//!     // Any `Endpoint` implementation works here; this one records requests.
//!     let endpoint = RecordingEndpoint::new(EndpointId::MIN);
//!     let id = gateway
//!         .add(Arc::new(candeo::switch_module()), [endpoint.clone()])
//!         .await?;
//!
//!     gateway.commission(id).await?;
//!     gateway
//!         .set(id, "external_switch_type", &serde_json::json!("toggle"))
//!         .await?;
//!
//!     assert_eq!(endpoint.calls().len(), 6);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuring Reporting Directly
//!
//! ```
//! use zigbridge_lib::endpoint::RecordingEndpoint;
//! use zigbridge_lib::reporting::{Override, Quantity, ReportingConfigurator};
//! use zigbridge_lib::types::EndpointId;
//!
//! # async fn example() -> zigbridge_lib::Result<()> {
//! let endpoint = RecordingEndpoint::new(EndpointId::MIN);
//! let configurator = ReportingConfigurator::new();
//!
//! // Only the threshold changes; intervals keep their defaults.
//! configurator
//!     .configure(&endpoint, Quantity::Temperature, Some(&Override::new().with_change(50)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod converter;
pub mod device;
pub mod endpoint;
pub mod error;
pub mod event;
pub mod manager;
pub mod message;
pub mod profile;
pub mod quirks;
pub mod reporting;
pub mod state;
pub mod types;

pub use device::Device;
pub use endpoint::{Endpoint, RequestOptions};
pub use error::{DeviceError, Error, ParseError, Result, TransportError, ValueError};
pub use manager::{CommissioningReport, Gateway, GatewayConfig};
pub use message::{AttributeMessage, MessageKind};
pub use profile::{CommissionStep, DeviceProfile, EndpointMap};
pub use reporting::{Override, Quantity, ReportingConfigurator};
pub use state::{DeviceState, PartialState};
pub use types::{AttributeId, AttributeValue, BindTarget, ClusterId, DataType, EndpointId};

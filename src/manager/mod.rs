// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway for coordinating many devices.
//!
//! The [`Gateway`] keeps a registry of [`Device`](crate::device::Device)s and
//! offers:
//!
//! - **Concurrent commissioning**: every device is commissioned in its own
//!   task; a failure is reported for that device only
//! - **Frame dispatch**: inbound frames are routed to the device they came
//!   from and its state is updated
//! - **Event system**: lifecycle, commissioning and state events on a
//!   broadcast channel
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use zigbridge_lib::endpoint::RecordingEndpoint;
//! use zigbridge_lib::event::DeviceEvent;
//! use zigbridge_lib::manager::{Gateway, GatewayConfig};
//! use zigbridge_lib::quirks::nous;
//! use zigbridge_lib::types::EndpointId;
//!
//! # async fn example() -> zigbridge_lib::Result<()> {
//! let gateway = Gateway::with_config(GatewayConfig::default().with_strict_intervals(true));
//! let id = gateway
//!     .add(Arc::new(nous::e5()), [RecordingEndpoint::new(EndpointId::MIN)])
//!     .await?;
//!
//! let mut events = gateway.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         if let DeviceEvent::StateChanged { device_id, update, .. } = event {
//!             println!("{device_id}: {update:?}");
//!         }
//!     }
//! });
//!
//! gateway
//!     .dispatch_json(
//!         id,
//!         r#"{"cluster":"msTemperatureMeasurement","type":"attributeReport","endpoint":1,"data":{"measuredValue":2215}}"#,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod gateway;
mod gateway_config;
mod report;

pub use gateway::Gateway;
pub use gateway_config::GatewayConfig;
pub use report::CommissioningReport;

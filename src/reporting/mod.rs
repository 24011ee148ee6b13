// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute reporting configuration.
//!
//! Devices push attribute changes on their own once told which attributes
//! to report, how often at least and at most, and by how much a value must
//! change to trigger an early report.
//!
//! - [`payload`](mod@payload) - Reporting records and per-call overrides
//! - [`quantity`] - Default thresholds per physical quantity
//! - [`configurator`] - Requests issued against an endpoint

pub mod configurator;
pub mod payload;
pub mod quantity;

pub use configurator::ReportingConfigurator;
pub use payload::{Override, ReportingPayload, interval, payload};
pub use quantity::{Quantity, QuantityDescriptor};

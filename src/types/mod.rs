// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value and addressing types for cluster attribute traffic.
//!
//! # Types
//!
//! - [`AttributeId`] / [`ClusterId`] - Numeric or symbolic identifiers
//! - [`AttributeValue`] - Raw value as carried in a frame
//! - [`TypedValue`] - Value plus the [`DataType`] it is written as
//! - [`EndpointId`] - Application endpoint number (1-240)
//! - [`IeeeAddress`] / [`BindTarget`] - Bind destinations

mod address;
mod data_type;
mod identifier;
mod value;

pub use address::{BindTarget, EndpointId, IeeeAddress};
pub use data_type::DataType;
pub use identifier::{AttributeId, ClusterId};
pub use value::{AttributeMap, AttributeValue, AttributeWrites, TypedValue};

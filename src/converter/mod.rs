// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bidirectional conversion between attribute frames and normalized state.
//!
//! - [`InboundConverter`] - attribute report or read response to state
//! - [`OutboundConverter`] - property set or get to attribute write or read
//!
//! Converters are plain data describing an attribute ([`EnumAttribute`],
//! [`NumericAttribute`]) and are dispatched by the device router. They
//! never hold state between calls.

mod attribute;
mod inbound;
mod options;
mod outbound;

pub use attribute::{EnumAttribute, NumericAttribute};
pub use inbound::InboundConverter;
pub use options::ConverterOptions;
pub use outbound::OutboundConverter;

/// Information about the device a conversion runs for.
#[derive(Debug, Clone, Copy)]
pub struct ConvertContext<'a> {
    /// Device model, for logging.
    pub model: &'a str,
    /// Name of the endpoint involved, on multi-endpoint devices.
    pub endpoint_name: Option<&'a str>,
    /// User options of the device.
    pub options: &'a ConverterOptions,
}

impl<'a> ConvertContext<'a> {
    /// Creates a context without endpoint name.
    #[must_use]
    pub const fn new(model: &'a str, options: &'a ConverterOptions) -> Self {
        Self {
            model,
            endpoint_name: None,
            options,
        }
    }

    /// Sets the endpoint name.
    #[must_use]
    pub const fn with_endpoint_name(mut self, name: Option<&'a str>) -> Self {
        self.endpoint_name = name;
        self
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ZigBridge` library.
//!
//! This module provides the error hierarchy used across the library: value
//! validation and encoding, endpoint transport failures, inbound frame
//! parsing, and device wiring.
//!
//! Transport failures are never retried or masked by this crate. They are
//! wrapped in [`Error::Transport`] and handed back to whoever drives the
//! commissioning session.

use thiserror::Error;

use crate::types::{ClusterId, EndpointId};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be encoded or failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The endpoint transport rejected a request.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// An inbound frame could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A device or profile wiring problem.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Device was not found in the gateway.
    #[error("device not found")]
    DeviceNotFound,
}

/// Errors related to value validation and encoding.
///
/// These are raised before anything is sent to a device: the library rejects
/// a request rather than writing a value it cannot represent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value does not fit the target wire type.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// Input is neither a known enum label nor a parseable integer.
    #[error("'{0}' is neither a known label nor an integer")]
    UnknownEnumValue(String),

    /// Input has the wrong JSON type for the property.
    #[error("expected {expected} for '{property}', got {actual}")]
    InvalidType {
        /// The property being set.
        property: String,
        /// The expected JSON type.
        expected: &'static str,
        /// The JSON value that was provided.
        actual: String,
    },

    /// Input is not a finite number.
    #[error("value for '{0}' is not a finite number")]
    NotFinite(String),

    /// A reporting interval has its minimum above its maximum.
    ///
    /// Only raised when strict interval checking is enabled.
    #[error("minimum report interval {min}s exceeds maximum {max}s")]
    InvertedInterval {
        /// Minimum report interval in seconds.
        min: u16,
        /// Maximum report interval in seconds.
        max: u16,
    },

    /// An unknown data type code.
    #[error("unknown data type code 0x{0:02x}")]
    UnknownDataType(u8),

    /// An unknown reporting quantity name.
    #[error("unknown reporting quantity: {0}")]
    UnknownQuantity(String),
}

/// Errors raised by an [`Endpoint`](crate::endpoint::Endpoint) transport.
///
/// The library treats these as opaque and propagates them unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// No route to the device.
    #[error("no route to device: {0}")]
    NoRoute(String),

    /// The device answered with a failure status.
    #[error("device rejected request on {cluster} with status 0x{status:02x}")]
    Rejected {
        /// Cluster the request addressed.
        cluster: ClusterId,
        /// ZCL status code returned by the device.
        status: u8,
    },

    /// The device does not implement the requested attribute.
    #[error("unsupported attribute {attribute} on {cluster}")]
    UnsupportedAttribute {
        /// Cluster the request addressed.
        cluster: ClusterId,
        /// Attribute name or id.
        attribute: String,
    },

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to parsing inbound frames.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to device and profile wiring.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device has no endpoint with this id.
    #[error("device has no endpoint {0}")]
    UnknownEndpoint(EndpointId),

    /// No outbound converter handles this property key.
    #[error("no converter handles property '{0}'")]
    UnsupportedProperty(String),

    /// Device profile is invalid.
    #[error("invalid device profile: {0}")]
    InvalidProfile(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

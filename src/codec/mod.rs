// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateless conversion between wire-encoded attribute values and logical
//! values.
//!
//! - [`scale`] - Numeric scales, including the calibrated illuminance curve
//! - [`enumeration`] - Label lookups for enumerated vendor attributes
//!
//! All tables here are immutable statics.

pub mod enumeration;
pub mod scale;

pub use enumeration::{Decoded, EnumCodec};
pub use scale::{Scale, ScaleFn};

/// Direction of a value conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raw device value to logical value.
    FromWire,
    /// Logical value to raw device value.
    ToWire,
}

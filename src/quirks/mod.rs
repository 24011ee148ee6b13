// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ready-made profiles for devices that need vendor-specific handling.
//!
//! - [`candeo`] - Switch modules with a vendor switch-type attribute, and a
//!   motion sensor with a calibrated illuminance curve
//! - [`nous`] - Climate sensors
//! - [`common`] - Converters for standard measurement attributes

pub mod candeo;
pub mod common;
pub mod nous;

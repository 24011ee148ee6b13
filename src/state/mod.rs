// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! Converters translate frames into a [`PartialState`], which is then
//! applied to the device's [`DeviceState`].
//!
//! # Examples
//!
//! ```
//! use zigbridge_lib::state::{DeviceState, PartialState};
//!
//! let mut state = DeviceState::new();
//! state.apply(&PartialState::new().with("state_l1", "ON"));
//!
//! assert_eq!(state.get_str("state_l1"), Some("ON"));
//! ```

mod device_state;
mod partial_state;

pub use device_state::DeviceState;
pub use partial_state::PartialState;

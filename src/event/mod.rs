// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device lifecycle, commissioning and state events.
//!
//! The gateway publishes a [`DeviceEvent`] on its [`EventBus`] whenever a
//! device is added or removed, finishes commissioning, or changes state.
//!
//! # Examples
//!
//! ```
//! use zigbridge_lib::event::{DeviceEvent, DeviceId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! let device_id = DeviceId::new();
//! bus.publish(DeviceEvent::device_added(device_id, "C205"));
//! assert_eq!(rx.try_recv().unwrap().device_id(), device_id);
//! ```

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;

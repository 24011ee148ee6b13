// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of gateway events.

use tokio::sync::broadcast;

use super::DeviceEvent;

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out channel for [`DeviceEvent`]s.
///
/// Each receiver from [`subscribe`](Self::subscribe) sees every event
/// published after it was created. Clones publish into the same channel.
///
/// The channel keeps the last `capacity` events (256 unless configured). A
/// receiver further behind than that skips ahead and gets
/// `RecvError::Lagged` with the number of events it missed; publishing
/// never waits for slow receivers.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::event::{DeviceEvent, DeviceId, EventBus};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DeviceEvent::commissioned(DeviceId::new()));
/// assert!(rx.try_recv().unwrap().is_commissioning());
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Creates a bus keeping the last 256 events.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus keeping the last `capacity` events, at least one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Opens a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }

    /// Number of open receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event and returns how many receivers will see it.
    ///
    /// With no receiver open the event is dropped and 0 is returned.
    pub fn publish(&self, event: DeviceEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(device_id = %event.device_id(), "Event dropped, no subscribers");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outcome of a commissioning run over several devices.

use std::collections::HashMap;

use crate::error::Error;
use crate::event::DeviceId;

/// Per-device outcome of [`Gateway::commission_all`](super::Gateway::commission_all).
#[derive(Debug, Default)]
pub struct CommissioningReport {
    outcomes: HashMap<DeviceId, Result<(), Error>>,
    aborted: Vec<DeviceId>,
}

impl CommissioningReport {
    pub(crate) fn record(&mut self, device_id: DeviceId, outcome: Result<(), Error>) {
        self.outcomes.insert(device_id, outcome);
    }

    pub(crate) fn record_aborted(&mut self, device_id: DeviceId) {
        self.aborted.push(device_id);
    }

    /// Returns the outcome for a device, if it was commissioned.
    #[must_use]
    pub fn outcome(&self, device_id: DeviceId) -> Option<&Result<(), Error>> {
        self.outcomes.get(&device_id)
    }

    /// Iterates over the devices whose commissioning completed.
    pub fn succeeded(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .map(|(id, _)| *id)
    }

    /// Iterates over the devices whose commissioning failed, with the error.
    pub fn failed(&self) -> impl Iterator<Item = (DeviceId, &Error)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(id, outcome)| outcome.as_ref().err().map(|e| (*id, e)))
    }

    /// Returns the devices whose commissioning task panicked or was
    /// cancelled.
    #[must_use]
    pub fn aborted(&self) -> &[DeviceId] {
        &self.aborted
    }

    /// Returns the number of devices covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len() + self.aborted.len()
    }

    /// Returns `true` if no device was covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if every device was commissioned.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.aborted.is_empty() && self.outcomes.values().all(Result::is_ok)
    }
}

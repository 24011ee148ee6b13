// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nous climate sensors.

use super::common;
use crate::converter::InboundConverter;
use crate::profile::{CommissionStep, DeviceProfile};
use crate::types::{ClusterId, EndpointId};

/// E5 temperature and humidity sensor.
///
/// The sensor reports on its own schedule; nothing is configured.
#[must_use]
pub fn e5() -> DeviceProfile {
    DeviceProfile::new("E5", "Nous")
        .with_description("Temperature & humidity")
        .with_inbound(InboundConverter::Numeric(common::temperature()))
        .with_inbound(InboundConverter::Numeric(common::humidity()))
        .with_inbound(InboundConverter::Numeric(common::battery()))
}

/// SZ-T04 temperature and humidity sensor with clock.
///
/// Only the basic cluster is bound so the sensor can ask for the time.
#[must_use]
pub fn sz_t04() -> DeviceProfile {
    DeviceProfile::new("SZ-T04", "Nous")
        .with_description("Temperature and humidity sensor with clock")
        .with_inbound(InboundConverter::Numeric(common::temperature()))
        .with_inbound(InboundConverter::Numeric(common::humidity()))
        .with_inbound(InboundConverter::Numeric(common::battery()))
        .with_step(CommissionStep::bind(EndpointId::MIN, [ClusterId::GEN_BASIC]))
}

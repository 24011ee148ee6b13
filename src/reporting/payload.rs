// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reporting configuration records.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::AttributeId;

/// Common report intervals, in seconds.
pub mod interval {
    /// Longest interval devices accept without disabling periodic reports.
    pub const MAX: u16 = 62000;
    /// One hour.
    pub const HOUR: u16 = 3600;
    /// Thirty minutes.
    pub const MINUTES_30: u16 = 1800;
    /// Fifteen minutes.
    pub const MINUTES_15: u16 = 900;
    /// Ten minutes.
    pub const MINUTES_10: u16 = 600;
    /// Five minutes.
    pub const MINUTES_5: u16 = 300;
    /// One minute.
    pub const MINUTE: u16 = 60;
    /// Ten seconds.
    pub const SECONDS_10: u16 = 10;
    /// Five seconds.
    pub const SECONDS_5: u16 = 5;
}

/// One reporting rule, as sent in a configure-reporting request.
///
/// `minimum_report_interval <= maximum_report_interval` is expected but not
/// enforced here: a payload built from an inverted override is sent as-is
/// unless the configurator runs with strict interval checking (see
/// [`ReportingPayload::validate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingPayload {
    /// The attribute to report.
    pub attribute: AttributeId,
    /// Minimum seconds between reports.
    pub minimum_report_interval: u16,
    /// Maximum seconds between reports.
    pub maximum_report_interval: u16,
    /// Change that triggers a report before the maximum interval elapses.
    ///
    /// `None` for discrete attributes where any change is reported.
    pub reportable_change: Option<i64>,
}

impl ReportingPayload {
    /// Checks that the minimum interval does not exceed the maximum.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvertedInterval` for an inverted range.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.minimum_report_interval > self.maximum_report_interval {
            return Err(ValueError::InvertedInterval {
                min: self.minimum_report_interval,
                max: self.maximum_report_interval,
            });
        }
        Ok(())
    }
}

/// Per-call replacement of individual reporting defaults.
///
/// Fields left as `None` keep the quantity's default.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::reporting::Override;
///
/// let only_change = Override::new().with_change(10);
/// assert_eq!(only_change.min, None);
///
/// let all = Override::new().with_min(1).with_max(65535).with_change(1);
/// assert_eq!(all.max, Some(65535));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    /// Replacement minimum interval.
    #[serde(default)]
    pub min: Option<u16>,
    /// Replacement maximum interval.
    #[serde(default)]
    pub max: Option<u16>,
    /// Replacement reportable change.
    #[serde(default)]
    pub change: Option<i64>,
}

impl Override {
    /// Creates an override that replaces nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: None,
            max: None,
            change: None,
        }
    }

    /// Replaces the minimum interval.
    #[must_use]
    pub const fn with_min(mut self, min: u16) -> Self {
        self.min = Some(min);
        self
    }

    /// Replaces the maximum interval.
    #[must_use]
    pub const fn with_max(mut self, max: u16) -> Self {
        self.max = Some(max);
        self
    }

    /// Replaces the reportable change.
    #[must_use]
    pub const fn with_change(mut self, change: i64) -> Self {
        self.change = Some(change);
        self
    }
}

/// Builds the reporting batch for one attribute.
///
/// Configure-reporting requests take a batch, so the result is a
/// single-element vector. No ordering or range validation happens here.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::reporting::{payload, Override};
/// use zigbridge_lib::types::AttributeId;
///
/// let batch = payload(
///     AttributeId::named("measuredValue"),
///     10,
///     3600,
///     Some(100),
///     Some(&Override::new().with_change(50)),
/// );
/// assert_eq!(batch.len(), 1);
/// assert_eq!(batch[0].minimum_report_interval, 10);
/// assert_eq!(batch[0].maximum_report_interval, 3600);
/// assert_eq!(batch[0].reportable_change, Some(50));
/// ```
#[must_use]
pub fn payload(
    attribute: impl Into<AttributeId>,
    min: u16,
    max: u16,
    change: Option<i64>,
    overrides: Option<&Override>,
) -> Vec<ReportingPayload> {
    let mut payload = ReportingPayload {
        attribute: attribute.into(),
        minimum_report_interval: min,
        maximum_report_interval: max,
        reportable_change: change,
    };

    if let Some(overrides) = overrides {
        if let Some(min) = overrides.min {
            payload.minimum_report_interval = min;
        }
        if let Some(max) = overrides.max {
            payload.maximum_report_interval = max;
        }
        if let Some(change) = overrides.change {
            payload.reportable_change = Some(change);
        }
    }

    vec![payload]
}

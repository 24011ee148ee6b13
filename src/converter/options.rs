// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device user options consulted by converters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User options of one device.
///
/// Options are a flat JSON object. Converters look up
/// `<property>_precision` (decimal places) and `<property>_calibration`
/// (offset added after scaling); any other key is kept for callers.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::converter::ConverterOptions;
///
/// let options: ConverterOptions =
///     serde_json::from_str(r#"{"temperature_precision": 1, "temperature_calibration": -0.5}"#)
///         .unwrap();
///
/// assert_eq!(options.precision("temperature"), Some(1));
/// assert_eq!(options.calibration("temperature"), Some(-0.5));
/// assert_eq!(options.precision("humidity"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConverterOptions(Map<String, Value>);

impl ConverterOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a raw option value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the configured precision of a property.
    ///
    /// Negative or non-integer values are ignored.
    #[must_use]
    pub fn precision(&self, property: &str) -> Option<u32> {
        self.0
            .get(&format!("{property}_precision"))
            .and_then(Value::as_u64)
            .and_then(|places| u32::try_from(places).ok())
    }

    /// Returns the configured calibration offset of a property.
    #[must_use]
    pub fn calibration(&self, property: &str) -> Option<f64> {
        self.0
            .get(&format!("{property}_calibration"))
            .and_then(Value::as_f64)
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converters for standard measurement attributes.

use crate::codec::Scale;
use crate::converter::NumericAttribute;
use crate::types::ClusterId;

/// Temperature in °C, reported in hundredths.
#[must_use]
pub const fn temperature() -> NumericAttribute {
    NumericAttribute::new(ClusterId::MS_TEMPERATURE_MEASUREMENT, "measuredValue", "temperature")
        .with_scale(Scale::Factor(100.0))
        .with_precision(2)
}

/// Relative humidity in %, reported in hundredths.
#[must_use]
pub const fn humidity() -> NumericAttribute {
    NumericAttribute::new(ClusterId::MS_RELATIVE_HUMIDITY, "measuredValue", "humidity")
        .with_scale(Scale::Factor(100.0))
        .with_precision(2)
}

/// Remaining battery in %, reported in half percent.
#[must_use]
pub const fn battery() -> NumericAttribute {
    NumericAttribute::new(ClusterId::GEN_POWER_CFG, "batteryPercentageRemaining", "battery")
        .with_scale(Scale::Factor(2.0))
        .with_precision(0)
}

/// Light level, 0 to 254.
#[must_use]
pub const fn brightness() -> NumericAttribute {
    NumericAttribute::new(ClusterId::GEN_LEVEL_CTRL, "currentLevel", "brightness")
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::types::AttributeValue;

    #[test]
    fn temperature_hundredths() {
        let value = temperature().decode(&AttributeValue::Int(2215), None, None);
        assert_eq!(value, Some(Value::from(22.15)));
    }

    #[test]
    fn battery_half_percent() {
        let value = battery().decode(&AttributeValue::Int(199), None, None);
        assert_eq!(value, Some(Value::from(100)));
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric scales between wire values and logical values.

use std::fmt;

use super::Direction;

/// A pure scale function.
///
/// Receives the value and the direction of conversion. Transforms may be
/// asymmetric: a sensor-only attribute typically leaves `ToWire` as identity.
pub type ScaleFn = fn(f64, Direction) -> f64;

/// How a numeric attribute maps to its logical value.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::codec::{Direction, Scale};
///
/// // Temperature is reported in hundredths of a degree.
/// let scale = Scale::Factor(100.0);
/// assert_eq!(scale.apply(2150.0, Direction::FromWire), 21.5);
/// assert_eq!(scale.apply(21.5, Direction::ToWire), 2150.0);
/// ```
#[derive(Clone, Copy, Default)]
pub enum Scale {
    /// Value passes through unchanged.
    #[default]
    Identity,
    /// Wire value is divided by the factor on the way in and multiplied on
    /// the way out.
    Factor(f64),
    /// Arbitrary transform.
    Function(ScaleFn),
}

impl Scale {
    /// Applies the scale in the given direction.
    #[must_use]
    pub fn apply(&self, value: f64, direction: Direction) -> f64 {
        match (self, direction) {
            (Self::Identity, _) => value,
            (Self::Factor(factor), Direction::FromWire) => value / factor,
            (Self::Factor(factor), Direction::ToWire) => value * factor,
            (Self::Function(f), direction) => f(value, direction),
        }
    }
}

impl fmt::Debug for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Factor(factor) => f.debug_tuple("Factor").field(factor).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Converts the logarithmic illuminance count to lux.
///
/// This is the standard measured-value encoding
/// `10^((value - 1) / 10000)`. `ToWire` is identity.
#[must_use]
pub fn illuminance_lux(value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::FromWire => 10f64.powf((value - 1.0) / 10000.0),
        Direction::ToWire => value,
    }
}

/// Converts the logarithmic illuminance count to lux through a three-segment
/// vendor calibration, floored at 1 lux.
///
/// Used by sensors whose raw count does not follow the standard curve. The
/// coefficients are the vendor's and must not be altered. `ToWire` is
/// identity.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::codec::{Direction, scale::calibrated_lux};
///
/// assert_eq!(calibrated_lux(1.0, Direction::FromWire), 1.0);
/// assert_eq!(calibrated_lux(42.0, Direction::ToWire), 42.0);
/// ```
#[must_use]
pub fn calibrated_lux(value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::FromWire => {
            let lux = calibrate(illuminance_lux(value, Direction::FromWire));
            if lux < 1.0 { 1.0 } else { lux }
        }
        Direction::ToWire => value,
    }
}

/// Piecewise calibration of the uncalibrated lux value `x`.
fn calibrate(x: f64) -> f64 {
    if x > 0.0 && x <= 2200.0 {
        -7.969_192 + 0.015_198_8 * x
    } else if x > 2200.0 && x <= 2500.0 {
        -1_069.189_434 + 0.495_066_3 * x
    } else if x > 2500.0 {
        78_029.216_28 - 61.735_75 * x + 0.012_235_67 * x.powi(2)
    } else {
        x
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Enumerated attribute codecs.

use std::fmt;

use crate::error::ValueError;

/// Label reported for numeric values outside a codec's domain.
pub const UNKNOWN_LABEL: &str = "unknown";

/// External switch wiring mode of in-wall switch modules.
pub static SWITCH_TYPE: EnumCodec = EnumCodec::new(&[(0, "momentary"), (1, "toggle")]);

/// Bidirectional mapping between numeric wire values and labels.
///
/// Codecs are built from a static entry table and have no mutation API, so
/// they can be shared freely as `static` items.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::codec::enumeration::SWITCH_TYPE;
///
/// assert_eq!(SWITCH_TYPE.decode(1).label(), "toggle");
/// assert_eq!(SWITCH_TYPE.encode("momentary").unwrap(), 0);
///
/// // Unmapped values decode to the "unknown" sentinel.
/// let decoded = SWITCH_TYPE.decode(5);
/// assert_eq!(decoded.label(), "unknown");
/// assert_eq!(decoded.numeric(), 5);
///
/// // Numeric strings are accepted when no label matches.
/// assert_eq!(SWITCH_TYPE.encode("1").unwrap(), 1);
/// assert!(SWITCH_TYPE.encode("sideways").is_err());
/// ```
#[derive(Debug)]
pub struct EnumCodec {
    entries: &'static [(i64, &'static str)],
}

impl EnumCodec {
    /// Creates a codec from `(numeric, label)` pairs.
    ///
    /// Numeric values and labels must each be unique, which makes the two
    /// lookup directions mutual inverses.
    #[must_use]
    pub const fn new(entries: &'static [(i64, &'static str)]) -> Self {
        Self { entries }
    }

    /// Returns the defined `(numeric, label)` pairs.
    #[must_use]
    pub const fn entries(&self) -> &'static [(i64, &'static str)] {
        self.entries
    }

    /// Returns the defined labels, in table order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, label)| *label)
    }

    /// Looks up the label for a numeric value.
    #[must_use]
    pub fn label(&self, numeric: i64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(value, _)| *value == numeric)
            .map(|(_, label)| *label)
    }

    /// Looks up the numeric value for a label.
    #[must_use]
    pub fn numeric(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(value, _)| *value)
    }

    /// Decodes a wire value. Never fails.
    #[must_use]
    pub fn decode(&self, numeric: i64) -> Decoded {
        Decoded {
            label: self.label(numeric),
            numeric,
        }
    }

    /// Encodes user input to a wire value.
    ///
    /// Labels are looked up first; otherwise the input is parsed as a
    /// base-10 integer. Surrounding whitespace and a leading `+` are not
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownEnumValue` if the input is neither a
    /// label nor an integer.
    pub fn encode(&self, input: &str) -> Result<i64, ValueError> {
        if let Some(value) = self.numeric(input) {
            return Ok(value);
        }
        if input.starts_with('+') {
            return Err(ValueError::UnknownEnumValue(input.to_string()));
        }
        input
            .parse::<i64>()
            .map_err(|_| ValueError::UnknownEnumValue(input.to_string()))
    }
}

/// Result of decoding an enumerated wire value.
///
/// Keeps the raw numeric value alongside the label so unmapped values can
/// still be diagnosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    label: Option<&'static str>,
    numeric: i64,
}

impl Decoded {
    /// Returns the label, or `"unknown"` for unmapped values.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label.unwrap_or(UNKNOWN_LABEL)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn numeric(&self) -> i64 {
        self.numeric
    }

    /// Returns `true` if the value is in the codec's domain.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.label.is_some()
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_every_entry() {
        for (numeric, label) in SWITCH_TYPE.entries() {
            let encoded = SWITCH_TYPE.encode(label).unwrap();
            assert_eq!(encoded, *numeric);
            assert_eq!(SWITCH_TYPE.decode(encoded).label(), *label);
        }
    }

    #[test]
    fn maps_are_mutual_inverses() {
        for (numeric, label) in SWITCH_TYPE.entries() {
            assert_eq!(SWITCH_TYPE.label(*numeric), Some(*label));
            assert_eq!(SWITCH_TYPE.numeric(label), Some(*numeric));
        }
    }

    #[test]
    fn unmapped_value_is_unknown() {
        let decoded = SWITCH_TYPE.decode(5);
        assert_eq!(decoded.label(), "unknown");
        assert_eq!(decoded.numeric(), 5);
        assert!(!decoded.is_known());
        assert_eq!(decoded.to_string(), "unknown (5)");
    }

    #[test]
    fn label_takes_priority_over_parse() {
        static DIGIT_LABELS: EnumCodec = EnumCodec::new(&[(7, "1")]);
        assert_eq!(DIGIT_LABELS.encode("1").unwrap(), 7);
    }

    #[test]
    fn numeric_string_fallback() {
        assert_eq!(SWITCH_TYPE.encode("1").unwrap(), 1);
        assert_eq!(SWITCH_TYPE.encode("42").unwrap(), 42);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            SWITCH_TYPE.encode("1abc"),
            Err(ValueError::UnknownEnumValue("1abc".to_string()))
        );
        assert!(SWITCH_TYPE.encode("").is_err());
    }

    #[test]
    fn padded_or_signed_digits_are_rejected() {
        for input in [" 1", "1 ", "+1", "\t0"] {
            assert_eq!(
                SWITCH_TYPE.encode(input),
                Err(ValueError::UnknownEnumValue(input.to_string())),
                "{input:?}"
            );
        }
        assert_eq!(SWITCH_TYPE.encode("-1").unwrap(), -1);
    }

    #[test]
    fn labels_in_order() {
        assert_eq!(SWITCH_TYPE.labels().collect::<Vec<_>>(), ["momentary", "toggle"]);
    }
}

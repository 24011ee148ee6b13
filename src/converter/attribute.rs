// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute descriptions shared by inbound and outbound converters.

use serde_json::Value;

use crate::codec::{Direction, EnumCodec, Scale};
use crate::endpoint::RequestOptions;
use crate::error::ValueError;
use crate::types::{AttributeId, AttributeValue, ClusterId, DataType, TypedValue};

/// An enumerated attribute exposed as a labelled property.
///
/// Inbound, the raw value is published as `<property>` (label) together
/// with `<property>_numeric` (raw value). Outbound, either a label or an
/// integer string is accepted.
#[derive(Debug, Clone)]
pub struct EnumAttribute {
    /// Cluster holding the attribute.
    pub cluster: ClusterId,
    /// The attribute.
    pub attribute: AttributeId,
    /// Property name in the normalized state.
    pub property: &'static str,
    /// Label table.
    pub codec: &'static EnumCodec,
    /// Wire type used for writes.
    pub data_type: DataType,
    /// Vendor scope of reads and writes, if the attribute is vendor-specific.
    pub manufacturer_code: Option<u16>,
}

impl EnumAttribute {
    /// Returns the name of the raw-value property.
    #[must_use]
    pub fn numeric_property(&self) -> String {
        format!("{}_numeric", self.property)
    }

    /// Returns the request options for this attribute.
    #[must_use]
    pub const fn request_options(&self) -> RequestOptions {
        RequestOptions::with_manufacturer(self.manufacturer_code)
    }

    /// Encodes a user-supplied label or integer string into a typed value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownEnumValue` if the input is neither a label
    /// nor an integer, or `ValueError::OutOfRange` if it does not fit the
    /// wire type.
    pub fn encode(&self, input: &str) -> Result<TypedValue, ValueError> {
        let numeric = self.data_type.check(self.codec.encode(input)?)?;
        Ok(TypedValue::new(numeric, self.data_type))
    }
}

/// A numeric attribute exposed as a scaled property.
///
/// # Examples
///
/// ```
/// use zigbridge_lib::codec::Scale;
/// use zigbridge_lib::converter::NumericAttribute;
/// use zigbridge_lib::types::ClusterId;
///
/// let temperature = NumericAttribute::new(
///     ClusterId::MS_TEMPERATURE_MEASUREMENT,
///     "measuredValue",
///     "temperature",
/// )
/// .with_scale(Scale::Factor(100.0));
///
/// assert_eq!(temperature.property, "temperature");
/// assert!(!temperature.is_writable());
/// ```
#[derive(Debug, Clone)]
pub struct NumericAttribute {
    /// Cluster holding the attribute.
    pub cluster: ClusterId,
    /// The attribute.
    pub attribute: AttributeId,
    /// Property name in the normalized state.
    pub property: &'static str,
    /// Conversion between raw and logical values.
    pub scale: Scale,
    /// Decimal places kept unless the user configures otherwise.
    pub precision: Option<u32>,
    /// Wire type for writes; `None` makes the property read-only.
    pub data_type: Option<DataType>,
    /// Vendor scope of reads and writes.
    pub manufacturer_code: Option<u16>,
}

impl NumericAttribute {
    /// Creates a read-only attribute with identity scale.
    #[must_use]
    pub const fn new(cluster: ClusterId, attribute: &'static str, property: &'static str) -> Self {
        Self {
            cluster,
            attribute: AttributeId::named(attribute),
            property,
            scale: Scale::Identity,
            precision: None,
            data_type: None,
            manufacturer_code: None,
        }
    }

    /// Sets the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the default precision.
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Makes the property writable with the given wire type.
    #[must_use]
    pub const fn writable(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Scopes reads and writes to a vendor.
    #[must_use]
    pub const fn with_manufacturer_code(mut self, code: u16) -> Self {
        self.manufacturer_code = Some(code);
        self
    }

    /// Returns `true` if the property can be set.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.data_type.is_some()
    }

    /// Returns the request options for this attribute.
    #[must_use]
    pub const fn request_options(&self) -> RequestOptions {
        RequestOptions::with_manufacturer(self.manufacturer_code)
    }

    /// Converts a raw value into the logical value.
    ///
    /// `calibration` is added after scaling, then the result is rounded to
    /// `precision` decimals (or the attribute's default precision).
    #[must_use]
    pub fn decode(
        &self,
        raw: &AttributeValue,
        calibration: Option<f64>,
        precision: Option<u32>,
    ) -> Option<Value> {
        let raw = raw.as_f64()?;
        let value = self.scale.apply(raw, Direction::FromWire) + calibration.unwrap_or(0.0);
        number(value, precision.or(self.precision))
    }

    /// Converts a logical value into a typed wire value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite input, and
    /// `ValueError::OutOfRange` if the scaled value does not fit the wire
    /// type. Read-only attributes have no wire type and always fail with
    /// `ValueError::InvalidType`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(&self, value: f64) -> Result<TypedValue, ValueError> {
        let Some(data_type) = self.data_type else {
            return Err(ValueError::InvalidType {
                property: self.property.to_string(),
                expected: "writable property",
                actual: "read-only".to_string(),
            });
        };
        if !value.is_finite() {
            return Err(ValueError::NotFinite(self.property.to_string()));
        }
        let raw = self.scale.apply(value, Direction::ToWire).round();
        if !raw.is_finite() {
            return Err(ValueError::NotFinite(self.property.to_string()));
        }
        let raw = data_type.check(raw as i64)?;
        Ok(TypedValue::new(raw, data_type))
    }
}

/// Rounds `value` to `precision` decimals and turns it into JSON.
///
/// Zero precision yields an integer. Non-finite values yield `None`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) fn number(value: f64, precision: Option<u32>) -> Option<Value> {
    if !value.is_finite() {
        return None;
    }
    match precision {
        Some(0) => Some(Value::from(value.round() as i64)),
        Some(places) => {
            let factor = 10f64.powi(places.min(15) as i32);
            Some(Value::from((value * factor).round() / factor))
        }
        None => Some(Value::from(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::enumeration::SWITCH_TYPE;

    fn switch_type() -> EnumAttribute {
        EnumAttribute {
            cluster: ClusterId::GEN_BASIC,
            attribute: AttributeId::Id(0x8803),
            property: "external_switch_type",
            codec: &SWITCH_TYPE,
            data_type: DataType::Uint8,
            manufacturer_code: Some(0x1224),
        }
    }

    #[test]
    fn enum_encode_label_and_integer() {
        let attr = switch_type();
        assert_eq!(attr.encode("toggle").unwrap(), TypedValue::new(1u8, DataType::Uint8));
        assert_eq!(attr.encode("1").unwrap(), TypedValue::new(1u8, DataType::Uint8));
        assert_eq!(attr.encode("7").unwrap(), TypedValue::new(7u8, DataType::Uint8));
    }

    #[test]
    fn enum_encode_rejects_out_of_wire_range() {
        assert_eq!(
            switch_type().encode("256"),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 255,
                actual: 256
            })
        );
    }

    #[test]
    fn enum_numeric_property() {
        assert_eq!(switch_type().numeric_property(), "external_switch_type_numeric");
    }

    #[test]
    fn numeric_decode_applies_scale_calibration_precision() {
        let attr = NumericAttribute::new(
            ClusterId::MS_TEMPERATURE_MEASUREMENT,
            "measuredValue",
            "temperature",
        )
        .with_scale(Scale::Factor(100.0))
        .with_precision(1);

        let value = attr.decode(&AttributeValue::Int(2156), None, None).unwrap();
        assert_eq!(value, Value::from(21.6));

        let value = attr
            .decode(&AttributeValue::Int(2156), Some(-1.0), Some(2))
            .unwrap();
        assert_eq!(value, Value::from(20.56));
    }

    #[test]
    fn numeric_decode_ignores_non_numbers() {
        let attr = NumericAttribute::new(ClusterId::MS_CO2, "measuredValue", "co2");
        assert!(attr.decode(&AttributeValue::Text("n/a".into()), None, None).is_none());
    }

    #[test]
    fn numeric_encode_scales_and_checks_range() {
        let attr = NumericAttribute::new(ClusterId::HVAC_THERMOSTAT, "occupiedHeatingSetpoint", "occupied_heating_setpoint")
            .with_scale(Scale::Factor(100.0))
            .writable(DataType::Int16);

        assert_eq!(attr.encode(21.5).unwrap(), TypedValue::new(2150i64, DataType::Int16));
        assert!(matches!(attr.encode(400.0), Err(ValueError::OutOfRange { .. })));
        assert_eq!(
            attr.encode(f64::NAN),
            Err(ValueError::NotFinite("occupied_heating_setpoint".to_string()))
        );
    }

    #[test]
    fn read_only_numeric_cannot_encode() {
        let attr = NumericAttribute::new(ClusterId::MS_CO2, "measuredValue", "co2");
        assert!(matches!(attr.encode(1.0), Err(ValueError::InvalidType { .. })));
    }

    #[test]
    fn zero_precision_yields_integer() {
        assert_eq!(number(214.6, Some(0)), Some(Value::from(215)));
        assert_eq!(number(f64::INFINITY, None), None);
    }
}

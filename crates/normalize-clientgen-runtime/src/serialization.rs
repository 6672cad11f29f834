//! Serialization contracts implemented by generated models and format writers.
//!
//! Generated serializers call one `write_*` method per property, keyed by the
//! property's serialization name, followed by a single
//! [`write_additional_data`](SerializationWriter::write_additional_data).
//! A `None` key writes the value itself rather than a member of the current
//! object.

use crate::error::RuntimeError;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A model that can write itself through a [`SerializationWriter`].
pub trait Parsable {
    fn serialize(&self, writer: &mut dyn SerializationWriter) -> Result<(), RuntimeError>;
}

/// Writes values into one serialization format.
pub trait SerializationWriter {
    fn write_string_value(&mut self, key: Option<&str>, value: &str);

    fn write_bool_value(&mut self, key: Option<&str>, value: bool);

    fn write_int_value(&mut self, key: Option<&str>, value: i32);

    /// Fails with [`RuntimeError::NonFiniteNumber`] for NaN and infinities.
    fn write_float_value(&mut self, key: Option<&str>, value: f32) -> Result<(), RuntimeError>;

    /// Fails with [`RuntimeError::NonFiniteNumber`] for NaN and infinities.
    fn write_double_value(&mut self, key: Option<&str>, value: f64) -> Result<(), RuntimeError>;

    fn write_guid_value(&mut self, key: Option<&str>, value: Uuid);

    /// Timestamps keep their offset.
    fn write_date_time_offset_value(&mut self, key: Option<&str>, value: &DateTime<FixedOffset>);

    /// Enum members are written by their wire value.
    fn write_enum_value(&mut self, key: Option<&str>, value: &str);

    fn write_collection_of_primitive_values(&mut self, key: Option<&str>, values: &[Value]);

    fn write_object_value(
        &mut self,
        key: Option<&str>,
        value: &dyn Parsable,
    ) -> Result<(), RuntimeError>;

    fn write_collection_of_object_values(
        &mut self,
        key: Option<&str>,
        values: &[&dyn Parsable],
    ) -> Result<(), RuntimeError>;

    /// Members the model did not declare, written as-is.
    fn write_additional_data(&mut self, data: &BTreeMap<String, Value>);

    /// Everything written so far, encoded.
    fn serialized_content(&mut self) -> Result<Vec<u8>, RuntimeError>;
}

/// Creates writers for the content type it accepts.
pub trait SerializationWriterFactory: Send + Sync {
    /// Content type (without parameters) this factory serves.
    fn valid_content_type(&self) -> &str;

    fn serialization_writer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn SerializationWriter>, RuntimeError>;
}

/// Check `content_type` against what `factory` serves, ignoring case and
/// parameters such as `; charset=utf-8`.
pub(crate) fn check_content_type(
    factory: &dyn SerializationWriterFactory,
    content_type: &str,
) -> Result<(), RuntimeError> {
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    if media_type.is_empty() {
        return Err(RuntimeError::EmptyContentType);
    }
    if !media_type.eq_ignore_ascii_case(factory.valid_content_type()) {
        return Err(RuntimeError::UnsupportedContentType(content_type.to_string()));
    }
    Ok(())
}

//! JSON serialization writer built on `serde_json`.

use crate::error::RuntimeError;
use crate::serialization::{
    Parsable, SerializationWriter, SerializationWriterFactory, check_content_type,
};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Accumulates one JSON document.
///
/// Keyed writes add members to the current object; an unkeyed write replaces
/// the document with that value.
#[derive(Debug, Default)]
pub struct JsonSerializationWriter {
    object: Map<String, Value>,
    root: Option<Value>,
}

impl JsonSerializationWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, key: Option<&str>, value: Value) {
        match key {
            Some(key) => {
                self.object.insert(key.to_string(), value);
            }
            None => self.root = Some(value),
        }
    }

    fn into_value(self) -> Value {
        self.root.unwrap_or(Value::Object(self.object))
    }

    fn object_to_value(value: &dyn Parsable) -> Result<Value, RuntimeError> {
        let mut child = Self::new();
        value.serialize(&mut child)?;
        Ok(child.into_value())
    }
}

impl SerializationWriter for JsonSerializationWriter {
    fn write_string_value(&mut self, key: Option<&str>, value: &str) {
        self.put(key, Value::from(value));
    }

    fn write_bool_value(&mut self, key: Option<&str>, value: bool) {
        self.put(key, Value::from(value));
    }

    fn write_int_value(&mut self, key: Option<&str>, value: i32) {
        self.put(key, Value::from(value));
    }

    fn write_float_value(&mut self, key: Option<&str>, value: f32) -> Result<(), RuntimeError> {
        self.write_double_value(key, f64::from(value))
    }

    /// JSON has no NaN or infinity, so those are rejected rather than written as `null`.
    fn write_double_value(&mut self, key: Option<&str>, value: f64) -> Result<(), RuntimeError> {
        let number = Number::from_f64(value).ok_or_else(|| RuntimeError::NonFiniteNumber {
            key: key.map(str::to_string),
            value,
        })?;
        self.put(key, Value::Number(number));
        Ok(())
    }

    fn write_guid_value(&mut self, key: Option<&str>, value: Uuid) {
        self.put(key, Value::from(value.hyphenated().to_string()));
    }

    fn write_date_time_offset_value(&mut self, key: Option<&str>, value: &DateTime<FixedOffset>) {
        self.put(key, Value::from(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)));
    }

    fn write_enum_value(&mut self, key: Option<&str>, value: &str) {
        self.put(key, Value::from(value));
    }

    fn write_collection_of_primitive_values(&mut self, key: Option<&str>, values: &[Value]) {
        self.put(key, Value::Array(values.to_vec()));
    }

    fn write_object_value(
        &mut self,
        key: Option<&str>,
        value: &dyn Parsable,
    ) -> Result<(), RuntimeError> {
        let value = Self::object_to_value(value)?;
        self.put(key, value);
        Ok(())
    }

    fn write_collection_of_object_values(
        &mut self,
        key: Option<&str>,
        values: &[&dyn Parsable],
    ) -> Result<(), RuntimeError> {
        let items = values
            .iter()
            .map(|v| Self::object_to_value(*v))
            .collect::<Result<Vec<_>, _>>()?;
        self.put(key, Value::Array(items));
        Ok(())
    }

    fn write_additional_data(&mut self, data: &BTreeMap<String, Value>) {
        for (key, value) in data {
            self.object.insert(key.clone(), value.clone());
        }
    }

    fn serialized_content(&mut self) -> Result<Vec<u8>, RuntimeError> {
        let value = std::mem::take(self).into_value();
        Ok(serde_json::to_vec(&value)?)
    }
}

/// Factory for [`JsonSerializationWriter`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializationWriterFactory;

impl SerializationWriterFactory for JsonSerializationWriterFactory {
    fn valid_content_type(&self) -> &str {
        JSON_CONTENT_TYPE
    }

    fn serialization_writer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn SerializationWriter>, RuntimeError> {
        check_content_type(self, content_type)?;
        Ok(Box::new(JsonSerializationWriter::new()))
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attachment::ImageAttachment;
use crate::data_uri;
use crate::schema::{RecordSchema, ID_FIELD};

/// Caller-supplied lookup key. Any JSON scalar; compared by value, so `1` and
/// `"1"` are different ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Value);

impl RecordId {
    /// `null`, `""`, arrays and objects do not identify anything.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(Self(value.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn from_payload(payload: &Map<String, Value>) -> Option<Self> {
        payload.get(ID_FIELD).and_then(Self::from_value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// A stored sale deed entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub images: BTreeMap<String, ImageAttachment>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self { id, fields: Map::new(), images: BTreeMap::new() }
    }

    /// Build a record from a create payload. Only schema fields are kept;
    /// `null` scalars and undecodable images are left out.
    pub fn from_create_payload(schema: &RecordSchema, payload: &Map<String, Value>, id: RecordId) -> Self {
        let mut record = Self::new(id);
        for &name in schema.scalar_fields {
            match payload.get(name) {
                Some(Value::Null) | None => {
                    if schema.fill_missing_scalars {
                        record.fields.insert(name.to_string(), Value::String(String::new()));
                    }
                }
                Some(v) => {
                    record.fields.insert(name.to_string(), v.clone());
                }
            }
        }
        for &name in schema.image_fields {
            if let Some(img) = data_uri::decode_value(payload.get(name)) {
                record.images.insert(name.to_string(), img);
            }
        }
        record
    }

    /// Overwrite exactly the fields the patch carries. A `null` clears the field.
    pub fn apply(&mut self, patch: &RecordPatch) {
        for (k, v) in &patch.fields {
            if v.is_null() {
                self.fields.remove(k);
            } else {
                self.fields.insert(k.clone(), v.clone());
            }
        }
        for (k, img) in &patch.images {
            self.images.insert(k.clone(), img.clone());
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn image(&self, name: &str) -> Option<&ImageAttachment> {
        self.images.get(name)
    }

    /// Outbound JSON: scalars as stored, images as data URIs. `null` scalars are absent.
    pub fn to_wire(&self) -> Value {
        let mut out = Map::with_capacity(1 + self.fields.len() + self.images.len());
        for (k, v) in self.fields.iter().filter(|(_, v)| !v.is_null()) {
            out.insert(k.clone(), v.clone());
        }
        for (k, img) in &self.images {
            out.insert(k.clone(), Value::String(data_uri::encode(img)));
        }
        out.insert(ID_FIELD.to_string(), self.id.as_value().clone());
        Value::Object(out)
    }
}

/// The fields an update payload overwrites. `id` is never part of it; a
/// `null` field value means "clear".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordPatch {
    pub fields: Map<String, Value>,
    pub images: BTreeMap<String, ImageAttachment>,
}

impl RecordPatch {
    pub fn from_update_payload(schema: &RecordSchema, payload: &Map<String, Value>) -> Self {
        let mut patch = Self::default();
        for &name in schema.scalar_fields {
            if let Some(v) = payload.get(name) {
                patch.fields.insert(name.to_string(), v.clone());
            }
        }
        for &name in schema.image_fields {
            if let Some(img) = data_uri::decode_value(payload.get(name)) {
                patch.images.insert(name.to_string(), img);
            }
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.images.is_empty()
    }
}

use serde::{Deserialize, Serialize};

/// A photo stored alongside a record.
///
/// Constructed only through [`ImageAttachment::new`], which refuses empty
/// bytes or an empty content type, so an attachment is always complete.
/// Deserialization goes through the same check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredAttachment")]
pub struct ImageAttachment {
    #[serde(rename = "data", with = "base64_bytes")]
    bytes: Vec<u8>,
    #[serde(rename = "contentType")]
    content_type: String,
}

impl ImageAttachment {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Option<Self> {
        let content_type = content_type.into();
        if bytes.is_empty() || content_type.trim().is_empty() {
            return None;
        }
        Some(Self { bytes, content_type })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

#[derive(Deserialize)]
struct StoredAttachment {
    #[serde(rename = "data", with = "base64_bytes")]
    bytes: Vec<u8>,
    #[serde(rename = "contentType")]
    content_type: String,
}

impl TryFrom<StoredAttachment> for ImageAttachment {
    type Error = String;

    fn try_from(raw: StoredAttachment) -> Result<Self, Self::Error> {
        Self::new(raw.bytes, raw.content_type)
            .ok_or_else(|| "image attachment needs non-empty data and contentType".to_string())
    }
}

/// Binary payloads are persisted as standard base64 strings in the JSON store.
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_attachments_are_refused() {
        assert!(ImageAttachment::new(Vec::new(), "image/png").is_none());
        assert!(ImageAttachment::new(vec![1, 2], "  ").is_none());
        assert!(ImageAttachment::new(vec![1, 2], "image/png").is_some());
    }

    #[test]
    fn persisted_form_uses_base64_data() {
        let a = ImageAttachment::new(b"hi".to_vec(), "image/gif").unwrap();
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v, serde_json::json!({"data": "aGk=", "contentType": "image/gif"}));
        let back: ImageAttachment = serde_json::from_value(v).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn incomplete_stored_attachments_fail_to_load() {
        let empty = serde_json::json!({"data": "", "contentType": ""});
        assert!(serde_json::from_value::<ImageAttachment>(empty).is_err());
        let no_type = serde_json::json!({"data": "aGk=", "contentType": " "});
        assert!(serde_json::from_value::<ImageAttachment>(no_type).is_err());
    }
}

//! `data:<mime>;base64,<payload>` codec for image attachments.
//!
//! Decoding is best effort: any input that cannot be turned into a complete
//! attachment yields `None` and the caller simply leaves the field out.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tracing::debug;

use crate::attachment::ImageAttachment;

/// Render an attachment as a data URI. Never fails.
pub fn encode(attachment: &ImageAttachment) -> String {
    format!(
        "data:{};base64,{}",
        attachment.content_type(),
        STANDARD.encode(attachment.bytes())
    )
}

/// Parse a data URI into an attachment.
///
/// The header is everything before the first comma; the MIME type is the part
/// of the header before its first `;`, after the first `:`. ASCII whitespace
/// in the payload is ignored, so line-wrapped base64 still decodes.
pub fn decode(input: Option<&str>) -> Option<ImageAttachment> {
    let input = input?;
    if input.is_empty() {
        return None;
    }
    let Some((header, payload)) = input.split_once(',') else {
        debug!(len = input.len(), "data uri without comma, ignoring");
        return None;
    };
    let media = header.split(';').next().unwrap_or_default();
    let mime = media.split(':').nth(1)?;
    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = match STANDARD.decode(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "data uri payload is not valid base64, ignoring");
            return None;
        }
    };
    ImageAttachment::new(bytes, mime)
}

/// Decode a JSON payload value; anything other than a string is no attachment.
pub fn decode_value(value: Option<&Value>) -> Option<ImageAttachment> {
    decode(value.and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImageAttachment {
        ImageAttachment::new(vec![0x89, b'P', b'N', b'G', 0, 255, 10], "image/png").unwrap()
    }

    #[test]
    fn encode_produces_data_uri() {
        let a = ImageAttachment::new(b"abc".to_vec(), "image/jpeg").unwrap();
        assert_eq!(encode(&a), "data:image/jpeg;base64,YWJj");
    }

    #[test]
    fn decode_reverses_encode() {
        for a in [
            png(),
            ImageAttachment::new(vec![0u8; 1], "image/webp").unwrap(),
            ImageAttachment::new((0..=255u8).collect(), "application/octet-stream").unwrap(),
        ] {
            assert_eq!(decode(Some(&encode(&a))), Some(a));
        }
    }

    #[test]
    fn empty_or_absent_is_no_attachment() {
        assert_eq!(decode(None), None);
        assert_eq!(decode(Some("")), None);
        assert_eq!(decode_value(None), None);
        assert_eq!(decode_value(Some(&Value::Null)), None);
    }

    #[test]
    fn malformed_input_is_no_attachment() {
        assert_eq!(decode(Some("not-a-data-uri")), None);
        assert_eq!(decode(Some("image/png;base64,YWJj")), None);
        assert_eq!(decode(Some("data:image/png;base64,@@@not base64@@@")), None);
        assert_eq!(decode(Some("data:;base64,YWJj")), None);
        assert_eq!(decode(Some("data:image/png;base64,")), None);
        assert_eq!(decode_value(Some(&serde_json::json!(42))), None);
    }

    #[test]
    fn decode_tolerates_wrapped_base64() {
        for input in [
            "data:image/png;base64,YWJj\nYWJj",
            "data:image/png;base64,YWJj\r\nYWJj\r\n",
            "data:image/png;base64, YW Jj\tYWJj ",
        ] {
            let a = decode(Some(input)).unwrap();
            assert_eq!(a.bytes(), b"abcabc");
        }
        assert_eq!(decode(Some("data:image/png;base64,YW Jj")).unwrap().bytes(), b"abc");
    }

    #[test]
    fn header_without_semicolon_still_yields_mime() {
        let a = decode(Some("data:image/gif,YWJj")).unwrap();
        assert_eq!(a.content_type(), "image/gif");
        assert_eq!(a.bytes(), b"abc");
    }

    #[test]
    fn mime_parameters_are_dropped() {
        let a = decode(Some("data:text/plain;charset=utf-8;base64,YWJj")).unwrap();
        assert_eq!(a.content_type(), "text/plain");
    }

    #[test]
    fn only_first_comma_splits() {
        // the payload keeps everything after the first comma, which is then invalid base64
        assert_eq!(decode(Some("data:image/png;base64,YWJj,YWJj")), None);
    }
}

//! Module header images carried as `data:` URIs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use curso_core::GenerateResponse;
use curso_error::{ImageError, ImageErrorKind};

/// Raw bytes of a decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// MIME type from the URI
    pub mime_type: String,
    /// Image bytes
    pub bytes: Vec<u8>,
}

/// Decode a `data:<mime>;base64,<data>` URI.
///
/// Returns `None` for anything that is not a base64 data URI.
///
/// # Examples
///
/// ```
/// use curso_content::decode_data_uri;
///
/// let image = decode_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
/// assert_eq!(image.mime_type, "image/png");
/// assert_eq!(image.bytes, b"hello");
///
/// assert!(decode_data_uri("https://example.org/a.png").is_none());
/// ```
pub fn decode_data_uri(uri: &str) -> Option<DecodedImage> {
    let rest = uri.strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(data.trim()).ok()?;
    Some(DecodedImage {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// The first usable inline image of a response, as a data URI.
pub(crate) fn first_image_uri(response: &GenerateResponse) -> Result<String, ImageError> {
    let image = response
        .images
        .first()
        .ok_or_else(|| ImageError::new(ImageErrorKind::NoImage))?;
    if image.data().trim().is_empty() {
        return Err(ImageError::new(ImageErrorKind::BadData(
            "empty inline data".to_string(),
        )));
    }
    STANDARD.decode(image.data().trim()).map_err(|e| {
        ImageError::new(ImageErrorKind::BadData(e.to_string()))
    })?;
    Ok(image.data_uri())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curso_core::InlineImage;

    #[test]
    fn test_first_image_uri() {
        let response = GenerateResponse {
            images: vec![InlineImage::new("image/jpeg", "aGVsbG8=")],
            ..GenerateResponse::default()
        };
        assert_eq!(
            first_image_uri(&response).unwrap(),
            "data:image/jpeg;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_no_image_part() {
        let err = first_image_uri(&GenerateResponse::from_text("no puedo")).unwrap_err();
        assert_eq!(err.kind, ImageErrorKind::NoImage);
    }

    #[test]
    fn test_garbage_image_data() {
        let response = GenerateResponse {
            images: vec![InlineImage::new("image/png", "%%%")],
            ..GenerateResponse::default()
        };
        assert!(matches!(
            first_image_uri(&response).unwrap_err().kind,
            ImageErrorKind::BadData(_)
        ));
    }

    #[test]
    fn test_data_uri_without_base64_marker() {
        assert!(decode_data_uri("data:text/plain,hola").is_none());
    }
}

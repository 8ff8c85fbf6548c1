//! Response normalization.
//!
//! Free-text replies are not guaranteed to be clean JSON: models wrap them in
//! markdown fences or add a sentence before and after. [`parse_structured_payload`]
//! recovers the JSON from such text. [`extract_sources`] pulls citation URLs
//! out of grounding metadata without ever failing.

use curso_core::GenerateResponse;
use curso_error::PayloadError;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, instrument, trace};

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[ \t]*(?:json|JSON)?[ \t]*\r?\n(.*?)\r?\n?[ \t]*```")
        .expect("fenced block pattern is valid")
});

/// Decode `text` as `T`, recovering JSON embedded in prose or a fenced block.
///
/// Tries, in order: the whole text; each fenced code block; the span from the
/// first `{` to the last `}`.
///
/// # Errors
///
/// Returns a `Malformed` payload error when no candidate decodes as `T`.
///
/// # Examples
///
/// ```
/// use curso_content::parse_structured_payload;
/// use serde_json::Value;
///
/// let clean: Value = parse_structured_payload(r#"{"a": 1}"#).unwrap();
/// let fenced: Value = parse_structured_payload("Aquí está:\n```json\n{\"a\": 1}\n```").unwrap();
/// let noisy: Value = parse_structured_payload("Claro: {\"a\": 1} ¡Suerte!").unwrap();
///
/// assert_eq!(clean, fenced);
/// assert_eq!(clean, noisy);
/// assert!(parse_structured_payload::<Value>("sin datos").is_err());
/// ```
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn parse_structured_payload<T: DeserializeOwned>(text: &str) -> Result<T, PayloadError> {
    let mut last_error = match serde_json::from_str::<T>(text.trim()) {
        Ok(value) => return Ok(value),
        Err(e) => e.to_string(),
    };
    debug!(error = %last_error, "Direct decode failed, attempting recovery");

    let candidates = recovery_candidates(text);
    if candidates.is_empty() {
        return Err(PayloadError::malformed("no JSON found in response"));
    }

    for candidate in candidates {
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => {
                trace!(candidate_len = candidate.len(), "Recovered JSON payload");
                return Ok(value);
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    Err(PayloadError::malformed(format!(
        "failed to decode JSON response: {}",
        last_error
    )))
}

fn recovery_candidates(text: &str) -> Vec<&str> {
    let mut candidates: Vec<&str> = FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect();

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && start < end
    {
        candidates.push(&text[start..=end]);
    }

    candidates
}

/// Citation URLs of a response, in first-seen order, duplicates removed.
///
/// Missing or oddly shaped metadata yields an empty list.
pub fn extract_sources(response: &GenerateResponse) -> Vec<String> {
    response
        .grounding_metadata
        .as_ref()
        .map(extract_sources_from_metadata)
        .unwrap_or_default()
}

/// Citation URLs found under `groundingChunks[].web.uri` of grounding metadata.
///
/// # Examples
///
/// ```
/// use curso_content::extract_sources_from_metadata;
/// use serde_json::json;
///
/// let metadata = json!({ "groundingChunks": [
///     { "web": { "uri": "https://a.example" } },
///     { "web": { "uri": "https://a.example" } },
///     { "retrievedContext": {} },
///     { "web": { "uri": "https://b.example" } }
/// ]});
/// assert_eq!(
///     extract_sources_from_metadata(&metadata),
///     vec!["https://a.example", "https://b.example"]
/// );
/// assert!(extract_sources_from_metadata(&json!("garbage")).is_empty());
/// ```
pub fn extract_sources_from_metadata(metadata: &Value) -> Vec<String> {
    let Some(chunks) = metadata.get("groundingChunks").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter_map(|chunk| chunk.get("web")?.get("uri")?.as_str())
        .filter(|uri| !uri.is_empty())
        .filter(|uri| seen.insert(*uri))
        .map(str::to_string)
        .collect()
}

/// Host part of a citation URL without a leading `www.`.
///
/// # Examples
///
/// ```
/// use curso_content::source_host;
///
/// assert_eq!(source_host("https://www.example.org/a?b=c").as_deref(), Some("example.org"));
/// assert!(source_host("not a url").is_none());
/// ```
pub fn source_host(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

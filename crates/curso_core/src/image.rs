//! Module header image sizes.

use serde::{Deserialize, Serialize};

/// Resolution tier requested from the image model.
///
/// # Examples
///
/// ```
/// use curso_core::ImageSize;
/// use std::str::FromStr;
///
/// assert_eq!(ImageSize::from_str("2K").unwrap(), ImageSize::TwoK);
/// assert_eq!(ImageSize::FourK.to_string(), "4K");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum ImageSize {
    /// About 1024 pixels on the long side
    #[default]
    #[strum(serialize = "1K")]
    #[serde(rename = "1K")]
    OneK,
    /// About 2048 pixels on the long side
    #[strum(serialize = "2K")]
    #[serde(rename = "2K")]
    TwoK,
    /// About 4096 pixels on the long side
    #[strum(serialize = "4K")]
    #[serde(rename = "4K")]
    FourK,
}

//! Pillars and lesson variations proposed during the first two wizard steps.

use curso_error::PayloadError;
use derive_getters::Getters;
use serde::Serialize;

/// A broad theme proposed for the course.
///
/// The id is positional (`pillar-<i>`) and only meaningful within the set it
/// was delivered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Pillar {
    /// Positional identifier
    id: String,
    /// Short title
    title: String,
    /// One-line description
    description: String,
}

impl Pillar {
    /// Build the pillar found at `position` in a response.
    ///
    /// # Examples
    ///
    /// ```
    /// use curso_core::Pillar;
    ///
    /// let p = Pillar::new(3, "Fundamentos", "Lo esencial").unwrap();
    /// assert_eq!(p.id(), "pillar-3");
    /// ```
    #[track_caller]
    pub fn new(
        position: usize,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, PayloadError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PayloadError::invalid(format!(
                "pillar {} has an empty title",
                position
            )));
        }
        Ok(Self {
            id: format!("pillar-{}", position),
            title,
            description: description.into(),
        })
    }
}

/// A specific lesson angle inside a pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct LessonVariation {
    /// Positional identifier
    id: String,
    /// Lesson title
    title: String,
    /// Lesson focus (practical, theoretical, case study...)
    focus: String,
}

impl LessonVariation {
    /// Build the variation found at `position` in a response.
    #[track_caller]
    pub fn new(
        position: usize,
        title: impl Into<String>,
        focus: impl Into<String>,
    ) -> Result<Self, PayloadError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PayloadError::invalid(format!(
                "variation {} has an empty title",
                position
            )));
        }
        Ok(Self {
            id: format!("var-{}", position),
            title,
            focus: focus.into(),
        })
    }
}

/// Pillars returned by one request, with the citations the service attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PillarSet {
    /// Proposed pillars in response order
    pillars: Vec<Pillar>,
    /// Deduplicated citation URLs
    sources: Vec<String>,
}

impl PillarSet {
    /// Bundle pillars with their sources.
    pub fn new(pillars: Vec<Pillar>, sources: Vec<String>) -> Self {
        Self { pillars, sources }
    }

    /// Split into parts.
    pub fn into_parts(self) -> (Vec<Pillar>, Vec<String>) {
        (self.pillars, self.sources)
    }
}

/// Variations returned by one request, with the citations the service attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct VariationSet {
    /// Proposed variations in response order
    variations: Vec<LessonVariation>,
    /// Deduplicated citation URLs
    sources: Vec<String>,
}

impl VariationSet {
    /// Bundle variations with their sources.
    pub fn new(variations: Vec<LessonVariation>, sources: Vec<String>) -> Self {
        Self {
            variations,
            sources,
        }
    }

    /// Split into parts.
    pub fn into_parts(self) -> (Vec<LessonVariation>, Vec<String>) {
        (self.variations, self.sources)
    }
}

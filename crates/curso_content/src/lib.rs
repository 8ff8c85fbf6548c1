//! Content requests for the Curso wizard.
//!
//! This crate turns wizard context (topic, pillar, variation) into prompts,
//! sends them through a [`curso_interface::GenerationDriver`], and turns the
//! replies into validated domain records.
//!
//! # Modules
//!
//! - [`normalize`]: JSON recovery from noisy text and citation extraction
//! - [`payload`]: wire records and their validation into domain types
//! - [`prompts`] / [`schema`]: request text and structured-output schemas
//! - [`policy`]: per-attempt timeout and single retry on transient failure
//! - [`requestor`]: the three wizard requests plus module images

pub mod image;
pub mod normalize;
pub mod payload;
pub mod policy;
pub mod prompts;
pub mod requestor;
pub mod schema;

pub use image::{DecodedImage, decode_data_uri};
pub use normalize::{
    extract_sources, extract_sources_from_metadata, parse_structured_payload, source_host,
};
pub use policy::RequestPolicy;
pub use requestor::{
    CHOICES_PER_REQUEST, ContentRequestor, DEFAULT_IMAGE_MODEL, PendingRequest, StepOutcome,
};

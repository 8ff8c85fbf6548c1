//! Driver trait for generative services.
//!
//! Content logic talks to the service only through [`GenerationDriver`], so
//! tests and alternative back ends can substitute their own implementation
//! without touching process-wide state.

mod driver;

pub use driver::GenerationDriver;

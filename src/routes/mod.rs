//! Route exposure comparison.
//!
//! A [`BaseRoute`] describes a regular trip; [`generate_alternatives`] derives
//! three lower-exposure variants from it and ranks them by how much exposure
//! they save.

pub mod alternatives;
pub mod samples;
pub mod types;

pub use alternatives::{generate_alternatives, optimize_routes};
pub use samples::sample_base_routes;
pub use types::{BaseRoute, RouteAlternative, RouteWithAlternatives};

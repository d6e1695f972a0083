//! User profile, commute routes, and their persistence.
//!
//! [`ProfileStore`] abstracts where the profile document lives (a JSON file
//! in production, memory in tests). [`ProfileSession`] owns the in-memory
//! profile and writes it back through the store after every mutation.

pub mod locations;
pub mod session;
pub mod store;
pub mod types;

pub use session::{LocationExposure, LocationVisits, ProfileError, ProfileSession};
pub use store::{JsonFileStore, MemoryStore, PROFILE_KEY, ProfileStore};
pub use types::{
    Coordinates, Frequency, HealthSensitivity, LocationCoordinates, NewRoute,
    NotificationPreferences, ProfileUpdate, Route, RouteUpdate, TransportMode, UserProfile,
    default_profile,
};

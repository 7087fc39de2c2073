//! Records and request payloads
//!
//! Records mirror table rows and serialize directly at the HTTP boundary.
//! Payloads are validated into repository inputs before touching the store.

pub mod validation;
pub mod name;
pub mod location;
pub mod item;

pub use validation::ValidationError;
pub use name::RecordName;
pub use location::{Location, LocationInput, NewLocation};
pub use item::{Item, ItemInput, NewItem};

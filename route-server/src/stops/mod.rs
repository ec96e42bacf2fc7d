//! Stop registry.
//!
//! Holds the fixed, ordered set of stops the route visits. Loaded once at
//! startup (from a JSON file or the built-in set) and never mutated.

mod builtin;
mod error;
mod registry;

pub use builtin::kigali_loop;
pub use error::RegistryError;
pub use registry::StopRegistry;

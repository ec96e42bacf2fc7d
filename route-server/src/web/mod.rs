//! Web layer for the route tracker.
//!
//! Read-only views of the refresh state: a JSON snapshot and an HTML page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;

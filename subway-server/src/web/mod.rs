//! Web layer for the subway arrivals server.
//!
//! Provides the JSON endpoints the station board UI polls.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;

// Composition root for the attendance engine.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate concrete adapters and wire them into use case handlers.
// - Expose the axum router and spawn the notification relay.

pub mod config;
pub mod http;
pub mod state;
pub mod workers;

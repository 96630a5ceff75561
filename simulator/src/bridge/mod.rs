pub mod model;
pub mod routes;

pub use routes::{refresh_loop, routes, serve, BridgeState};

// State management module
// Holds the gateway (or the reason it is unavailable) and the session registry

pub mod app_state;
pub mod sessions;

pub use app_state::{AppState, GatewayState, SharedState};
pub use sessions::{SessionHandle, SessionId, SessionRegistry};

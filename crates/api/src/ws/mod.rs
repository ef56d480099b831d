//! WebSocket infrastructure for live search.
//!
//! Provides connection management, heartbeat monitoring, and the upgrade
//! handler that drives a list controller per connection.

mod heartbeat;
pub mod manager;
pub mod search;

pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use search::search_ws_handler;

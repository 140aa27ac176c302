//! WebSocket Real-Time Events
//!
//! Pushes study events to open dashboard pages so they can refresh without
//! polling.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: connections, subscriptions, and the in-process event channel
//! - **Handler**: WebSocket upgrade and message processing
//! - **Messages**: client and server message formats
//!
//! ## Topics
//!
//! - `sessions.*` - every recorded study session
//! - `sessions.{user_id}` - one user's sessions
//! - `resources` - curated resource sets created or deleted
//! - `plans` - study plans created or deactivated
//! - `system` - server notices
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8080/ws');
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'subscribe', topics: ['sessions.default']}));
//! };
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'study_session_completed') setTimeout(refreshStats, 1000);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{is_valid_topic, ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ChangeKind, ClientMessage, ServerMessage, WsEvent};

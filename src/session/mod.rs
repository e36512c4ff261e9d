//! Dashboard Sessions
//!
//! Every WebSocket connection to `/ws` is one dashboard session with its own
//! history, generator, scheduler and views. Nothing mutable is shared between
//! sessions except the registry that counts them.
//!
//! ## Architecture
//!
//! - **SessionRegistry**: tracks active sessions and enforces the limit
//! - **LiveSession**: the per-connection pipeline (tick → history → views)
//! - **Handler**: WebSocket upgrade, session loop and message handling
//! - **Messages**: client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8000/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'render') {
//!     document.getElementById(msg.view).innerHTML = msg.html;
//!   }
//! };
//! ```

mod handler;
mod live;
mod messages;
mod registry;

pub use handler::websocket_handler;
pub use live::{LiveSession, ViewSubscriber};
pub use messages::{ClientMessage, ServerMessage};
pub use registry::{RegistryError, SessionGuard, SessionId, SessionInfo, SessionRegistry};

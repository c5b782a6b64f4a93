//! WebSocket Live Updates
//!
//! Pushes objective changes and chart redraws to every open browser.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Tracks active connections and fans messages out
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Protocol
//!
//! On connect the server sends `connected` followed by `redraw` with the
//! current chart frame. Each mutation through the REST API then broadcasts
//! `changed` (the id-keyed list diff) and `redraw`. Clients may send `ping`
//! or `redraw`.
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8090/api/v1/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'redraw') console.log(msg.frame.labels);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};

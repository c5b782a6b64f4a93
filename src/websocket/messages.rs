//! WebSocket Message Types
//!
//! Defines all message types exchanged between browsers and the Compass
//! server.

use serde::{Deserialize, Serialize};

use crate::chart::RenderFrame;
use crate::objective::Change;
use crate::session::Update;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
    /// Ask for the current chart frame
    Redraw,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// The objective list changed
    Changed {
        changes: Vec<Change>,
        /// Whether the new list reached storage
        saved: bool,
    },
    /// Labels and points the three charts now show
    Redraw { frame: RenderFrame },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    /// Messages announcing one session update, in send order
    ///
    /// An update that changed nothing still redraws.
    pub fn for_update(update: &Update) -> Vec<ServerMessage> {
        let mut messages = Vec::with_capacity(2);
        if !update.changes.is_empty() {
            messages.push(ServerMessage::Changed {
                changes: update.changes.clone(),
                saved: update.saved,
            });
        }
        messages.push(ServerMessage::Redraw {
            frame: update.frame.clone(),
        });
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Point;
    use crate::objective::ObjectiveId;

    #[test]
    fn test_client_message_parse() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Ping);

        let msg: ClientMessage = serde_json::from_str(r#"{"type": "redraw"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Redraw);

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "subscribe"}"#).is_err());
    }

    #[test]
    fn test_server_message_serialize() {
        let msg = ServerMessage::Changed {
            changes: vec![Change::Removed { id: ObjectiveId(3) }],
            saved: true,
        };
        let json = serde_json::to_string(&msg).unwrap();

        assert!(json.contains(r#""type":"changed""#));
        assert!(json.contains(r#""op":"removed""#));
        assert!(json.contains(r#""id":3"#));

        let json = serde_json::to_string(&ServerMessage::Pong).unwrap();
        assert_eq!(json, r#"{"type":"pong"}"#);
    }

    #[test]
    fn test_for_update() {
        let frame = RenderFrame {
            labels: vec!["A".to_string()],
            personal: vec![Point::new(0.8, 0.2)],
            collective: vec![Point::new(0.5, 0.5)],
            combined: vec![Point::new(0.375, 0.37)],
        };
        let quiet = Update {
            changes: Vec::new(),
            frame: frame.clone(),
            saved: true,
        };
        assert!(matches!(
            ServerMessage::for_update(&quiet).as_slice(),
            [ServerMessage::Redraw { .. }]
        ));

        let busy = Update {
            changes: vec![Change::Removed { id: ObjectiveId(1) }],
            frame,
            saved: false,
        };
        assert!(matches!(
            ServerMessage::for_update(&busy).as_slice(),
            [ServerMessage::Changed { saved: false, .. }, ServerMessage::Redraw { .. }]
        ));
    }
}

//! WebSocket Message Types
//!
//! Defines all message types exchanged between the dashboard page and its
//! session on the server.

use serde::{Deserialize, Serialize};

use crate::views::ViewId;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
    /// Re-send every view for the current state without taking a reading
    Refresh,
}

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Session established
    Connected {
        /// Unique session identifier
        session_id: String,
        /// Seconds between readings
        update_interval_secs: u64,
        /// Readings kept in the history
        history_size: usize,
    },
    /// New fragment for one view
    Render {
        /// Target view (also the element id on the page)
        view: ViewId,
        /// History version the fragment was rendered from
        version: u64,
        /// HTML fragment replacing the element's content
        html: String,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_client_message_deserialize_refresh() {
        let json = r#"{"type": "refresh"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Refresh));
    }

    #[test]
    fn test_client_message_unknown_type() {
        let json = r#"{"type": "subscribe", "topics": []}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serialize_render() {
        let msg = ServerMessage::Render {
            view: ViewId::CurrentValue,
            version: 3,
            html: "<div>-17.2 C</div>".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"render\""));
        assert!(json.contains("\"view\":\"current_value\""));
        assert!(json.contains("\"version\":3"));
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            session_id: "abc-123".to_string(),
            update_interval_secs: 1,
            history_size: 5,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"session_id\":\"abc-123\""));
        assert!(json.contains("\"history_size\":5"));
    }

    #[test]
    fn test_server_message_serialize_pong() {
        let json = serde_json::to_string(&ServerMessage::Pong).unwrap();
        assert_eq!(json, r#"{"type":"pong"}"#);
    }
}

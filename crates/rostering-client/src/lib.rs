//! Copilot chat panel library.
//!
//! Holds the chat transcript, mediates user input into gateway calls, and
//! provides an HTTP transport for the gateway's `/api/ai` endpoint.

pub mod driver;
pub mod error;
pub mod http;
pub mod panel;

pub use driver::{spawn_panel, PanelCommand, PanelHandle, PanelView};
pub use error::ClientError;
pub use http::{ChatTransport, HttpChatTransport, QuickActionLabels};
pub use panel::ChatPanel;

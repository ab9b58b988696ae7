//! Chat panel components: transcript, composer, slash commands, and the
//! panel manager that wires them to the streaming client.

pub mod commands;
pub mod composer;
pub mod history;
pub mod panel;

pub use panel::{ChatPanel, PanelAction};

//! Admin-panel CSS export feature for Design Palette Pro.
//!
//! The companion component generates a stylesheet and stores it alongside the
//! site settings; this crate adds an "Export CSS" button to the settings
//! screen and the request handler behind it. The handler validates the
//! per-click token, checks its preconditions in order, and either hands back
//! a downloadable attachment or a redirect carrying a failure reason. The
//! host application owns the socket — requests come in as [`AdminRequest`]
//! values and leave as [`ExportDisposition`] values.

pub mod capability;
pub mod handler;
pub mod hooks;
pub mod normalize;
pub mod notice;
pub mod reason;
pub mod request;
pub mod response;
pub mod section;
pub mod settings;
pub mod token;

pub use capability::{plugin_screen_gate, CompanionProbe, GateAction};
pub use handler::ExportHandler;
pub use hooks::Extensions;
pub use reason::Reason;
pub use request::AdminRequest;
pub use response::{CssAttachment, ExportDisposition};
pub use section::{SettingsField, SettingsSection};
pub use settings::{JsonSettingsStore, SettingsSnapshot, SettingsStore};
pub use token::TokenService;

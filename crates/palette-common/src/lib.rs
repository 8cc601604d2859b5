pub mod errors;
pub mod notice;

pub use errors::{ExportError, SettingsError, TokenError};
pub use notice::{AdminNotice, NoticeLevel};

pub type Result<T> = std::result::Result<T, ExportError>;

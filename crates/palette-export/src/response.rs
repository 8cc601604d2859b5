//! Export delivery contract.
//!
//! A handled request ends one of three ways: silently ignored, a CSS
//! attachment streamed back, or a redirect to the settings page with a
//! failure reason. The attachment headers are part of the contract and are
//! emitted verbatim, in order.

use crate::reason::Reason;

/// Fixed name of the downloaded file.
pub const EXPORT_FILENAME: &str = "gppro-custom.css";

/// Query parameter flagging an export failure on the settings page.
pub const STATUS_PARAM: &str = "export-css";

/// The only status value ever emitted.
pub const STATUS_FAILURE: &str = "failure";

/// Query parameter carrying the failure reason code.
pub const REASON_PARAM: &str = "reason";

/// Settings-screen section the failure redirect lands on.
pub const SETTINGS_SECTION: &str = "build_settings";

/// A downloadable stylesheet plus its exact response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssAttachment {
    body: Vec<u8>,
}

impl CssAttachment {
    pub fn new(css: String) -> Self {
        Self {
            body: css.into_bytes(),
        }
    }

    pub fn filename(&self) -> &'static str {
        EXPORT_FILENAME
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Response headers, in emission order. `Content-Length` is the byte
    /// length of the body exactly.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Description", "File Transfer".into()),
            ("Cache-Control", "public, must-revalidate".into()),
            ("Pragma", "hack".into()),
            ("Content-type", "text/css; charset=utf-8".into()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
            ("Content-Length", self.content_length().to_string()),
        ]
    }
}

/// Outcome of one handled admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDisposition {
    /// Not an export request (or an invalid token): produce no output.
    Ignored,
    /// Stream the attachment and terminate the request.
    Deliver(CssAttachment),
    /// Redirect back to the settings page and stop.
    Redirect(String),
}

/// Build the settings-page redirect for a failed export.
pub fn failure_redirect(settings_page_url: &str, reason: Reason) -> String {
    format!(
        "{settings_page_url}&section={SETTINGS_SECTION}&{STATUS_PARAM}={STATUS_FAILURE}&{REASON_PARAM}={}",
        reason.code()
    )
}

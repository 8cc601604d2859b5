//! The settings-screen section contributed by the export feature.
//!
//! One full-width break introducing the export, plus a button field whose
//! link is the trigger endpoint with a freshly issued token attached.

use std::sync::Arc;
use std::time::SystemTime;

use crate::hooks::Extensions;
use crate::request::{EXPORT_PARAM, EXPORT_TRIGGER, TOKEN_PARAM};
use crate::token::{TokenService, EXPORT_ACTION};

pub const SECTION_ID: &str = "section-break-css-export";
pub const SECTION_TITLE: &str = "Export Raw CSS";
pub const SECTION_TEXT: &str = "Download a stand-alone CSS file";
pub const FIELD_ID: &str = "css-export-field";
pub const FIELD_LABEL: &str = "Download CSS file";
pub const BUTTON_LABEL: &str = "Export CSS";

/// One settings-screen section: a titled break plus its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSection {
    pub id: String,
    pub title: String,
    pub text: String,
    pub fields: Vec<SettingsField>,
}

/// A button field inside a settings section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsField {
    pub id: String,
    pub label: String,
    pub button: String,
    pub link: String,
}

/// The trigger-endpoint URL with a fresh token attached.
pub fn export_link(settings_page_url: &str, tokens: &TokenService, now: SystemTime) -> String {
    let token = tokens.issue(EXPORT_ACTION, now);
    format!(
        "{settings_page_url}&{EXPORT_PARAM}={EXPORT_TRIGGER}&{TOKEN_PARAM}={}",
        urlencoding::encode(&token)
    )
}

/// Build the export section for one settings-screen render.
pub fn export_section(
    settings_page_url: &str,
    tokens: &TokenService,
    now: SystemTime,
) -> SettingsSection {
    SettingsSection {
        id: SECTION_ID.into(),
        title: SECTION_TITLE.into(),
        text: SECTION_TEXT.into(),
        fields: vec![SettingsField {
            id: FIELD_ID.into(),
            label: FIELD_LABEL.into(),
            button: BUTTON_LABEL.into(),
            link: export_link(settings_page_url, tokens, now),
        }],
    }
}

/// Register the export section into the settings-screen extension point.
pub fn register_export_section(
    extensions: &mut Extensions,
    tokens: Arc<TokenService>,
    settings_page_url: impl Into<String>,
) {
    let settings_page_url = settings_page_url.into();
    extensions.register_section_builder(Box::new(move |now| {
        export_section(&settings_page_url, &tokens, now)
    }));
}

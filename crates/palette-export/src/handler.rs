//! The export request validation and delivery flow.
//!
//! One explicitly constructed handler owns its collaborators; nothing is
//! reached through globals. Checks run in a fixed order — token, trigger,
//! then the precondition chain against a single settings snapshot — and the
//! first unmet condition decides the outcome. Failures before the chain are
//! silent; failures inside it redirect back to the settings page with a
//! reason code.

use std::sync::Arc;
use std::time::SystemTime;

use crate::capability::CompanionProbe;
use crate::hooks::Extensions;
use crate::normalize::normalize;
use crate::reason::Reason;
use crate::request::{AdminRequest, EXPORT_TRIGGER};
use crate::response::{failure_redirect, CssAttachment, ExportDisposition};
use crate::settings::SettingsStore;
use crate::token::{TokenService, EXPORT_ACTION};
use palette_common::Result;

/// Handles export requests arriving on the admin surface.
pub struct ExportHandler<S, C> {
    settings: S,
    companion: C,
    tokens: Arc<TokenService>,
    extensions: Arc<Extensions>,
    settings_page_url: String,
}

impl<S: SettingsStore, C: CompanionProbe> ExportHandler<S, C> {
    pub fn new(
        settings: S,
        companion: C,
        tokens: Arc<TokenService>,
        extensions: Arc<Extensions>,
        settings_page_url: impl Into<String>,
    ) -> Self {
        Self {
            settings,
            companion,
            tokens,
            extensions,
            settings_page_url: settings_page_url.into(),
        }
    }

    pub fn settings_page_url(&self) -> &str {
        &self.settings_page_url
    }

    /// The settings-section link for this handler's token service.
    pub fn export_link(&self, now: SystemTime) -> String {
        crate::section::export_link(&self.settings_page_url, &self.tokens, now)
    }

    /// Handle one admin request.
    ///
    /// Mutates nothing; an `Err` means the settings store itself failed,
    /// which is the host's problem rather than a reason code.
    pub fn handle(&self, req: &AdminRequest, now: SystemTime) -> Result<ExportDisposition> {
        // 1. Token before anything else. Requests without a valid token
        //    stay indistinguishable from unrelated page loads.
        let token = match req.token() {
            Some(token) => token,
            None => return Ok(ExportDisposition::Ignored),
        };
        if !self.tokens.verify(token, EXPORT_ACTION, now) {
            tracing::debug!("Export token missing its window or action");
            return Ok(ExportDisposition::Ignored);
        }

        // 2. Trigger parameter.
        if req.export_trigger() != Some(EXPORT_TRIGGER) {
            return Ok(ExportDisposition::Ignored);
        }

        // 3. One settings read covers the whole precondition chain.
        let snapshot = self.settings.snapshot()?;

        // 4. Preconditions, first failure wins.
        if !self.companion.companion_active() {
            return Ok(self.failure(Reason::NoClass));
        }
        if !snapshot.has_saved_settings() {
            return Ok(self.failure(Reason::NoData));
        }
        let css = match snapshot.css_payload() {
            Some(css) => css,
            None => return Ok(self.failure(Reason::NoFile)),
        };

        // 5. Normalize, filter, deliver.
        let body = self.extensions.apply_output_filters(normalize(css));
        let attachment = CssAttachment::new(body);
        tracing::info!(bytes = attachment.content_length(), "CSS export delivered");
        Ok(ExportDisposition::Deliver(attachment))
    }

    fn failure(&self, reason: Reason) -> ExportDisposition {
        tracing::info!(reason = reason.code(), "Export refused, redirecting back");
        ExportDisposition::Redirect(failure_redirect(&self.settings_page_url, reason))
    }
}

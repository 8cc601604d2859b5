//! Failure notices on settings-page loads.
//!
//! After a failed export the browser lands back on the settings page with
//! `export-css=failure&reason=<code>` in the query string; this surface
//! turns that into one error notice. Anything else renders nothing.

use crate::reason::message_for_code;
use crate::request::{AdminRequest, SETTINGS_PAGE};
use crate::response::{REASON_PARAM, STATUS_PARAM, STATUS_FAILURE};
use palette_common::AdminNotice;

/// The notice to render for this page load, if any.
pub fn failure_notice(req: &AdminRequest) -> Option<AdminNotice> {
    if req.page() != Some(SETTINGS_PAGE) {
        return None;
    }
    if req.param(STATUS_PARAM)? != STATUS_FAILURE {
        return None;
    }
    let code = req.param(REASON_PARAM)?;
    Some(AdminNotice::error(message_for_code(code)))
}

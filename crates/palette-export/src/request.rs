//! Immutable per-request context for the admin surface.
//!
//! Built once from the raw query string and passed into the handler; nothing
//! here reaches for ambient request state.

use std::collections::HashMap;

/// Query parameter that triggers an export.
pub const EXPORT_PARAM: &str = "gppro-css-export";

/// Sentinel value the trigger parameter must carry.
pub const EXPORT_TRIGGER: &str = "go";

/// Query parameter carrying the per-click security token.
pub const TOKEN_PARAM: &str = "_wpnonce";

/// Query parameter identifying the admin screen being loaded.
pub const PAGE_PARAM: &str = "page";

/// Page identifier of the companion settings screen.
pub const SETTINGS_PAGE: &str = "genesis-palette-pro";

/// One admin-surface request, reduced to its percent-decoded query
/// parameters. Later duplicates of a key win, matching how the host
/// surface resolves repeated parameters.
#[derive(Debug, Clone, Default)]
pub struct AdminRequest {
    params: HashMap<String, String>,
}

impl AdminRequest {
    /// An empty request (an unrelated admin page load).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string such as `page=x&gppro-css-export=go&_wpnonce=abc`.
    /// A leading `?` is tolerated; keys without a value map to the empty
    /// string; undecodable percent-sequences are kept as-is.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = HashMap::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            params.insert(decode_component(key), decode_component(value));
        }

        Self { params }
    }

    /// Look up a single query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The admin screen this request targets, if any.
    pub fn page(&self) -> Option<&str> {
        self.param(PAGE_PARAM)
    }

    /// The security token attached to this request, if any.
    pub fn token(&self) -> Option<&str> {
        self.param(TOKEN_PARAM)
    }

    /// The raw value of the export trigger parameter, if present.
    pub fn export_trigger(&self) -> Option<&str> {
        self.param(EXPORT_PARAM)
    }

    /// Builder-style parameter insertion.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Percent-decode one query component, treating `+` as a space.
fn decode_component(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_decoded,
    }
}

//! Closed taxonomy of export failure reasons.
//!
//! Each reason maps to exactly one wire code and one user-facing message.
//! Inbound codes that match nothing fall back to a generic message; the
//! handler itself only ever emits the three codes below.

/// Why an export request was turned away after passing validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The companion component is inactive or missing.
    NoClass,
    /// No configuration has been saved yet.
    NoData,
    /// No stored CSS resolves to non-empty content.
    NoFile,
}

/// Message for failure codes we do not recognize.
pub const UNKNOWN_FAILURE: &str = "There was an error with your export. Please try again later.";

impl Reason {
    /// The code carried in the failure redirect's query string.
    pub fn code(&self) -> &'static str {
        match self {
            Reason::NoClass => "noclass",
            Reason::NoData => "nodata",
            Reason::NoFile => "nofile",
        }
    }

    /// Parse an inbound wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "noclass" => Some(Reason::NoClass),
            "nodata" => Some(Reason::NoData),
            "nofile" => Some(Reason::NoFile),
            _ => None,
        }
    }

    /// The user-facing message for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            Reason::NoClass => {
                "Design Palette Pro is not active. Please activate it and try again."
            }
            Reason::NoData => {
                "No settings data has been saved. Please save your settings and try again."
            }
            Reason::NoFile => {
                "No CSS file exists to export. Please save your settings and try again."
            }
        }
    }
}

/// Total code-to-message mapping, with the unknown fallback.
pub fn message_for_code(code: &str) -> &'static str {
    Reason::from_code(code)
        .map(|reason| reason.message())
        .unwrap_or(UNKNOWN_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Reason; 3] = [Reason::NoClass, Reason::NoData, Reason::NoFile];

    #[test]
    fn codes_round_trip() {
        for reason in ALL {
            assert_eq!(Reason::from_code(reason.code()), Some(reason));
        }
    }

    #[test]
    fn every_reason_has_a_message() {
        for reason in ALL {
            assert!(!reason.message().is_empty());
        }
    }

    #[test]
    fn mapping_is_total_with_fallback() {
        assert_eq!(message_for_code("nodata"), Reason::NoData.message());
        assert_eq!(message_for_code("nofile"), Reason::NoFile.message());
        assert_eq!(message_for_code("noclass"), Reason::NoClass.message());
        assert_eq!(message_for_code("surprise"), UNKNOWN_FAILURE);
        assert_eq!(message_for_code(""), UNKNOWN_FAILURE);
        assert!(!UNKNOWN_FAILURE.is_empty());
    }

    #[test]
    fn unrecognized_codes_do_not_parse() {
        assert_eq!(Reason::from_code("NODATA"), None);
        assert_eq!(Reason::from_code("unknown"), None);
    }
}

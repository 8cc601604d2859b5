use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("settings parse error: {0}")]
    ParseError(String),

    #[error("settings read error: {0}")]
    ReadError(String),

    #[error("unsupported settings version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token key error: {0}")]
    KeyError(String),

    #[error("unsupported key file version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_error_display() {
        let err = SettingsError::FileNotFound(PathBuf::from("/tmp/missing.json"));
        assert_eq!(err.to_string(), "settings file not found: /tmp/missing.json");

        let err = SettingsError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "settings parse error: unexpected token");

        let err = SettingsError::ReadError("permission denied".into());
        assert_eq!(err.to_string(), "settings read error: permission denied");

        let err = SettingsError::UnsupportedVersion(9);
        assert_eq!(err.to_string(), "unsupported settings version: 9");
    }

    #[test]
    fn token_error_display() {
        let err = TokenError::KeyError("truncated key".into());
        assert_eq!(err.to_string(), "token key error: truncated key");

        let err = TokenError::UnsupportedVersion(2);
        assert_eq!(err.to_string(), "unsupported key file version: 2");
    }

    #[test]
    fn export_error_from_settings() {
        let settings_err = SettingsError::ParseError("bad json".into());
        let export_err: ExportError = settings_err.into();
        assert!(matches!(export_err, ExportError::Settings(_)));
        assert!(export_err.to_string().contains("bad json"));
    }

    #[test]
    fn export_error_from_token() {
        let token_err = TokenError::KeyError("bad length".into());
        let export_err: ExportError = token_err.into();
        assert!(matches!(export_err, ExportError::Token(_)));
        assert!(export_err.to_string().contains("bad length"));
    }

    #[test]
    fn export_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let export_err: ExportError = io_err.into();
        assert!(matches!(export_err, ExportError::Io(_)));
        assert!(export_err.to_string().contains("file missing"));
    }

    #[test]
    fn export_error_other() {
        let err = ExportError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}

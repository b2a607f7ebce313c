use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_TIMEOUT_SECS;

/// Default upload ceiling: 10 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Which `AuthProvider` the server runs with. Chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Firebase ID tokens verified against the Identity Toolkit.
    Firebase { api_key: String },
    /// Demo users, no verification.
    Local,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub tesseract_path: String,
    pub pdftoppm_path: String,
    pub auth_mode: AuthMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", "gemini-1.5-flash"),
            gemini_base_url: env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir().join("folio-uploads")),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse::<u64>()
                .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
            tesseract_path: env_or("TESSERACT_PATH", "tesseract"),
            pdftoppm_path: env_or("PDFTOPPM_PATH", "pdftoppm"),
            auth_mode: parse_auth_mode(
                &env_or("AUTH_MODE", "local"),
                std::env::var("FIREBASE_API_KEY").ok(),
            )?,
        })
    }
}

fn parse_auth_mode(mode: &str, firebase_api_key: Option<String>) -> Result<AuthMode> {
    match mode.trim().to_ascii_lowercase().as_str() {
        "local" => Ok(AuthMode::Local),
        "firebase" => match firebase_api_key.filter(|k| !k.trim().is_empty()) {
            Some(api_key) => Ok(AuthMode::Firebase { api_key }),
            None => bail!("AUTH_MODE=firebase requires FIREBASE_API_KEY to be set"),
        },
        other => bail!("AUTH_MODE must be 'firebase' or 'local', got '{other}'"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mode_local() {
        assert_eq!(parse_auth_mode("local", None).unwrap(), AuthMode::Local);
        assert_eq!(parse_auth_mode(" LOCAL ", None).unwrap(), AuthMode::Local);
    }

    #[test]
    fn test_auth_mode_firebase_with_key() {
        let mode = parse_auth_mode("firebase", Some("abc".to_string())).unwrap();
        assert_eq!(
            mode,
            AuthMode::Firebase {
                api_key: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_auth_mode_firebase_without_key_is_error() {
        assert!(parse_auth_mode("firebase", None).is_err());
        assert!(parse_auth_mode("firebase", Some("  ".to_string())).is_err());
    }

    #[test]
    fn test_auth_mode_unknown_is_error() {
        assert!(parse_auth_mode("ldap", None).is_err());
    }
}

// File: ./src/config.rs
// Handles loading and saving the Canvas credential file.
use crate::context::AppContext;
use crate::storage::FileStore;
use anyhow::{Error, Result};
use std::fmt;
use std::fs;
use std::path::PathBuf;

pub const KEY_BASE_URL: &str = "CANVAS_BASE_URL";
pub const KEY_ACCESS_TOKEN: &str = "CANVAS_ACCESS_TOKEN";
pub const KEY_COURSE_IDS: &str = "CANVAS_COURSE_IDS";

pub const DEFAULT_BASE_URL: &str = "https://canvas.instructure.com";

/// Credentials and the list of tracked courses.
///
/// The value is built once (by the bootstrapper or by loading the file) and
/// then only read. Every network call receives it explicitly.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub base_url: String,
    pub access_token: String,
    pub course_ids: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &if self.access_token.is_empty() {
                    "<empty>"
                } else {
                    "<redacted>"
                },
            )
            .field("course_ids", &self.course_ids)
            .finish()
    }
}

/// Strips surrounding whitespace and any trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Splits one `KEY=VALUE` line. Blank lines, comments and lines without `=`
/// yield `None`.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), unquote(value.trim())))
}

fn split_course_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn new(base_url: &str, access_token: &str, course_ids: Vec<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            access_token: access_token.trim().to_string(),
            course_ids,
        }
    }

    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Parses the line-oriented credential format. Unknown keys are ignored
    /// and missing keys are left empty.
    pub fn parse(contents: &str) -> Self {
        let mut config = Config::default();
        for (key, value) in contents.lines().filter_map(parse_line) {
            match key {
                KEY_BASE_URL => config.base_url = normalize_base_url(value),
                KEY_ACCESS_TOKEN => config.access_token = value.to_string(),
                KEY_COURSE_IDS => config.course_ids = split_course_ids(value),
                _ => {}
            }
        }
        config
    }

    pub fn to_env_string(&self) -> String {
        format!(
            "{}={}\n{}={}\n{}={}\n",
            KEY_BASE_URL,
            self.base_url,
            KEY_ACCESS_TOKEN,
            self.access_token,
            KEY_COURSE_IDS,
            self.course_ids.join(",")
        )
    }

    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if the file is missing or unreadable.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        Ok(Self::parse(&contents))
    }

    /// Detects whether an error from [`Config::load`] means the file was
    /// simply absent, as opposed to unreadable.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// True when the credential file exists and carries a non-empty token.
    ///
    /// The token is not checked against the server.
    pub fn token_exists(ctx: &dyn AppContext) -> bool {
        match Self::load(ctx) {
            Ok(cfg) => cfg.has_token(),
            Err(e) => {
                if !Self::is_missing_config_error(&e) {
                    log::warn!("Could not inspect config file: {:#}", e);
                }
                false
            }
        }
    }

    /// Overwrites the credential file. Returns the path written.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        let path = ctx.get_config_file_path()?;
        FileStore::with_lock(&path, || FileStore::atomic_write(&path, self.to_env_string()))?;
        log::info!(
            "Wrote {} with {} course id(s)",
            path.display(),
            self.course_ids.len()
        );
        Ok(path)
    }

    /// Get the path string using an explicit context.
    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}

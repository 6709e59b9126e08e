// File: ./src/bootstrap.rs
//! One-time creation of the credential file from a base URL and a token.
use crate::client::CanvasClient;
use crate::config::{Config, normalize_base_url};
use crate::context::AppContext;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// What the user typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub access_token: String,
}

impl Credentials {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            access_token: access_token.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A token was already configured; nothing was asked or touched.
    Skipped,
    Written { config: Config, path: PathBuf },
    /// The credential source gave up before a file was written.
    Cancelled,
}

/// Creates the credential file unless one with a non-empty token exists.
///
/// The existing-token check runs first; `ask` is only called once it
/// passes, so a configured install never prompts nor reaches the network.
/// `ask` receives the error of the previous attempt (if any) and returns
/// `None` to stop trying.
pub async fn bootstrap<F>(ctx: &dyn AppContext, mut ask: F) -> Result<BootstrapOutcome>
where
    F: FnMut(Option<&anyhow::Error>) -> Result<Option<Credentials>>,
{
    if Config::token_exists(ctx) {
        log::info!("Access token already configured, skipping bootstrap");
        return Ok(BootstrapOutcome::Skipped);
    }

    let mut last_error = None;
    loop {
        let Some(creds) = ask(last_error.as_ref())? else {
            log::info!("Bootstrap cancelled");
            return Ok(BootstrapOutcome::Cancelled);
        };
        match generate(ctx, &creds.base_url, &creds.access_token).await {
            Ok((config, path)) => return Ok(BootstrapOutcome::Written { config, path }),
            Err(e) => {
                log::warn!("Bootstrap attempt failed: {:#}", e);
                last_error = Some(e);
            }
        }
    }
}

/// Fetches the favorited courses and overwrites the credential file.
///
/// Nothing is written unless the favorites request succeeds. Empty input is
/// rejected before any request is made.
pub async fn generate(
    ctx: &dyn AppContext,
    base_url: &str,
    access_token: &str,
) -> Result<(Config, PathBuf)> {
    let base_url = normalize_base_url(base_url);
    let access_token = access_token.trim();
    if base_url.is_empty() || access_token.is_empty() {
        bail!("Both the Canvas Base URL and Access Token are required.");
    }

    let client = CanvasClient::new(&base_url, access_token)?;
    let course_ids = client
        .get_favorite_course_ids()
        .await
        .context("Failed to fetch favorited courses")?;
    log::info!("Found {} favorited course(s)", course_ids.len());

    let config = Config::new(&base_url, access_token, course_ids);
    let path = config
        .save(ctx)
        .context("An error occurred while writing the credential file")?;
    Ok((config, path))
}

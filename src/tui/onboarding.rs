// Interactive credential setup on the plain terminal (before raw mode).
use crate::bootstrap::{self, BootstrapOutcome, Credentials};
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::context::AppContext;
use anyhow::Result;
use rpassword::prompt_password;
use std::io::{self, Write};

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Credential source for [`bootstrap::bootstrap`]: reports the previous
/// failure, offers a retry, then asks for the base URL and the token.
pub fn prompt_credentials(previous: Option<&anyhow::Error>) -> Result<Option<Credentials>> {
    if let Some(e) = previous {
        eprintln!("Error: {:#}", e);
        let retry = read_line("Retry? [Y/n]: ")?;
        if retry.eq_ignore_ascii_case("n") {
            return Ok(None);
        }
    }

    println!("\n--- Canvas Connection Setup ---");
    println!("Create an access token in Canvas under Account > Settings.");
    let mut base_url = read_line(&format!("Canvas Base URL [{}]: ", DEFAULT_BASE_URL))?;
    if base_url.is_empty() {
        base_url = DEFAULT_BASE_URL.to_string();
    }
    let token = prompt_password("Access Token: ")?;

    println!("\nFetching favorited courses...");
    Ok(Some(Credentials::new(&base_url, &token)))
}

/// Runs the bootstrap with `ask` as the credential source and reports the
/// outcome. Returns the configuration to use, or `None` when the user gave up.
pub async fn setup_with<F>(ctx: &dyn AppContext, ask: F) -> Result<Option<Config>>
where
    F: FnMut(Option<&anyhow::Error>) -> Result<Option<Credentials>>,
{
    match bootstrap::bootstrap(ctx, ask).await? {
        BootstrapOutcome::Skipped => {
            println!(
                "A Canvas access token was detected in {}. Skipping setup.",
                Config::get_path_string(ctx)?
            );
            Ok(Some(Config::load(ctx)?))
        }
        BootstrapOutcome::Written { config, path } => {
            println!(
                "Success! Credential file created with {} course ID(s).",
                config.course_ids.len()
            );
            println!("Configuration saved to: {}", path.display());
            Ok(Some(config))
        }
        BootstrapOutcome::Cancelled => {
            println!("Setup cancelled.");
            Ok(None)
        }
    }
}

/// The `setup` command and the TUI's first run.
pub async fn run_setup(ctx: &dyn AppContext) -> Result<Option<Config>> {
    setup_with(ctx, prompt_credentials).await
}

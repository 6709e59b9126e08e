use anyhow::{Context, Result};
use canvas_desk::cli::{self, Command};
use canvas_desk::config::Config;
use canvas_desk::context::{SharedContext, StandardContext};
use canvas_desk::model::Category;
use canvas_desk::{dashboard, system, tui};
use std::sync::Arc;
use strum::IntoEnumIterator;

#[tokio::main]
async fn main() -> Result<()> {
    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}\n", e);
            cli::print_help("canvas-desk");
            std::process::exit(2);
        }
    };

    if args.command == Command::Help {
        cli::print_help("canvas-desk");
        return Ok(());
    }

    let ctx: SharedContext = Arc::new(StandardContext::new(args.root));
    system::init_logging(ctx.as_ref());
    system::install_panic_hook();

    match args.command {
        Command::Setup => {
            if tui::onboarding::run_setup(ctx.as_ref()).await?.is_none() {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Print => {
            let config = Config::load(ctx.as_ref())
                .context("Could not load the credential file; run 'canvas-desk setup' first")?;
            if !config.has_token() {
                anyhow::bail!("No access token configured. Run 'canvas-desk setup' first.");
            }
            let board = dashboard::refresh_from_config(&config).await?;
            for category in Category::iter() {
                print!("{}", board.render_text(category));
                println!();
            }
            println!("{}", board.updated_label());
            Ok(())
        }
        Command::Tui | Command::Help => tui::run(ctx).await,
    }
}

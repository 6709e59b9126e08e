// Companion binary: creates the credential file and exits.
use anyhow::Result;
use canvas_desk::cli::{self, Command};
use canvas_desk::context::StandardContext;
use canvas_desk::{system, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}\n", e);
            cli::print_help("canvas-setup");
            std::process::exit(2);
        }
    };
    if args.command == Command::Help {
        cli::print_help("canvas-setup");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root);
    system::init_logging(&ctx);

    if tui::onboarding::run_setup(&ctx).await?.is_none() {
        std::process::exit(1);
    }
    Ok(())
}

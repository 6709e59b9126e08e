// File: ./src/cli.rs
//! Shared command-line handling for the binaries.
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive two-tab view (default).
    Tui,
    /// Create the credential file, unless a token already exists.
    Setup,
    /// One refresh, printed as text.
    Print,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
}

/// Parses `args` (without the program name). The first bare word selects
/// the command; unknown flags are ignored.
pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut command = None;
    let mut root = None;
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => command = Some(Command::Help),
            "--root" | "-r" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                root = Some(PathBuf::from(value));
            }
            "setup" if command.is_none() => command = Some(Command::Setup),
            "print" if command.is_none() => command = Some(Command::Print),
            other if !other.starts_with('-') && command.is_none() => {
                return Err(format!("Unknown command '{}'", other));
            }
            _ => { /* Ignore unknown flags */ }
        }
    }

    Ok(CliArgs {
        command: command.unwrap_or(Command::Tui),
        root,
    })
}

pub fn print_help(binary_name: &str) {
    let is_setup = binary_name.contains("setup");

    println!(
        "canvas-desk v{} - Canvas LMS announcements and assignments in your terminal",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    if is_setup {
        println!("    {} [--root <path>]", binary_name);
    } else {
        println!("    {} [--root <path>]          Start interactive TUI", binary_name);
        println!("    {} setup [--root <path>]    Create the credential file", binary_name);
        println!("    {} print [--root <path>]    Print both lists once and exit", binary_name);
    }
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and logs.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("SETUP:");
    println!("    Asks for your Canvas base URL and an access token, then stores them");
    println!("    together with the IDs of your favorited courses. Nothing happens if a");
    println!("    token is already configured; delete the credential file to start over.");
    println!();
    if !is_setup {
        println!("KEYBINDINGS:");
        println!("    Tab/1/2   Switch between Announcements and Assignments");
        println!("    j/k       Move down/up");
        println!("    r         Refresh everything");
        println!("    q         Quit");
        println!();
    }
    println!("Set CANVAS_DESK_DEBUG=1 to log every request.");
}

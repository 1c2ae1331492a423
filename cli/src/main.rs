use cardcalc_cli::CliContext;
use cardcalc_cli::commands;
use cardcalc_cli::logging;
use cardcalc_cli::readline;
use clap::{Parser, Subcommand};
use std::io::Write;

fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let mut ctx = CliContext::new();

    // One-shot mode when arguments are given
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return run(args, &mut ctx).map(|_| ());
    }

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Astrologian card play analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a fight dump (JSON) fetched from the log service
    Load {
        #[arg(short, long)]
        path: String,
    },
    /// List the fights of the loaded report
    Fights,
    /// Analyze the loaded fight
    Analyze {
        /// Load this dump first
        #[arg(short, long)]
        path: Option<String>,
        /// Report URL to check against the loaded dump
        #[arg(short, long)]
        url: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one draw window of the last analysis
    Window {
        #[arg(short, long)]
        index: usize,
    },
    /// Show the analysis configuration
    Config {
        #[arg(long)]
        save: bool,
    },
    Exit,
}

fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let args = shlex::split(line).ok_or("error: Invalid quoting")?;
    run(args, ctx)
}

fn run(mut args: Vec<String>, ctx: &mut CliContext) -> Result<bool, String> {
    args.insert(0, "cardcalc".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Load { path }) => commands::load(path, true, ctx)?,
        Some(Commands::Fights) => commands::list_fights(ctx)?,
        Some(Commands::Analyze { path, url, json }) => {
            if let Some(path) = path {
                commands::load(path, !*json, ctx)?;
            }
            commands::analyze(url.as_deref(), *json, ctx)?
        }
        Some(Commands::Window { index }) => commands::show_window(*index, ctx)?,
        Some(Commands::Config { save }) => commands::show_config(*save, ctx)?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

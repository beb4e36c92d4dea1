mod cli;
mod commands;
mod logging;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, ColorMode, Commands};
use output::{OutputMode, Reporter};

fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    };

    match cli.color {
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Auto => {}
    }

    let mut reporter = Reporter::new(mode);
    let config = cli.config.as_deref();

    let success = match cli.command {
        Commands::Install {
            hook_types,
            overwrite,
        } => commands::install::run_install(&hook_types, overwrite, &mut reporter),
        Commands::Uninstall { hook_types } => {
            commands::install::run_uninstall(&hook_types, &mut reporter)
        }
        Commands::Run {
            hook,
            hook_dir,
            args,
        } => commands::run::run_hook_command(
            hook,
            hook_dir.as_deref(),
            &args,
            config,
            &mut reporter,
        ),
        Commands::Scope { hook, args } => commands::scope::run_scope(hook, &args, &mut reporter),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "hookscope", &mut std::io::stdout());
            true
        }
    };

    reporter.finish();

    if !success {
        std::process::exit(1);
    }
}

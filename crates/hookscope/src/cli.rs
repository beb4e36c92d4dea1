use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use hookscope_core::HookType;

#[derive(Parser, Debug)]
#[command(
    name = "hookscope",
    version,
    about = "Git hook manager that checks exactly what changed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Color mode
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Path to .hookscope.json (overrides auto-discovery)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install hook wrapper scripts into the repository
    Install {
        /// Hook types to install (default: pre-commit)
        #[arg(short = 't', long = "hook-type")]
        hook_types: Vec<HookType>,

        /// Replace existing hooks instead of keeping them as <hook>.legacy
        #[arg(long)]
        overwrite: bool,
    },

    /// Remove hook wrapper scripts, restoring any legacy hooks
    Uninstall {
        /// Hook types to remove (default: every known hook)
        #[arg(short = 't', long = "hook-type")]
        hook_types: Vec<HookType>,
    },

    /// Run checks for a hook (called by the installed wrappers)
    Run {
        /// Hook being run, e.g. pre-push
        hook: HookType,

        /// Hooks directory the wrapper lives in; enables legacy hooks
        #[arg(long)]
        hook_dir: Option<PathBuf>,

        /// Arguments git passed to the hook, after `--`
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Print what a hook would check, without running any check
    Scope {
        /// Hook to resolve, e.g. pre-push
        hook: HookType,

        /// Arguments git would pass to the hook, after `--`
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

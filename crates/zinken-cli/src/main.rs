//! CLI frontend for the Zinken dice toolkit.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use zinken_sheet::{Advantage, CheckKind};

#[derive(Parser)]
#[command(
    name = "zinken",
    about = "Zinken — dice rolls that land where you want them",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a formula honestly
    Roll {
        /// Dice formula, e.g. "1d20 + 5" or "2d20kh + @prof"
        formula: String,

        /// Variable bindings as name=value pairs
        #[arg(short, long = "bind", value_name = "NAME=VALUE")]
        bindings: Vec<String>,

        /// RNG seed for deterministic rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Re-roll a formula until it lands on a target total
    Seek {
        /// Dice formula, e.g. "1d20 + 5" or "2d20kh + @prof"
        formula: String,

        /// Desired total; omit to show the best possible roll
        #[arg(short, long)]
        target: Option<i64>,

        /// Variable bindings as name=value pairs
        #[arg(short, long = "bind", value_name = "NAME=VALUE")]
        bindings: Vec<String>,

        /// Retry cap before settling for an honest roll
        #[arg(long, default_value_t = zinken_dice::DEFAULT_MAX_ATTEMPTS)]
        max_attempts: u32,

        /// RNG seed for deterministic rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Roll a check composed from a character sheet
    Check {
        /// Path to a character sheet JSON file
        sheet: PathBuf,

        /// Which workflow the check belongs to
        #[arg(value_enum)]
        kind: KindArg,

        /// Ability, skill, or attack name on the sheet
        name: String,

        /// Roll two d20s and keep the highest
        #[arg(long, conflicts_with = "disadvantage")]
        advantage: bool,

        /// Roll two d20s and keep the lowest
        #[arg(long)]
        disadvantage: bool,

        /// Situational modifier added to the roll
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        modifier: i64,

        /// Desired total; omit for an honest roll
        #[arg(short, long)]
        target: Option<i64>,

        /// RNG seed for deterministic rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show the exact outcome distribution of a formula
    Odds {
        /// Dice formula, e.g. "1d20 + 5" or "2d20kh + @prof"
        formula: String,

        /// Highlight a total and show seek statistics for it
        #[arg(short, long)]
        target: Option<i64>,

        /// Variable bindings as name=value pairs
        #[arg(short, long = "bind", value_name = "NAME=VALUE")]
        bindings: Vec<String>,
    },
}

/// Check kind as a command-line value.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Raw ability check.
    Ability,
    /// Saving throw.
    Save,
    /// Skill check.
    Skill,
    /// Attack roll.
    Attack,
}

impl From<KindArg> for CheckKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Ability => CheckKind::Ability,
            KindArg::Save => CheckKind::Save,
            KindArg::Skill => CheckKind::Skill,
            KindArg::Attack => CheckKind::Attack,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            formula,
            bindings,
            seed,
        } => commands::roll::run(&formula, &bindings, seed),
        Commands::Seek {
            formula,
            target,
            bindings,
            max_attempts,
            seed,
        } => commands::seek::run(&formula, target, &bindings, max_attempts, seed),
        Commands::Check {
            sheet,
            kind,
            name,
            advantage,
            disadvantage,
            modifier,
            target,
            seed,
        } => {
            let advantage = if advantage {
                Advantage::Advantage
            } else if disadvantage {
                Advantage::Disadvantage
            } else {
                Advantage::None
            };
            commands::check::run(&sheet, kind.into(), &name, advantage, modifier, target, seed)
        }
        Commands::Odds {
            formula,
            target,
            bindings,
        } => commands::odds::run(&formula, target, &bindings),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

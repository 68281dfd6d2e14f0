use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{BedCommands, LaneCommands, PlantingCommands, RepairArgs, SequenceCommands};

/// Succession planning for market gardens
///
/// Furrow reads a crop plan snapshot, places plantings on beds, stacks each
/// bed's timeline, flags overlapping plantings and keeps succession sequences
/// evenly spaced. Edits are written back to the snapshot file.
#[derive(Parser)]
#[command(version, about, name = "furrow")]
pub struct Args {
    /// Path to the plan snapshot file. Defaults to
    /// $XDG_DATA_HOME/furrow/plan.json
    #[arg(long, global = true)]
    pub plan_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Furrow CLI
///
/// Running `furrow` without a command is the same as `furrow check`.
#[derive(Subcommand)]
pub enum Commands {
    /// Check the plan for overlaps, incomplete spans and broken sequences
    #[command(alias = "c")]
    Check,
    /// Resolve spans and place plantings on beds
    #[command(alias = "b")]
    Bed {
        #[command(subcommand)]
        command: BedCommands,
    },
    /// Inspect bed timelines
    #[command(alias = "l")]
    Lane {
        #[command(subcommand)]
        command: LaneCommands,
    },
    /// Edit individual plantings
    #[command(alias = "p")]
    Planting {
        #[command(subcommand)]
        command: PlantingCommands,
    },
    /// Manage succession sequences
    #[command(alias = "s")]
    Sequence {
        #[command(subcommand)]
        command: SequenceCommands,
    },
    /// Repair sequences with broken slots (dry run unless --apply)
    Repair(RepairArgs),
}

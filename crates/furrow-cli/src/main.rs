//! Furrow CLI Application
//!
//! Command-line interface for the furrow succession planner.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use furrow_core::PlannerBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        plan_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_plan_path(plan_file)
        .build()
        .await
        .context("Failed to initialize planner")?;
    info!("Furrow started with {}", planner.plan_path().display());

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color));
    match command {
        Some(Check) | None => cli.check().await,
        Some(Bed { command }) => cli.handle_bed_command(command).await,
        Some(Lane { command }) => cli.handle_lane_command(command).await,
        Some(Planting { command }) => cli.handle_planting_command(command).await,
        Some(Sequence { command }) => cli.handle_sequence_command(command).await,
        Some(Repair(args)) => cli.repair(args.into()).await,
    }
}

//! Command definitions and handlers
//!
//! Arguments are clap structs converted into `furrow_core::params` types
//! with `From` implementations, so the core parameter types stay free of
//! clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use furrow_core::{
    display::{EditResult, OperationStatus},
    params::{
        AddToSequence, AssignBed, CreateSequence, DeleteMode, DeleteSequence, MoveAnchor,
        MovePlanting, ReorderSlots, Repair, SetFeetNeeded, SlotAssignment, SpanQuery,
        UpdateOffset,
    },
    BedAssignment, Planner,
};
use jiff::civil::Date;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Bed and lane commands
// ============================================================================

/// Resolve which beds a placement would occupy
#[derive(Args)]
pub struct SpanArgs {
    /// Starting bed, e.g. J2
    pub bed: String,
    /// Footage to place
    pub feet: u32,
}

impl From<SpanArgs> for SpanQuery {
    fn from(val: SpanArgs) -> Self {
        SpanQuery {
            bed: val.bed,
            feet_needed: val.feet,
        }
    }
}

/// Place a planting starting at a bed
#[derive(Args)]
pub struct AssignArgs {
    /// ID of the planting to place
    pub planting_id: String,
    /// Starting bed
    pub bed: String,
    /// Accept a placement that runs out of beds in the row
    #[arg(long)]
    pub allow_partial: bool,
}

impl From<AssignArgs> for AssignBed {
    fn from(val: AssignArgs) -> Self {
        AssignBed {
            planting_id: val.planting_id,
            bed: val.bed,
            allow_partial: val.allow_partial,
        }
    }
}

#[derive(Subcommand)]
pub enum BedCommands {
    /// Show the beds a placement would occupy
    Span(SpanArgs),
    /// Place a planting on a bed
    #[command(alias = "a")]
    Assign(AssignArgs),
}

#[derive(Subcommand)]
pub enum LaneCommands {
    /// Show one bed's timeline rows
    #[command(alias = "s")]
    Show {
        /// Bed name
        bed: String,
    },
    /// List every overlapping pair of plantings
    #[command(alias = "o")]
    Overlaps,
}

// ============================================================================
// Planting commands
// ============================================================================

/// Move a planting to a new field start date
///
/// Sequence anchors move their whole sequence.
#[derive(Args)]
pub struct MoveArgs {
    pub planting_id: String,
    /// New field start date (YYYY-MM-DD)
    pub date: Date,
}

impl From<MoveArgs> for MovePlanting {
    fn from(val: MoveArgs) -> Self {
        MovePlanting {
            planting_id: val.planting_id,
            field_start_date: val.date,
        }
    }
}

/// Change how many feet a planting needs
#[derive(Args)]
pub struct FeetArgs {
    pub planting_id: String,
    pub feet: u32,
}

impl From<FeetArgs> for SetFeetNeeded {
    fn from(val: FeetArgs) -> Self {
        SetFeetNeeded {
            planting_id: val.planting_id,
            feet_needed: val.feet,
        }
    }
}

#[derive(Subcommand)]
pub enum PlantingCommands {
    /// Show a planting
    #[command(alias = "s")]
    Show {
        planting_id: String,
    },
    /// Move a planting to a new date
    #[command(alias = "m")]
    Move(MoveArgs),
    /// Change a planting's footage requirement
    #[command(alias = "f")]
    Feet(FeetArgs),
}

// ============================================================================
// Sequence commands
// ============================================================================

/// Turn a planting into the first of a succession
#[derive(Args)]
pub struct CreateSequenceArgs {
    /// Planting that becomes slot 0
    pub planting_id: String,
    /// Total number of plantings, including the first
    #[arg(short, long)]
    pub count: u32,
    /// Days between successions
    #[arg(short, long)]
    pub offset: u32,
    /// Leave the new plantings without a bed
    #[arg(long)]
    pub unassigned: bool,
    /// Display name for the sequence
    #[arg(short, long)]
    pub name: Option<String>,
}

impl From<CreateSequenceArgs> for CreateSequence {
    fn from(val: CreateSequenceArgs) -> Self {
        CreateSequence {
            planting_id: val.planting_id,
            count: val.count,
            offset_days: val.offset,
            bed_assignment: if val.unassigned {
                BedAssignment::Unassigned
            } else {
                BedAssignment::Same
            },
            name: val.name,
        }
    }
}

/// Change the days between successions
#[derive(Args)]
pub struct OffsetArgs {
    pub sequence_id: String,
    pub offset: u32,
}

impl From<OffsetArgs> for UpdateOffset {
    fn from(val: OffsetArgs) -> Self {
        UpdateOffset {
            sequence_id: val.sequence_id,
            offset_days: val.offset,
        }
    }
}

/// Move the first succession; unlocked followers move with it
#[derive(Args)]
pub struct AnchorArgs {
    pub sequence_id: String,
    /// New anchor date (YYYY-MM-DD)
    pub date: Date,
}

impl From<AnchorArgs> for MoveAnchor {
    fn from(val: AnchorArgs) -> Self {
        MoveAnchor {
            sequence_id: val.sequence_id,
            anchor_date: val.date,
        }
    }
}

/// Reorder a sequence
///
/// List every member once, in the new order; the first becomes slot 0.
#[derive(Args)]
pub struct ReorderArgs {
    pub sequence_id: String,
    #[arg(required = true)]
    pub planting_ids: Vec<String>,
}

impl From<ReorderArgs> for ReorderSlots {
    fn from(val: ReorderArgs) -> Self {
        ReorderSlots {
            sequence_id: val.sequence_id,
            assignments: (0u32..)
                .zip(val.planting_ids)
                .map(|(slot, planting_id)| SlotAssignment { planting_id, slot })
                .collect(),
        }
    }
}

/// Add an existing planting after the last succession
#[derive(Args)]
pub struct AddArgs {
    pub sequence_id: String,
    pub planting_id: String,
}

impl From<AddArgs> for AddToSequence {
    fn from(val: AddArgs) -> Self {
        AddToSequence {
            sequence_id: val.sequence_id,
            planting_id: val.planting_id,
        }
    }
}

/// Delete a sequence
#[derive(Args)]
pub struct DeleteArgs {
    pub sequence_id: String,
    /// Delete the member plantings too instead of keeping them standalone
    #[arg(long)]
    pub delete_plantings: bool,
}

impl From<DeleteArgs> for DeleteSequence {
    fn from(val: DeleteArgs) -> Self {
        DeleteSequence {
            sequence_id: val.sequence_id,
            mode: if val.delete_plantings {
                DeleteMode::DeletePlantings
            } else {
                DeleteMode::Unlink
            },
        }
    }
}

#[derive(Subcommand)]
pub enum SequenceCommands {
    /// Show one sequence, or all of them
    #[command(aliases = ["s", "ls"])]
    Show {
        sequence_id: Option<String>,
    },
    /// Create a sequence from a planting
    #[command(alias = "c")]
    Create(CreateSequenceArgs),
    /// Change the offset between successions
    #[command(alias = "o")]
    Offset(OffsetArgs),
    /// Move the anchor date
    #[command(alias = "m")]
    Move(AnchorArgs),
    /// Assign new slots
    Reorder(ReorderArgs),
    /// Remove a planting from its sequence
    Unlink {
        planting_id: String,
    },
    /// Append a new succession
    AddSlot {
        sequence_id: String,
    },
    /// Add an existing planting to a sequence
    Add(AddArgs),
    /// Delete a sequence
    #[command(alias = "rm")]
    Delete(DeleteArgs),
}

// ============================================================================
// Repair
// ============================================================================

#[derive(Args)]
pub struct RepairArgs {
    /// Only repair this sequence
    #[arg(long = "sequence")]
    pub sequence_id: Option<String>,
    /// Write the repair instead of only showing it
    #[arg(long)]
    pub apply: bool,
}

impl From<RepairArgs> for Repair {
    fn from(val: RepairArgs) -> Self {
        Repair {
            sequence_id: val.sequence_id,
            apply: val.apply,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    fn show(&self, output: impl std::fmt::Display) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    pub async fn check(&self) -> Result<()> {
        let analysis = self.planner.analyze().await.context("Failed to analyze plan")?;
        self.show(analysis)
    }

    pub async fn handle_bed_command(&self, command: BedCommands) -> Result<()> {
        match command {
            BedCommands::Span(args) => {
                let span = self.planner.bed_span(&args.into()).await?;
                self.show(span)
            }
            BedCommands::Assign(args) => {
                let edit = self
                    .planner
                    .assign_bed(&args.into())
                    .await
                    .context("Failed to assign bed")?;
                self.show(EditResult::new(edit, true))
            }
        }
    }

    pub async fn handle_lane_command(&self, command: LaneCommands) -> Result<()> {
        match command {
            LaneCommands::Show { bed } => {
                let lane = self.planner.lane(&bed).await?;
                self.show(lane)
            }
            LaneCommands::Overlaps => {
                let analysis = self.planner.analyze().await?;
                if analysis.overlap_pairs.is_empty() {
                    return self.show(OperationStatus::success(
                        "No overlapping plantings.".to_string(),
                    ));
                }
                let mut output = String::from("# Overlaps\n\n");
                for pair in &analysis.overlap_pairs {
                    output.push_str(&format!(
                        "- **{}**: {} and {}\n",
                        pair.resource, pair.first, pair.second
                    ));
                }
                self.renderer.render(&output)
            }
        }
    }

    pub async fn handle_planting_command(&self, command: PlantingCommands) -> Result<()> {
        match command {
            PlantingCommands::Show { planting_id } => {
                let planting = self.planner.planting(&planting_id).await?;
                self.show(planting)
            }
            PlantingCommands::Move(args) => {
                let edit = self
                    .planner
                    .move_planting(&args.into())
                    .await
                    .context("Failed to move planting")?;
                self.show(EditResult::new(edit, true))
            }
            PlantingCommands::Feet(args) => {
                let edit = self
                    .planner
                    .set_feet_needed(&args.into())
                    .await
                    .context("Failed to change footage")?;
                self.show(EditResult::new(edit, true))
            }
        }
    }

    pub async fn handle_sequence_command(&self, command: SequenceCommands) -> Result<()> {
        let edit = match command {
            SequenceCommands::Show {
                sequence_id: Some(id),
            } => {
                let summary = self.planner.show_sequence(&id).await?;
                return self.show(summary);
            }
            SequenceCommands::Show { sequence_id: None } => {
                let summaries = self.planner.list_sequences().await?;
                if summaries.is_empty() {
                    return self.show("No sequences found.\n");
                }
                let output: String = summaries.iter().map(|s| format!("{s}\n")).collect();
                return self.renderer.render(&output);
            }
            SequenceCommands::Create(args) => self.planner.create_sequence(&args.into()).await,
            SequenceCommands::Offset(args) => self.planner.update_offset(&args.into()).await,
            SequenceCommands::Move(args) => self.planner.move_anchor(&args.into()).await,
            SequenceCommands::Reorder(args) => self.planner.reorder_slots(&args.into()).await,
            SequenceCommands::Unlink { planting_id } => self.planner.unlink(&planting_id).await,
            SequenceCommands::AddSlot { sequence_id } => self.planner.add_slot(&sequence_id).await,
            SequenceCommands::Add(args) => self.planner.add_to_sequence(&args.into()).await,
            SequenceCommands::Delete(args) => self.planner.delete_sequence(&args.into()).await,
        }
        .context("Sequence edit failed")?;
        self.show(EditResult::new(edit, true))
    }

    pub async fn repair(&self, params: Repair) -> Result<()> {
        let repairs = self
            .planner
            .repair(&params)
            .await
            .context("Failed to repair sequences")?;
        self.show(EditResult::new(repairs, params.apply))
    }
}

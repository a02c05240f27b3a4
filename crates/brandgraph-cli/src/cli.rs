//! CLI command definitions and argument parsing.

use brandgraph_domain::{EntityKey, EntityType, RelationType, RelationshipStatus, Strength};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Brandgraph CLI - Inspect and audit a brand strategy relationship graph.
#[derive(Debug, Parser)]
#[command(name = "brandgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Workspace file (JSON with entities and relationships)
    #[arg(
        short,
        long,
        global = true,
        env = "BRANDGRAPH_WORKSPACE",
        default_value = "brandgraph.json"
    )]
    pub workspace: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show what changing an entity would affect
    Impact(EntityArgs),

    /// Run a consistency check over the whole graph
    Check(CheckArgs),

    /// Show relationship statistics
    Stats,

    /// List the relationships of an entity
    Relations(EntityArgs),

    /// Create a relationship
    Link(LinkArgs),

    /// Delete a relationship
    Unlink {
        /// Relationship id
        id: String,
    },

    /// Show ranked next-step suggestions
    Suggest {
        /// Include dismissed suggestions
        #[arg(long)]
        all: bool,
    },

    /// Dismiss a suggestion
    Dismiss {
        /// Suggestion id
        id: String,
    },

    /// Show the decision status of an entity
    Status(EntityArgs),

    /// Evaluate the decision gate over a selection
    Gate(GateArgs),
}

/// Arguments addressing a single entity.
#[derive(Debug, Parser)]
pub struct EntityArgs {
    /// Entity type (brand-asset, persona, research-plan, ...)
    pub entity_type: EntityType,

    /// Entity id
    pub id: String,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Re-run the check this many times on the audit interval
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Override the audit interval, in seconds
    #[arg(long, requires = "cycles")]
    pub every: Option<u64>,
}

/// Arguments for the link command.
#[derive(Debug, Parser)]
pub struct LinkArgs {
    /// Source entity (type:id)
    pub source: EntityKey,

    /// Target entity (type:id)
    pub target: EntityKey,

    /// Relation type
    #[arg(short, long, default_value = "supports")]
    pub relation: RelationType,

    /// Relation strength
    #[arg(short, long, default_value = "medium")]
    pub strength: Strength,

    /// Initial status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the gate command.
#[derive(Debug, Parser)]
pub struct GateArgs {
    /// Selected entities (type:id)
    pub selection: Vec<EntityKey>,
}

/// Relationship status argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StatusArg {
    /// In force
    Active,
    /// Suggested, not confirmed
    Proposed,
    /// The two sides disagree
    Conflict,
    /// Kept for history only
    Archived,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<StatusArg> for RelationshipStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Active => RelationshipStatus::Active,
            StatusArg::Proposed => RelationshipStatus::Proposed,
            StatusArg::Conflict => RelationshipStatus::Conflict,
            StatusArg::Archived => RelationshipStatus::Archived,
        }
    }
}

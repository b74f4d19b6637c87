//! Clap derive structures for the `pktwatch` CLI.
//!
//! Defines the command tree, global flags, and shared filter arguments.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pktwatch -- browse and acknowledge monitored device packets
#[derive(Debug, Parser)]
#[command(
    name = "pktwatch",
    version,
    about = "Browse monitored device packets from the command line",
    long_about = "Query the packet monitoring API: count and list packets by date,\n\
        region, location, model and type, track unread packets and\n\
        acknowledge them, and inspect the device health split.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "PKTWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL, e.g. https://monitor.example.com/api (overrides profile)
    #[arg(long, short = 's', env = "PKTWATCH_SERVER", global = true)]
    pub server: Option<String>,

    /// Access token (overrides profile, keyring and env lookups)
    #[arg(long, env = "PKTWATCH_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PKTWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PKTWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PKTWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count, list and acknowledge packets
    #[command(alias = "pk")]
    Packets(PacketsArgs),

    /// Device health summary
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Filter Arguments ──────────────────────────────────────────

/// Packet filters. Repeat a flag to select several values.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Region to include
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Location to include
    #[arg(long = "location", value_name = "LOCATION")]
    pub locations: Vec<String>,

    /// Device model to include
    #[arg(long = "model", value_name = "MODEL")]
    pub models: Vec<String>,

    /// Packet type code to include (5 = cycle, 4 = warning)
    #[arg(long = "type", value_name = "CODE")]
    pub types: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PACKETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PacketsArgs {
    #[command(subcommand)]
    pub command: PacketsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PacketsCommand {
    /// Count packets matching the filters
    Count(FilterArgs),

    /// List one page of packets
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Mark packets as read
    Read {
        /// Packet IDs
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Show unread packet IDs of one page
    Unread {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// Normal / replacement / error device split
    Status,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Store an access token for the active profile in the system keyring
    SetToken,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

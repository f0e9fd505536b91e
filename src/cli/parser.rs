use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for openbrd
/// GPS track recorder driven by a BLE remote button, tracks kept in SQLite
#[derive(Parser)]
#[command(
    name = "openbrd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record GPS tracks (start/pause/stop, also from a BLE remote) and browse them from SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(
            long = "op",
            value_name = "OPERATION",
            help = "Only rows of one operation (init, record, del, export, backup, vacuum, migration_applied)"
        )]
        op: Option<String>,
    },

    /// Record a track interactively (commands on stdin: start, pause, stop, remote <byte>, status, quit)
    Record {
        /// CSV file of coordinates (latitude,longitude) replayed as the GPS feed
        #[arg(long = "replay", value_name = "FILE")]
        replay: String,

        /// Delay between replayed fixes, overrides the config value
        #[arg(long = "interval-ms", value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// List recorded tracks
    List {
        #[arg(long = "segments", help = "Show segment sizes for each track")]
        segments: bool,
    },

    /// Show the segments of one or more tracks
    Show {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<i64>,
    },

    /// Delete tracks by id
    Del {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<i64>,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export track segments
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "id", value_name = "ID", help = "Track to export (repeatable, default all)")]
        ids: Vec<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

pub mod demo;
pub mod import;
pub mod init;
pub mod report;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::i18n::{Labels, Language};
use crate::settings::{load_settings, shellexpand_path};
use crate::store::{CsvFileStore, Master};

#[derive(Parser)]
#[command(name = "hostbook", about = "Booking ledger and revenue reports for short-term rental hosts.")]
pub struct Cli {
    /// Master file to use instead of <data_dir>/master.csv
    #[arg(long, global = true)]
    pub master: Option<String>,
    /// Label language
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory, language and currency.
    Init {
        /// Path for hostbook data (default: ~/Documents/hostbook)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Default label language
        #[arg(long = "default-lang", value_enum)]
        language: Option<Language>,
        /// Currency symbol shown before amounts
        #[arg(long)]
        currency: Option<String>,
    },
    /// Import a booking export CSV into the master table.
    Import {
        /// Path to the export CSV
        file: String,
        /// Show what would be added without writing the master table
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Revenue, occupancy and lead-time reports over the master table.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show the master table location and summary statistics.
    Status,
    /// Write a sample booking export to explore hostbook with.
    Demo {
        /// Output path (default: ./demo-export.csv)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total gross revenue.
    Summary {
        #[arg(long)]
        json: bool,
    },
    /// Monthly revenue, occupancy nights and average stay.
    Monthly {
        #[arg(long)]
        json: bool,
    },
    /// Share of bookings by lead time.
    LeadTime {
        #[arg(long)]
        json: bool,
    },
    /// Most recent arrivals.
    Recent {
        /// Number of bookings to show
        #[arg(long, default_value_t = crate::reports::RECENT_LIMIT)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Every report at once.
    Dashboard {
        #[arg(long)]
        json: bool,
    },
}

impl ReportCommands {
    pub fn is_json(&self) -> bool {
        match self {
            Self::Summary { json }
            | Self::Monthly { json }
            | Self::LeadTime { json }
            | Self::Recent { json, .. }
            | Self::Dashboard { json } => *json,
        }
    }
}

/// Per-invocation settings after applying global flags.
pub struct Context {
    pub master_path: PathBuf,
    pub language: Language,
    pub currency: String,
}

impl Context {
    pub fn resolve(master: Option<&str>, lang: Option<Language>) -> Self {
        let settings = load_settings();
        let master_path = master
            .map(|m| PathBuf::from(shellexpand_path(m)))
            .unwrap_or_else(|| settings.master_path());
        Self {
            master_path,
            language: lang.unwrap_or(settings.language),
            currency: settings.currency,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    pub fn open_master(&self) -> Result<Master<CsvFileStore>> {
        Master::open(CsvFileStore::new(&self.master_path))
    }
}

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::model::Category;

#[derive(Debug, Clone, Parser)]
#[command(name = "sgsi-status")]
#[command(about = "Status de un SGSI bajo norma ISO/IEC 27001:2022")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Your name, as recorded with the answers")]
    pub name: Option<String>,

    #[arg(long, help = "Organization the assessment belongs to")]
    pub company: Option<String>,

    #[arg(long, help = "Directory exports are written to")]
    pub output_path: Option<String>,

    /// Responses file to resume from; defaults to the tabular export for `--name`
    #[arg(long)]
    pub responses: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show a catalogue section with the current status of each item
    Catalogue {
        #[arg(long, value_enum)]
        section: Option<SectionArg>,
    },
    /// Record the status of one clause or control
    Set { id: String, status: String },
    /// Show the chart series and the metrics table
    Metrics {
        /// Aggregate only recorded answers instead of the whole catalogue
        #[arg(long)]
        recorded: bool,
    },
    /// Save the answers; with no flags writes the tabular file and the PDF report
    Export {
        #[arg(long)]
        tabular: bool,
        #[arg(long)]
        report: bool,
        #[arg(long)]
        store: bool,
        #[arg(long)]
        archive: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    Mandatory,
    Annex,
}

impl From<SectionArg> for Category {
    fn from(section: SectionArg) -> Self {
        match section {
            SectionArg::Mandatory => Category::MandatoryClause,
            SectionArg::Annex => Category::AnnexControl,
        }
    }
}

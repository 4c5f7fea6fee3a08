pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::{settings::AppConfig, LocalStorage};

pub use app::exporters::{ArchiveExporter, DocumentStoreExporter, ReportExporter, TabularExporter};
pub use core::{
    aggregator::{Aggregator, Basis},
    catalogue::Catalogue,
    engine::{ExportEngine, ExportReport, Outcome},
    session::Session,
    store::StatusStore,
};
pub use domain::model::{Category, ItemId, StatusEntry, StatusValue, UserProfile};
pub use utils::error::{Result, SgsiError};

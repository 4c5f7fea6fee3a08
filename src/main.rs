use clap::Parser;
use sgsi_status::app::exporters::tabular::{read_entries, tabular_filename, write_entries};
use sgsi_status::config::cli::Command;
use sgsi_status::core::{ConfigProvider, Exporter};
use sgsi_status::utils::error::{ErrorCategory, ErrorSeverity};
use sgsi_status::utils::{logger, validation::Validate};
use sgsi_status::{
    AppConfig, ArchiveExporter, Basis, Catalogue, Category, CliConfig, DocumentStoreExporter,
    ExportEngine, ItemId, LocalStorage, ReportExporter, Session, SgsiError, StatusStore,
    StatusValue, TabularExporter, UserProfile,
};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting sgsi-status");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match AppConfig::load(&cli).and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Sugerencia: {}", e.recovery_suggestion());

        let code = exit_code(e.severity());
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn responses_path(config: &AppConfig, profile: &UserProfile) -> Option<PathBuf> {
    match &config.responses {
        Some(path) => Some(PathBuf::from(path)),
        None if !profile.name.trim().is_empty() => {
            Some(Path::new(config.output_path()).join(tabular_filename(profile)))
        }
        None => None,
    }
}

/// Rebuilds the session from the profile flags and the last tabular export, if any.
fn open_session(config: &AppConfig) -> Result<(Session, Option<PathBuf>), SgsiError> {
    let profile = UserProfile::new(
        config.name.clone().unwrap_or_default(),
        config.company.clone().unwrap_or_default(),
    );

    let path = responses_path(config, &profile);
    let store = match &path {
        Some(path) if path.exists() => {
            let entries = read_entries(&std::fs::read(path)?)?;
            tracing::info!("📁 Resumed {} responses from {}", entries.len(), path.display());
            entries.into_iter().collect()
        }
        _ => StatusStore::new(),
    };

    let mut session = Session::with_store(profile, store);
    if config.name.is_some() || config.company.is_some() {
        let name = config.name.clone().unwrap_or_default();
        let company = config.company.clone().unwrap_or_default();
        session.confirm_profile(&name, &company)?;
    }

    Ok((session, path))
}

fn save_responses(path: &Path, session: &Session) -> Result<(), SgsiError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, write_entries(session.store().entries())?)
        .map_err(|e| SgsiError::from(e).into_export("csv"))
}

async fn run(command: Command, config: AppConfig) -> Result<(), SgsiError> {
    let catalogue = Catalogue::iso27001();

    if let Command::Catalogue { section } = command {
        let categories = match section {
            Some(section) => vec![Category::from(section)],
            None => vec![Category::MandatoryClause, Category::AnnexControl],
        };

        match open_session(&config) {
            Ok((mut session, path)) if session.profile().saved => {
                // Shown items are recorded as Desconocido until answered.
                let added: usize = categories
                    .iter()
                    .map(|&category| session.visit_section(catalogue, category))
                    .sum();
                if added > 0 {
                    if let Some(path) = &path {
                        save_responses(path, &session)?;
                        tracing::info!("📁 Recorded {} default responses in {}", added, path.display());
                    }
                }
                print_catalogue(catalogue, session.store(), &categories);
            }
            Ok((session, _)) => print_catalogue(catalogue, session.store(), &categories),
            Err(e) if e.category() == ErrorCategory::Validation => {
                tracing::warn!("⚠️ Showing the catalogue without saved responses: {}", e);
                eprintln!("⚠️ {}", e.user_friendly_message());
                print_catalogue(catalogue, &StatusStore::new(), &categories);
            }
            Err(e) => return Err(e),
        }
        return Ok(());
    }

    let (mut session, path) = open_session(&config)?;
    session.require_confirmed()?;

    match command {
        Command::Catalogue { .. } => unreachable!("handled above"),
        Command::Set { id, status } => {
            let item_id = ItemId::new(id);
            let status: StatusValue = status.parse()?;
            session.record(catalogue, item_id.clone(), status)?;

            let path = path.ok_or_else(|| SgsiError::validation("responses file"))?;
            save_responses(&path, &session)?;

            tracing::info!("✅ {} = {} ({})", item_id, status, path.display());
            println!("✅ {} = {}", item_id, status);
        }
        Command::Metrics { recorded } => {
            let basis = if recorded { Basis::Recorded } else { Basis::Catalogue };
            print_metrics(catalogue, &session, basis);
        }
        Command::Export {
            tabular,
            report,
            store,
            archive,
        } => {
            let (tabular, report) = if !(tabular || report || store || archive) {
                (true, true)
            } else {
                (tabular, report)
            };

            let storage = LocalStorage::new(config.output_path().to_string());
            let mut exporters: Vec<Box<dyn Exporter>> = Vec::new();
            if tabular {
                exporters.push(Box::new(TabularExporter::new(storage.clone())));
            }
            if report {
                exporters.push(Box::new(ReportExporter::new(
                    storage.clone(),
                    catalogue,
                    Basis::Catalogue,
                )));
            }
            if store {
                exporters.push(Box::new(DocumentStoreExporter::new(config.clone())));
            }
            if archive {
                exporters.push(Box::new(ArchiveExporter::new(
                    storage,
                    catalogue,
                    Basis::Catalogue,
                )));
            }

            let engine = ExportEngine::new(exporters);
            let outcome = engine.run(&session).await;

            for (target, location) in outcome.saved() {
                println!("✅ {}: {}", target, location);
            }
            for (target, warning) in outcome.warnings() {
                println!("⚠️ {}: {}", target, warning.user_friendly_message());
            }
            for (target, error) in outcome.failures() {
                eprintln!("❌ {}: {}", target, error.user_friendly_message());
                eprintln!("💡 Sugerencia: {}", error.recovery_suggestion());
            }

            if outcome.has_failures() {
                std::process::exit(exit_code(ErrorSeverity::Medium));
            }
        }
    }

    Ok(())
}

fn print_catalogue(catalogue: &Catalogue, store: &StatusStore, categories: &[Category]) {
    for &category in categories {
        println!("== {} ==", category.title());
        for section in catalogue.sections_in(category) {
            println!();
            println!("{}", section.title);
            for group in &section.groups {
                if let Some(title) = group.title {
                    println!("  {}", title);
                }
                for item in &group.items {
                    let status = store.get_status(&item.item_id());
                    println!("    [{:<11}] {} {}", status.label(), item.id, item.description);
                }
            }
        }
        println!();
    }
}

fn print_metrics(catalogue: &Catalogue, session: &Session, basis: Basis) {
    let aggregator = sgsi_status::Aggregator::new(catalogue, basis);
    let store = session.store();

    println!("Status de Implementación SGSI");
    let series = aggregator.chart_series(store);
    let total: usize = series.values().sum();
    if total == 0 {
        println!("No hay datos para mostrar en el gráfico.");
    } else {
        for (status, count) in &series {
            println!(
                "  {:<12} {:>4} ({:.1}%)",
                status.label(),
                count,
                *count as f64 / total as f64 * 100.0
            );
        }
    }
    println!();

    let table = aggregator.metrics_table(store);
    print!("{}", table);
    println!();
    for row in &table.rows {
        println!("{}: {}", row.status.label(), row.meaning());
    }
}

use crate::core::session::Session;
use crate::domain::ports::Exporter;
use crate::utils::error::SgsiError;

#[derive(Debug)]
pub enum Outcome {
    Saved(String),
    /// Nothing was written; the error is a warning such as an empty session.
    Skipped(SgsiError),
    Failed(SgsiError),
}

#[derive(Debug)]
pub struct ExportResult {
    pub target: &'static str,
    pub outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub results: Vec<ExportResult>,
}

impl ExportReport {
    pub fn saved(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Saved(location) => Some((r.target, location.as_str())),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &SgsiError)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Failed(err) => Some((r.target, err)),
            _ => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = (&'static str, &SgsiError)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Skipped(err) => Some((r.target, err)),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Runs exporters one after another for a single user action.
///
/// A failing exporter never stops the others and never touches the session;
/// each outcome is reported back as a notification.
pub struct ExportEngine {
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExportEngine {
    pub fn new(exporters: Vec<Box<dyn Exporter>>) -> Self {
        Self { exporters }
    }

    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }

    pub async fn run(&self, session: &Session) -> ExportReport {
        tracing::info!(
            "Starting export of {} entries to {} target(s)",
            session.store().len(),
            self.exporters.len()
        );

        let mut report = ExportReport::default();
        for exporter in &self.exporters {
            let target = exporter.target();
            tracing::debug!("Exporting to {}...", target);

            let outcome = match exporter.export(session).await {
                Ok(location) => {
                    tracing::info!("✅ {} saved to {}", target, location);
                    Outcome::Saved(location)
                }
                Err(err) if err.is_warning() => {
                    tracing::warn!("⚠️ {} skipped: {}", target, err);
                    Outcome::Skipped(err)
                }
                Err(err) => {
                    tracing::error!(
                        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                        target,
                        err,
                        err.category(),
                        err.severity()
                    );
                    Outcome::Failed(err)
                }
            };
            report.results.push(ExportResult { target, outcome });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{StatusValue, UserProfile};
    use crate::utils::error::Result;
    use async_trait::async_trait;

    struct Fixed(&'static str, fn() -> Result<String>);

    #[async_trait]
    impl Exporter for Fixed {
        fn target(&self) -> &'static str {
            self.0
        }

        async fn export(&self, _session: &Session) -> Result<String> {
            (self.1)()
        }
    }

    #[tokio::test]
    async fn failures_do_not_stop_later_exporters() {
        let engine = ExportEngine::new(vec![
            Box::new(Fixed("broken", || Err(SgsiError::export("broken", "unreachable")))),
            Box::new(Fixed("empty", || {
                Err(SgsiError::EmptyDataWarning {
                    message: "no entries".to_string(),
                })
            })),
            Box::new(Fixed("ok", || Ok("out/report.pdf".to_string()))),
        ]);

        let mut session = Session::new(UserProfile::new("Ana", "Acme"));
        session.store_mut().set_status("4.1", StatusValue::Defined);
        let report = engine.run(&session).await;

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.saved().collect::<Vec<_>>(), vec![("ok", "out/report.pdf")]);
        assert!(report.has_failures());
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn empty_engine_reports_nothing() {
        let engine = ExportEngine::new(Vec::new());
        let report = tokio_test::block_on(engine.run(&Session::default()));
        assert!(engine.is_empty());
        assert!(report.results.is_empty());
        assert!(!report.has_failures());
    }
}

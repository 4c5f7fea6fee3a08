use crate::app::exporters::document_store::StoredDocument;
use crate::app::exporters::file_stem;
use crate::app::exporters::report::{render_report, report_filename};
use crate::app::exporters::tabular::{tabular_filename, write_entries};
use crate::core::aggregator::Basis;
use crate::core::catalogue::Catalogue;
use crate::core::session::Session;
use crate::core::{Exporter, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const DOCUMENT_FILENAME: &str = "respuestas.json";

/// Bundles the tabular file, the stored document and the PDF report into one zip.
pub struct ArchiveExporter<S: Storage> {
    storage: S,
    catalogue: &'static Catalogue,
    basis: Basis,
}

impl<S: Storage> ArchiveExporter<S> {
    pub fn new(storage: S, catalogue: &'static Catalogue, basis: Basis) -> Self {
        Self {
            storage,
            catalogue,
            basis,
        }
    }

    fn build(&self, session: &Session) -> Result<Vec<u8>> {
        let csv = write_entries(session.store().entries())?;
        let document = serde_json::to_vec_pretty(&StoredDocument::from_session(session))?;
        let report = render_report(
            session,
            self.catalogue,
            self.basis,
            chrono::Local::now().date_naive(),
        )?;

        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file::<_, ()>(tabular_filename(session.profile()), FileOptions::default())?;
        zip.write_all(&csv)?;

        zip.start_file::<_, ()>(DOCUMENT_FILENAME, FileOptions::default())?;
        zip.write_all(&document)?;

        zip.start_file::<_, ()>(report_filename(session.profile()), FileOptions::default())?;
        zip.write_all(&report)?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl<S: Storage> Exporter for ArchiveExporter<S> {
    fn target(&self) -> &'static str {
        "zip"
    }

    async fn export(&self, session: &Session) -> Result<String> {
        let filename = format!("{}_sgsi.zip", file_stem(&session.profile().name));
        let data = self.build(session).map_err(|e| e.into_export(self.target()))?;

        tracing::debug!("Writing archive ({} bytes) to {}", data.len(), filename);
        self.storage
            .write_file(&filename, &data)
            .await
            .map_err(|e| e.into_export(self.target()))?;

        Ok(self.storage.location(&filename))
    }
}

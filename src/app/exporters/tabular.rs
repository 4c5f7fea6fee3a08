use crate::app::exporters::file_stem;
use crate::core::session::Session;
use crate::core::{Exporter, Storage};
use crate::domain::model::{ItemId, StatusEntry, StatusValue, UserProfile};
use crate::utils::error::{Result, SgsiError};
use async_trait::async_trait;
use serde::Deserialize;

pub const HEADERS: [&str; 2] = ["control", "status"];

pub fn tabular_filename(profile: &UserProfile) -> String {
    format!("{}_respuestas_sgsi.csv", file_stem(&profile.name))
}

/// Two-column CSV, header always present.
pub fn write_entries(entries: &[StatusEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for entry in entries {
        writer.write_record([entry.item_id.as_str(), entry.status.label()])?;
    }

    writer
        .into_inner()
        .map_err(|e| SgsiError::export("csv", e.to_string()))
}

#[derive(Debug, Deserialize)]
struct Row {
    control: String,
    status: String,
}

/// Parses the format produced by [`write_entries`]. Labels must be known statuses.
pub fn read_entries(data: &[u8]) -> Result<Vec<StatusEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut entries = Vec::new();
    for row in reader.deserialize::<Row>() {
        let row = row?;
        if row.control.is_empty() {
            continue;
        }
        entries.push(StatusEntry {
            item_id: ItemId::new(row.control),
            status: row.status.parse::<StatusValue>()?,
        });
    }
    Ok(entries)
}

pub struct TabularExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> TabularExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> Exporter for TabularExporter<S> {
    fn target(&self) -> &'static str {
        "csv"
    }

    async fn export(&self, session: &Session) -> Result<String> {
        let filename = tabular_filename(session.profile());
        let data = write_entries(session.store().entries())?;

        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            session.store().len(),
            data.len(),
            filename
        );
        self.storage
            .write_file(&filename, &data)
            .await
            .map_err(|e| e.into_export(self.target()))?;

        Ok(self.storage.location(&filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, status: StatusValue) -> StatusEntry {
        StatusEntry {
            item_id: ItemId::from(id),
            status,
        }
    }

    #[test]
    fn writes_header_and_rows_in_order() {
        let data = write_entries(&[
            entry("4.1", StatusValue::Defined),
            entry("A.5.1", StatusValue::NotApplicable),
        ])
        .unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "control,status\n4.1,Definido\nA.5.1,No Aplica\n"
        );
    }

    #[test]
    fn empty_store_still_has_header() {
        let data = write_entries(&[]).unwrap();
        assert_eq!(data, b"control,status\n");
        assert!(read_entries(&data).unwrap().is_empty());
    }

    #[test]
    fn read_rejects_unknown_labels() {
        let err = read_entries(b"control,status\n4.1,Casi listo\n").unwrap_err();
        assert!(matches!(err, SgsiError::UnknownStatus { .. }));
        // Reported to the user as a warning when only browsing the catalogue.
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Validation);
    }

    #[test]
    fn read_accepts_spreadsheet_spacing() {
        let entries = read_entries(b"control , status\n 6.1.2 , Gestionado \n").unwrap();
        assert_eq!(entries, vec![entry("6.1.2", StatusValue::Managed)]);
    }

    #[test]
    fn filename_derives_from_profile_name() {
        let profile = UserProfile::new("Ana", "Acme");
        assert_eq!(tabular_filename(&profile), "Ana_respuestas_sgsi.csv");
    }
}

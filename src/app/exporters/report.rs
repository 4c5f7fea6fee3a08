use crate::app::exporters::file_stem;
use crate::app::exporters::pdf::{Align, Font, PdfWriter};
use crate::core::aggregator::{Aggregator, Basis};
use crate::core::catalogue::Catalogue;
use crate::core::session::Session;
use crate::core::{Category, Exporter, Storage};
use crate::domain::model::UserProfile;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub const CHART_TITLE: &str = "Status de Implementación SGSI";
pub const NO_CHART_DATA: &str = "No hay datos para mostrar en el gráfico.";

pub fn report_filename(profile: &UserProfile) -> String {
    format!("{}_reporte_sgsi.pdf", file_stem(&profile.name))
}

/// Renders the full report: profile header, every catalogue item with its
/// status (unset items read `Desconocido`), the pie chart and the metrics table.
pub fn render_report(
    session: &Session,
    catalogue: &Catalogue,
    basis: Basis,
    generated_on: NaiveDate,
) -> Result<Vec<u8>> {
    let profile = session.profile();
    let store = session.store();
    let aggregator = Aggregator::new(catalogue, basis);

    let mut pdf = PdfWriter::new(format!("Reporte SGSI - {}", profile.company));
    pdf.line(
        Font::Bold,
        14.0,
        Align::Center,
        &format!("Reporte SGSI - {}", profile.company),
    );
    pdf.line(Font::Regular, 12.0, Align::Left, &format!("Nombre: {}", profile.name));
    pdf.line(Font::Regular, 12.0, Align::Left, &format!("Empresa: {}", profile.company));
    pdf.line(
        Font::Regular,
        12.0,
        Align::Left,
        &format!("Fecha: {}", generated_on.format("%Y-%m-%d")),
    );

    for category in [Category::MandatoryClause, Category::AnnexControl] {
        pdf.skip(8.0);
        pdf.line(Font::Bold, 13.0, Align::Left, category.title());
        for section in catalogue.sections_in(category) {
            pdf.line(Font::Bold, 12.0, Align::Left, section.title);
            for group in &section.groups {
                if let Some(title) = group.title {
                    pdf.line(Font::Italic, 12.0, Align::Left, title);
                }
                for item in &group.items {
                    let status = store.get_status(&item.item_id());
                    pdf.line(
                        Font::Regular,
                        11.0,
                        Align::Left,
                        &format!("{}: {}", item.id, status.label()),
                    );
                }
            }
        }
    }

    pdf.new_page();
    pdf.line(Font::Bold, 13.0, Align::Left, "Métricas");

    let series: Vec<_> = aggregator.chart_series(store).into_iter().collect();
    if series.iter().all(|(_, count)| *count == 0) {
        pdf.line(Font::Regular, 12.0, Align::Left, NO_CHART_DATA);
    } else {
        pdf.pie_chart(CHART_TITLE, &series);
    }

    pdf.skip(8.0);
    let table = aggregator.metrics_table(store);
    for line in table.to_lines() {
        pdf.line(Font::Mono, 10.0, Align::Left, &line);
    }
    pdf.skip(8.0);
    for row in &table.rows {
        pdf.line(
            Font::Regular,
            9.0,
            Align::Left,
            &format!("{}: {}", row.status.label(), row.meaning()),
        );
    }

    pdf.finish()
}

pub struct ReportExporter<S: Storage> {
    storage: S,
    catalogue: &'static Catalogue,
    basis: Basis,
}

impl<S: Storage> ReportExporter<S> {
    pub fn new(storage: S, catalogue: &'static Catalogue, basis: Basis) -> Self {
        Self {
            storage,
            catalogue,
            basis,
        }
    }
}

#[async_trait]
impl<S: Storage> Exporter for ReportExporter<S> {
    fn target(&self) -> &'static str {
        "pdf"
    }

    async fn export(&self, session: &Session) -> Result<String> {
        let filename = report_filename(session.profile());
        let today = chrono::Local::now().date_naive();

        // Rendered fully in memory so a failure never leaves a partial file behind.
        let data = render_report(session, self.catalogue, self.basis, today)
            .map_err(|e| e.into_export(self.target()))?;

        tracing::debug!("Writing report ({} bytes) to {}", data.len(), filename);
        self.storage
            .write_file(&filename, &data)
            .await
            .map_err(|e| e.into_export(self.target()))?;

        Ok(self.storage.location(&filename))
    }
}

//! Per-status counts and percentages over the recorded statuses.
//!
//! Mandatory clauses and Annex A controls are always aggregated separately;
//! only the chart series mixes them.

use crate::core::catalogue::Catalogue;
use crate::core::store::StatusStore;
use crate::domain::model::{Category, ItemId, StatusValue};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Count per status; every status is present, zero when unused.
pub type StatusCounts = BTreeMap<StatusValue, usize>;
pub type StatusPercentages = BTreeMap<StatusValue, f64>;

/// Which items make up a category's population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Basis {
    /// Only items with a recorded entry.
    Recorded,
    /// Every catalogue item, unset ones counted as `Unknown`, plus orphaned entries.
    #[default]
    Catalogue,
}

/// Category for ids that are not in the catalogue, derived from the clause numbering.
pub fn classify_id(id: &ItemId) -> Option<Category> {
    static CLAUSE: OnceLock<Regex> = OnceLock::new();
    let clause = CLAUSE.get_or_init(|| Regex::new(r"^(?:[4-9]|10)\.").unwrap());

    if id.as_str().starts_with("A.") {
        Some(Category::AnnexControl)
    } else if clause.is_match(id.as_str()) {
        Some(Category::MandatoryClause)
    } else {
        None
    }
}

fn empty_counts() -> StatusCounts {
    StatusValue::ALL.into_iter().map(|status| (status, 0)).collect()
}

pub struct Aggregator<'a> {
    catalogue: &'a Catalogue,
    basis: Basis,
}

impl<'a> Aggregator<'a> {
    pub fn new(catalogue: &'a Catalogue, basis: Basis) -> Self {
        Self { catalogue, basis }
    }

    fn category_of(&self, id: &ItemId) -> Option<Category> {
        self.catalogue.category_of(id).or_else(|| classify_id(id))
    }

    fn population(&self, store: &StatusStore, category: Option<Category>) -> Vec<StatusValue> {
        let wanted = |c: Option<Category>| category.is_none() || c == category;

        match self.basis {
            Basis::Recorded => store
                .entries()
                .iter()
                // Uncategorised entries only count toward the overall series.
                .filter(|entry| wanted(self.category_of(&entry.item_id)))
                .map(|entry| entry.status)
                .collect(),
            Basis::Catalogue => {
                let items = match category {
                    Some(c) => self.catalogue.items_in(c).collect::<Vec<_>>(),
                    None => self.catalogue.items().collect(),
                };
                let mut statuses: Vec<StatusValue> = items
                    .iter()
                    .map(|item| store.get_status(&item.item_id()))
                    .collect();
                statuses.extend(
                    store
                        .entries()
                        .iter()
                        .filter(|entry| !self.catalogue.contains(&entry.item_id))
                        .filter(|entry| wanted(classify_id(&entry.item_id)))
                        .map(|entry| entry.status),
                );
                statuses
            }
        }
    }

    fn tally(statuses: &[StatusValue]) -> StatusCounts {
        let mut counts = empty_counts();
        for status in statuses {
            *counts.entry(*status).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_by_status(&self, store: &StatusStore, category: Category) -> StatusCounts {
        Self::tally(&self.population(store, Some(category)))
    }

    /// Share of the category at each status, in `[0, 100]`. All zero for an empty category.
    pub fn percentage_by_status(&self, store: &StatusStore, category: Category) -> StatusPercentages {
        let counts = self.count_by_status(store, category);
        let total: usize = counts.values().sum();

        counts
            .into_iter()
            .map(|(status, count)| {
                let pct = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };
                (status, pct)
            })
            .collect()
    }

    /// Pie chart input over the recorded entries of both categories.
    /// The basis only shapes the per-category figures; unset items never get a slice.
    pub fn chart_series(&self, store: &StatusStore) -> StatusCounts {
        let statuses: Vec<StatusValue> = store.entries().iter().map(|entry| entry.status).collect();
        Self::tally(&statuses)
    }

    pub fn metrics_table(&self, store: &StatusStore) -> MetricsTable {
        let mandatory = self.percentage_by_status(store, Category::MandatoryClause);
        let annex = self.percentage_by_status(store, Category::AnnexControl);

        let rows = StatusValue::ALL
            .into_iter()
            .map(|status| MetricsRow {
                status,
                mandatory_pct: mandatory.get(&status).copied().unwrap_or(0.0),
                annex_pct: annex.get(&status).copied().unwrap_or(0.0),
            })
            .collect();

        MetricsTable { rows }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub status: StatusValue,
    pub mandatory_pct: f64,
    pub annex_pct: f64,
}

impl MetricsRow {
    pub fn meaning(&self) -> &'static str {
        self.status.meaning()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub const HEADERS: [&'static str; 4] = [
        "Status",
        "Significado",
        "Proporción de Requisitos del SGSI",
        "Proporción de Controles de Seguridad de la Información",
    ];

    /// Compact text form, one line per status, as embedded in the report.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{:<12} {:>11} {:>10}", "Status", "Requisitos", "Controles")];
        lines.extend(self.rows.iter().map(|row| {
            format!(
                "{:<12} {:>10.1}% {:>9.1}%",
                row.status.label(),
                row.mandatory_pct,
                row.annex_pct
            )
        }));
        lines
    }
}

impl fmt::Display for MetricsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

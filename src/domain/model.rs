use crate::utils::error::SgsiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maturity status of a clause or control, in display order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StatusValue {
    #[default]
    #[serde(rename = "Desconocido")]
    Unknown,
    #[serde(rename = "Inexistente")]
    Nonexistent,
    #[serde(rename = "Inicial")]
    Initial,
    #[serde(rename = "Limitado")]
    Limited,
    #[serde(rename = "Definido")]
    Defined,
    #[serde(rename = "Gestionado")]
    Managed,
    #[serde(rename = "Optimizado")]
    Optimized,
    #[serde(rename = "No Aplica")]
    NotApplicable,
}

impl StatusValue {
    pub const ALL: [StatusValue; 8] = [
        StatusValue::Unknown,
        StatusValue::Nonexistent,
        StatusValue::Initial,
        StatusValue::Limited,
        StatusValue::Defined,
        StatusValue::Managed,
        StatusValue::Optimized,
        StatusValue::NotApplicable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusValue::Unknown => "Desconocido",
            StatusValue::Nonexistent => "Inexistente",
            StatusValue::Initial => "Inicial",
            StatusValue::Limited => "Limitado",
            StatusValue::Defined => "Definido",
            StatusValue::Managed => "Gestionado",
            StatusValue::Optimized => "Optimizado",
            StatusValue::NotApplicable => "No Aplica",
        }
    }

    /// Hex colour used for the chart slice and legend.
    pub fn color(self) -> &'static str {
        match self {
            StatusValue::Unknown => "#D3D3D3",
            StatusValue::Nonexistent => "#FF6347",
            StatusValue::Initial => "#FFA500",
            StatusValue::Limited => "#FFD700",
            StatusValue::Defined => "#ADFF2F",
            StatusValue::Managed => "#32CD32",
            StatusValue::Optimized => "#4682B4",
            StatusValue::NotApplicable => "#D3D3D3",
        }
    }

    pub fn rgb(self) -> (f32, f32, f32) {
        let hex = &self.color()[1..];
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_or(0.0, |v| f32::from(v) / 255.0)
        };
        (channel(0), channel(2), channel(4))
    }

    pub fn meaning(self) -> &'static str {
        match self {
            StatusValue::Unknown => "No ha sido siquiera revisado aún",
            StatusValue::Nonexistent => {
                "Ausencia completa de una política, procedimiento, control, etc legibles"
            }
            StatusValue::Initial => {
                "El desarrollo apenas ha comenzado y requerirá un trabajo significativo para satisfacer los requisitos"
            }
            StatusValue::Limited => "Progresando bien pero no completado aún",
            StatusValue::Defined => {
                "El desarrollo está más o menos completo aunque con ausencia de detalles y/o no está aún implementado, en cumplimiento vigente ni activamente avalado por la alta dirección."
            }
            StatusValue::Managed => {
                "El desarrollo está completo, el proceso / control ha sido implementado y recientemente comenzó a operar"
            }
            StatusValue::Optimized => {
                "El requisito está plenamente conforme, está plenamente operativo como se espera, está siendo activamente supervisado y mejorado, y hay evidencia sustancial para demostrar todo lo antedicho a los auditores"
            }
            StatusValue::NotApplicable => {
                "TODOS los requerimientos en el cuerpo principal de la norma ISO/IEC 27001 son obligatorios SI su SGSI va a ser certificado. Caso contrario, la gerencia a cargo, puede ignorarlos"
            }
        }
    }

    fn english_name(self) -> &'static str {
        match self {
            StatusValue::Unknown => "unknown",
            StatusValue::Nonexistent => "nonexistent",
            StatusValue::Initial => "initial",
            StatusValue::Limited => "limited",
            StatusValue::Defined => "defined",
            StatusValue::Managed => "managed",
            StatusValue::Optimized => "optimized",
            StatusValue::NotApplicable => "notapplicable",
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusValue {
    type Err = SgsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let compact: String = wanted
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        StatusValue::ALL
            .into_iter()
            .find(|status| {
                status.label().eq_ignore_ascii_case(wanted) || status.english_name() == compact
            })
            .ok_or_else(|| SgsiError::UnknownStatus {
                label: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    MandatoryClause,
    AnnexControl,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::MandatoryClause => "Requisitos obligatorios de la SgSi",
            Category::AnnexControl => "Controles del Anexo A",
        }
    }
}

/// Stable storage key for a checklist item, independent of its display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Surrounding whitespace is dropped, so typed ids match catalogue ids.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub description: &'static str,
    pub category: Category,
}

impl ChecklistItem {
    pub fn item_id(&self) -> ItemId {
        ItemId::from(self.id)
    }
}

/// One recorded answer. Serializes as the `{control, status}` row used by every exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    #[serde(rename = "control")]
    pub item_id: ItemId,
    pub status: StatusValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub company: String,
    /// Set once the profile has been confirmed; gates the rest of the flow.
    pub saved: bool,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            saved: false,
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SgsiError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Document store request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("PDF rendering error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unknown status label: {label}")]
    UnknownStatus { label: String },

    #[error("Unknown checklist item: {id}")]
    UnknownItem { id: String },

    #[error("Nothing to export: {message}")]
    EmptyDataWarning { message: String },

    #[error("Export to {target} failed: {message}")]
    ExportError { target: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Export,
    EmptyData,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SgsiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn export(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExportError {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Attributes a lower-level failure to an export target. Warnings, config
    /// problems and errors already tied to a target pass through unchanged.
    pub fn into_export(self, target: &str) -> Self {
        match self.category() {
            ErrorCategory::Export | ErrorCategory::Io => match self {
                Self::ExportError { .. } => self,
                other => Self::export(target, other.to_string()),
            },
            _ => self,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::UnknownStatus { .. } | Self::UnknownItem { .. } => {
                ErrorCategory::Validation
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::EmptyDataWarning { .. } => ErrorCategory::EmptyData,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ZipError(_)
            | Self::ApiError(_)
            | Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::PdfError(_)
            | Self::ExportError { .. } => ErrorCategory::Export,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::EmptyData => ErrorSeverity::Low,
            ErrorCategory::Export | ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    /// Warnings are reported to the user but the triggering action counts as handled.
    pub fn is_warning(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Completa todos los campos requeridos y vuelve a intentarlo",
            Self::UnknownStatus { .. } => {
                "Usa uno de: Desconocido, Inexistente, Inicial, Limitado, Definido, Gestionado, Optimizado, No Aplica"
            }
            Self::UnknownItem { .. } => "Ejecuta `sgsi-status catalogue` para ver los identificadores válidos",
            Self::MissingConfigError { .. } => "Define la variable de entorno o la clave del archivo de configuración",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Revisa el archivo de configuración y las variables de entorno"
            }
            Self::EmptyDataWarning { .. } => "Registra al menos un estado antes de exportar",
            Self::ApiError(_) => "Verifica la conexión con el almacén de documentos y vuelve a intentarlo",
            Self::IoError(_) => "Verifica que el directorio de salida exista y tenga permisos de escritura",
            _ => "Vuelve a intentar la exportación; tus respuestas no se han modificado",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => format!("Por favor, completa todos los campos: {}", message),
            Self::EmptyDataWarning { .. } => "No hay respuestas para guardar".to_string(),
            Self::ExportError { target, message } => {
                format!("No se pudo guardar en {}: {}", target, message)
            }
            Self::MissingConfigError { field } => format!("Falta la configuración requerida: {}", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SgsiError>;

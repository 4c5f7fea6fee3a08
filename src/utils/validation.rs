use crate::utils::error::{Result, SgsiError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses `url_str` and checks its scheme against `schemes`.
pub fn validate_url(field_name: &str, url_str: &str, schemes: &[&str]) -> Result<Url> {
    if url_str.is_empty() {
        return Err(SgsiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) if schemes.contains(&url.scheme()) => Ok(url),
        Ok(url) => Err(SgsiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Unsupported URL scheme: {}", url.scheme()),
        }),
        Err(e) => Err(SgsiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SgsiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SgsiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SgsiError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Profile fields are validated as user input, not configuration.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SgsiError::ValidationError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        let web = &["http", "https"];
        assert!(validate_url("document_store.uri", "https://data.example.com/app/v1", web).is_ok());
        assert!(validate_url("document_store.uri", "http://localhost:8080", web).is_ok());
        assert!(validate_url("document_store.uri", "", web).is_err());
        assert!(validate_url("document_store.uri", "not a url", web).is_err());
        assert!(validate_url("document_store.uri", "mongodb://localhost:27017", web).is_err());

        let url = validate_url(
            "document_store.uri",
            "mongodb+srv://user:pw@cluster0.example.net/?retryWrites=true",
            &["mongodb", "mongodb+srv"],
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("cluster0.example.net"));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./output").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "Ana").is_ok());
        let err = validate_non_empty_string("company", "   ").unwrap_err();
        assert!(matches!(err, SgsiError::ValidationError { .. }));
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("https://example.com".to_string());
        let absent: Option<String> = None;
        assert!(validate_required_field("uri", &present).is_ok());
        assert!(matches!(
            validate_required_field("uri", &absent),
            Err(SgsiError::MissingConfigError { .. })
        ));
    }
}

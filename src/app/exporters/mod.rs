pub mod archive;
pub mod document_store;
pub mod pdf;
pub mod report;
pub mod tabular;

pub use archive::ArchiveExporter;
pub use document_store::DocumentStoreExporter;
pub use report::ReportExporter;
pub use tabular::TabularExporter;

/// File-name-safe form of the user's name, used as the prefix of every exported file.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        "sgsi".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_replaces_path_separators() {
        assert_eq!(file_stem("Ana López"), "Ana López");
        assert_eq!(file_stem("../etc/passwd"), ".._etc_passwd");
        assert_eq!(file_stem("   "), "sgsi");
    }
}

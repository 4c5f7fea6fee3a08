use httpmock::prelude::*;
use sgsi_status::core::{ConfigProvider, Exporter};
use sgsi_status::utils::validation::Validate;
use sgsi_status::{
    AppConfig, Basis, Catalogue, DocumentStoreExporter, ExportEngine, ItemId, LocalStorage,
    Outcome, ReportExporter, Session, SgsiError, StatusValue, TabularExporter, UserProfile,
};
use tempfile::TempDir;

fn config_for(uri: Option<String>) -> AppConfig {
    AppConfig {
        document_store_uri: uri,
        api_key: Some("secret-key".to_string()),
        ..AppConfig::default()
    }
}

fn sample_session() -> Session {
    let mut session = Session::new(UserProfile::new("Ana", "Acme"));
    session.confirm_profile("Ana", "Acme").unwrap();
    session
        .record(Catalogue::iso27001(), ItemId::from("4.1"), StatusValue::Defined)
        .unwrap();
    session
}

#[tokio::test]
async fn test_insert_one_posts_profile_and_responses() {
    let server = MockServer::start();

    let insert_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/app/v1/action/insertOne")
            .header("api-key", "secret-key")
            .body_contains("\"database\":\"sgsi_db\"")
            .body_contains("\"collection\":\"respuestas\"")
            .body_contains("\"user_info\":{\"name\":\"Ana\",\"company\":\"Acme\",\"saved\":true}")
            .body_contains("{\"control\":\"4.1\",\"status\":\"Definido\"}");
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"insertedId": "665f1c2e"}));
    });

    let exporter = DocumentStoreExporter::new(config_for(Some(server.url("/app/v1"))));
    let location = exporter.export(&sample_session()).await.unwrap();

    insert_mock.assert();
    assert_eq!(location, "sgsi_db.respuestas/665f1c2e");
}

#[tokio::test]
async fn test_empty_session_is_a_warning_and_sends_nothing() {
    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/action/insertOne");
        then.status(201);
    });

    let mut session = Session::default();
    session.confirm_profile("Ana", "Acme").unwrap();

    let exporter = DocumentStoreExporter::new(config_for(Some(server.base_url())));
    let err = exporter.export(&session).await.unwrap_err();

    assert!(matches!(err, SgsiError::EmptyDataWarning { .. }));
    assert!(err.is_warning());
    insert_mock.assert_hits(0);
}

#[tokio::test]
async fn test_server_error_is_reported_as_export_failure() {
    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/action/insertOne");
        then.status(500).body("cluster unavailable");
    });

    let exporter = DocumentStoreExporter::new(config_for(Some(server.base_url())));
    let err = exporter.export(&sample_session()).await.unwrap_err();

    insert_mock.assert();
    match err {
        SgsiError::ExportError { target, message } => {
            assert_eq!(target, "document store");
            assert!(message.contains("500"));
            assert!(message.contains("cluster unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_connection_string_fails_on_use() {
    let exporter = DocumentStoreExporter::new(config_for(None));
    let err = exporter.export(&sample_session()).await.unwrap_err();

    assert!(!err.is_warning());
    match err {
        SgsiError::MissingConfigError { field } => assert_eq!(field, "MONGODB_URI"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_mongodb_connection_string_does_not_block_file_exports() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        output_path: temp_dir.path().to_str().unwrap().to_string(),
        ..config_for(Some(
            "mongodb+srv://user:pw@cluster0.example.net/?retryWrites=true&w=majority".to_string(),
        ))
    };
    assert!(config.validate().is_ok());

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = ExportEngine::new(vec![
        Box::new(TabularExporter::new(storage.clone())),
        Box::new(ReportExporter::new(
            storage,
            Catalogue::iso27001(),
            Basis::Catalogue,
        )),
    ]);

    let report = engine.run(&sample_session()).await;

    assert!(!report.has_failures());
    assert_eq!(report.saved().count(), 2);
    assert!(temp_dir.path().join("Ana_respuestas_sgsi.csv").exists());
    assert!(temp_dir.path().join("Ana_reporte_sgsi.pdf").exists());
}

#[tokio::test]
async fn test_unsupported_store_uri_fails_only_the_store_export() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        output_path: temp_dir.path().to_str().unwrap().to_string(),
        ..config_for(Some("ftp://files.example.com/sgsi".to_string()))
    };
    assert!(config.validate().is_ok());

    let engine = ExportEngine::new(vec![
        Box::new(DocumentStoreExporter::new(config.clone())),
        Box::new(TabularExporter::new(LocalStorage::new(
            config.output_path().to_string(),
        ))),
    ]);

    let report = engine.run(&sample_session()).await;

    match &report.results[0].outcome {
        Outcome::Failed(SgsiError::ExportError { target, message }) => {
            assert_eq!(target, "document store");
            assert!(message.contains("ftp"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(matches!(report.results[1].outcome, Outcome::Saved(_)));
}

use crate::core::session::Session;
use crate::core::{ConfigProvider, Exporter};
use crate::config::settings::ENV_DOCUMENT_STORE_URI;
use crate::domain::model::{StatusEntry, UserProfile};
use crate::utils::error::{Result, SgsiError};
use crate::utils::validation::{validate_required_field, validate_url};
use async_trait::async_trait;
use mongodb::bson::Bson;
use reqwest::Client;
use serde::Serialize;

/// The record saved per session: `{user_info, responses}`.
#[derive(Debug, Serialize)]
pub struct StoredDocument<'a> {
    pub user_info: &'a UserProfile,
    pub responses: &'a [StatusEntry],
}

impl<'a> StoredDocument<'a> {
    pub fn from_session(session: &'a Session) -> Self {
        Self {
            user_info: session.profile(),
            responses: session.store().entries(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertOne<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    document: StoredDocument<'a>,
}

const TARGET: &str = "document store";
const MONGO_SCHEMES: [&str; 2] = ["mongodb", "mongodb+srv"];
const DATA_API_SCHEMES: [&str; 2] = ["http", "https"];

/// How the configured URI reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEndpoint {
    /// A MongoDB connection string, used through the driver.
    Mongo,
    /// An HTTP data API exposing `POST {uri}/action/insertOne`.
    DataApi,
}

impl StoreEndpoint {
    /// Classifies the URI by scheme. Anything else is an export failure, raised on first use.
    pub fn classify(uri: &str) -> Result<Self> {
        let supported: Vec<&str> = MONGO_SCHEMES.into_iter().chain(DATA_API_SCHEMES).collect();
        let url = validate_url(ENV_DOCUMENT_STORE_URI, uri, &supported)
            .map_err(|e| SgsiError::export(TARGET, e.to_string()))?;

        if MONGO_SCHEMES.contains(&url.scheme()) {
            Ok(Self::Mongo)
        } else {
            Ok(Self::DataApi)
        }
    }
}

/// Inserts one document per export into `database.collection`. No retries.
pub struct DocumentStoreExporter<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> DocumentStoreExporter<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(uri: &str) -> String {
        format!("{}/action/insertOne", uri.trim_end_matches('/'))
    }

    fn location(&self, inserted_id: Option<String>) -> String {
        match inserted_id {
            Some(id) => format!("{}.{}/{}", self.config.database(), self.config.collection(), id),
            None => format!("{}.{}", self.config.database(), self.config.collection()),
        }
    }

    async fn insert_mongo(&self, uri: &str, document: &StoredDocument<'_>) -> Result<Option<String>> {
        let to_export = |e: mongodb::error::Error| SgsiError::export(TARGET, e.to_string());

        let client = mongodb::Client::with_uri_str(uri).await.map_err(to_export)?;
        let collection = client
            .database(self.config.database())
            .collection::<mongodb::bson::Document>(self.config.collection());

        let document = mongodb::bson::to_document(document)
            .map_err(|e| SgsiError::export(TARGET, e.to_string()))?;
        let result = collection.insert_one(document).await.map_err(to_export)?;

        Ok(Some(match result.inserted_id {
            Bson::ObjectId(id) => id.to_hex(),
            Bson::String(id) => id,
            other => other.to_string(),
        }))
    }

    async fn insert_data_api(&self, uri: &str, document: StoredDocument<'_>) -> Result<Option<String>> {
        let body = InsertOne {
            data_source: self.config.data_source(),
            database: self.config.database(),
            collection: self.config.collection(),
            document,
        };

        let url = Self::endpoint(uri);
        tracing::debug!("Posting insertOne to {}", url);

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = self.config.api_key() {
            request = request.header("api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SgsiError::export(TARGET, e.to_string()))?;

        let status = response.status();
        tracing::debug!("Document store response status: {}", status);
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SgsiError::export(
                TARGET,
                format!("HTTP {}: {}", status, detail.trim()),
            ));
        }

        let payload: serde_json::Value = response.json().await.unwrap_or_default();
        Ok(payload
            .get("insertedId")
            .and_then(|id| id.as_str())
            .map(str::to_string))
    }
}

#[async_trait]
impl<C: ConfigProvider> Exporter for DocumentStoreExporter<C> {
    fn target(&self) -> &'static str {
        TARGET
    }

    async fn export(&self, session: &Session) -> Result<String> {
        if session.store().is_empty() {
            return Err(SgsiError::EmptyDataWarning {
                message: "No hay respuestas para guardar en el almacén de documentos".to_string(),
            });
        }

        let uri = self.config.document_store_uri();
        let uri = *validate_required_field(ENV_DOCUMENT_STORE_URI, &uri)?;
        let endpoint = StoreEndpoint::classify(uri)?;

        tracing::debug!(
            "Inserting {} responses into {}.{} ({:?})",
            session.store().len(),
            self.config.database(),
            self.config.collection(),
            endpoint
        );

        let document = StoredDocument::from_session(session);
        let inserted_id = match endpoint {
            StoreEndpoint::Mongo => self.insert_mongo(uri, &document).await?,
            StoreEndpoint::DataApi => self.insert_data_api(uri, document).await?,
        };

        Ok(self.location(inserted_id))
    }
}

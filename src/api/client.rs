// file: src/api/client.rs
// description: reqwest client for the document library REST backend
// reference: https://docs.rs/reqwest

use super::{DocumentApi, fallback};
use crate::config::ApiConfig;
use crate::error::{GENERIC_API_FAILURE, LibraryError, Result};
use crate::models::{
    CsvImportReport, Document, DocumentId, DocumentList, DocumentPayload, ErrorBody, Fetched,
    GenerationReport, SuggestRequest, Topic, TopicSuggestion,
};
use crate::utils::Validator;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    list_limit: usize,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        Validator::validate_url(&config.base_url)
            .map_err(|e| LibraryError::Config(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LibraryError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            list_limit: config.list_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The id is one opaque path segment.
    fn document_url(&self, id: &DocumentId) -> String {
        self.url(&format!("/api/documents/{}", urlencoding::encode(id.as_str())))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or_else(|_| GENERIC_API_FAILURE.to_string());
            warn!("Backend responded {}: {}", status, message);
            return Err(LibraryError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LibraryError::Decode(e.to_string()))
    }
}

impl DocumentApi for ApiClient {
    async fn list_documents(&self) -> Fetched<Document> {
        let request = self
            .client
            .get(self.url("/api/documents"))
            .query(&[("limit", self.list_limit)]);

        match self.send::<DocumentList>(request).await {
            Ok(list) => {
                debug!("Loaded {} documents", list.documents.len());
                Fetched::live(list.documents)
            }
            Err(e) => {
                warn!("Error loading documents, using offline dataset: {}", e);
                Fetched::fallback(fallback::documents())
            }
        }
    }

    async fn get_document(&self, id: &DocumentId) -> Result<Document> {
        let request = self.client.get(self.document_url(id));
        self.send(request).await
    }

    async fn create_document(&self, payload: &DocumentPayload) -> Result<Document> {
        let request = self.client.post(self.url("/api/documents")).json(payload);
        let created: Document = self.send(request).await?;
        info!("Created document {}", created.id);
        Ok(created)
    }

    async fn update_document(&self, id: &DocumentId, payload: &DocumentPayload) -> Result<Document> {
        let request = self
            .client
            .put(self.document_url(id))
            .json(payload);
        let updated: Document = self.send(request).await?;
        info!("Updated document {}", updated.id);
        Ok(updated)
    }

    async fn delete_document(&self, id: &DocumentId) -> Result<()> {
        let request = self.client.delete(self.document_url(id));
        let _confirmation: serde_json::Value = self.send(request).await?;
        info!("Deleted document {}", id);
        Ok(())
    }

    async fn search_documents(&self, query: &str) -> Result<Vec<Document>> {
        let request = self
            .client
            .get(self.url("/api/documents/search"))
            .query(&[("q", query)]);
        let list: DocumentList = self.send(request).await?;
        debug!("Search '{}' returned {} documents", query, list.documents.len());
        Ok(list.documents)
    }

    async fn filter_documents_by_topic(&self, topic_id: i64) -> Result<Vec<Document>> {
        let request = self
            .client
            .get(self.url(&format!("/api/documents/filter/topic/{}", topic_id)));
        let list: DocumentList = self.send(request).await?;
        debug!("Topic {} has {} documents", topic_id, list.documents.len());
        Ok(list.documents)
    }

    async fn list_topics(&self) -> Fetched<Topic> {
        let request = self
            .client
            .get(self.url("/api/topics"))
            .query(&[("limit", self.list_limit)]);

        match self.send::<Vec<Topic>>(request).await {
            Ok(topics) => Fetched::live(topics),
            Err(e) => {
                warn!("Error loading topics, using offline dataset: {}", e);
                Fetched::fallback(fallback::topics())
            }
        }
    }

    async fn generate_topics(&self) -> Result<GenerationReport> {
        let request = self.client.post(self.url("/api/topics/generate"));
        let report: GenerationReport = self.send(request).await?;
        info!(
            "Generated {} topics over {} documents",
            report.topics_count, report.documents_processed
        );
        Ok(report)
    }

    async fn load_csv(&self) -> Result<CsvImportReport> {
        let request = self.client.get(self.url("/api/csv/load"));
        let report: CsvImportReport = self.send(request).await?;
        info!("Backend reloaded {} documents from CSV", report.documents_loaded);
        Ok(report)
    }

    async fn suggest_topics(&self, text: &str, count: usize) -> Result<TopicSuggestion> {
        let body = SuggestRequest {
            content: text.to_string(),
            num_topics: count,
        };
        let request = self.client.post(self.url("/api/topics/suggest")).json(&body);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_new_trims_trailing_slash() {
        let mut config = Config::default_config().api;
        config.base_url = "http://localhost:8000/".to_string();
        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/topics"), "http://localhost:8000/api/topics");
        assert_eq!(
            client.document_url(&DocumentId::new("c3?x/y#z")),
            "http://localhost:8000/api/documents/c3%3Fx%2Fy%23z"
        );
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let mut config = Config::default_config().api;
        config.base_url = "localhost".to_string();
        assert!(matches!(ApiClient::new(config), Err(LibraryError::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend_uses_fallback_for_lists() {
        let mut config = Config::default_config().api;
        // Port 9 (discard) is closed on test hosts, so the connect fails fast.
        config.base_url = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 2;
        let client = ApiClient::new(config).unwrap();

        let docs = client.list_documents().await;
        assert!(docs.used_fallback);
        assert_eq!(docs.items, fallback::documents());

        let topics = client.list_topics().await;
        assert!(topics.used_fallback);

        let err = client.search_documents("eeg").await.unwrap_err();
        assert!(err.is_transport());
    }
}

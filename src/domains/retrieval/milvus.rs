use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{ScoredDocument, VectorIndex};
use crate::core::client::{ApiClient, ApiError, ApiResult};
use crate::core::config::VectorConfig;
use crate::domains::normalizer::display_value;

const SEARCH_PATH: &str = "/v2/vectordb/entities/search";
const OUTPUT_FIELDS: [&str; 4] = ["text", "source_file", "type", "doc_id"];

#[derive(Serialize)]
struct IndexParams {
    nprobe: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams<'a> {
    metric_type: &'a str,
    params: IndexParams,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    collection_name: &'a str,
    data: [&'a [f32]; 1],
    anns_field: &'a str,
    limit: usize,
    output_fields: [&'static str; 4],
    search_params: SearchParams<'a>,
}

/// Milvus REST v2 search client.
#[derive(Debug, Clone)]
pub struct MilvusIndex {
    client: ApiClient,
    config: VectorConfig,
}

impl MilvusIndex {
    pub fn new(client: ApiClient, config: VectorConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!("{}{}", self.config.milvus_url.trim_end_matches('/'), SEARCH_PATH)
    }
}

/// Read an output field as a string, empty when absent.
fn field(hit: &Value, key: &str) -> String {
    match hit.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(value) => display_value(value),
    }
}

fn to_document(hit: &Value) -> ScoredDocument {
    ScoredDocument {
        id: field(hit, "doc_id"),
        text: field(hit, "text"),
        source_file: field(hit, "source_file"),
        kind: field(hit, "type"),
        score: hit.get("distance").and_then(Value::as_f64).unwrap_or(0.0) as f32,
    }
}

#[async_trait]
impl VectorIndex for MilvusIndex {
    async fn search(&self, vector: &[f32], top_k: usize) -> ApiResult<Vec<ScoredDocument>> {
        let url = self.url();
        let request = SearchRequest {
            collection_name: &self.config.collection,
            data: [vector],
            anns_field: &self.config.anns_field,
            limit: top_k,
            output_fields: OUTPUT_FIELDS,
            search_params: SearchParams {
                metric_type: &self.config.metric_type,
                params: IndexParams {
                    nprobe: self.config.nprobe,
                },
            },
        };

        let bearer = self.config.milvus_token.as_ref().map(|t| format!("Bearer {}", t));
        let headers: Vec<(&str, &str)> = bearer
            .as_deref()
            .map(|b| vec![("Authorization", b)])
            .unwrap_or_default();

        let response = self
            .client
            .post_json_with_headers(&url, &request, &headers, self.config.timeout())
            .await?;

        let code = response.get("code").and_then(Value::as_i64).unwrap_or(0);
        if code != 0 {
            let message = response
                .get("message")
                .map(display_value)
                .unwrap_or_default();
            return Err(ApiError::decode(&url, format!("code {}: {}", code, message)));
        }

        let hits = response
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::decode(&url, "missing data array"))?;

        debug!("Milvus returned {} hits", hits.len());
        Ok(hits.iter().map(to_document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HttpClientConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn index(server: &MockServer, token: Option<&str>) -> MilvusIndex {
        let config = VectorConfig {
            milvus_url: server.uri(),
            milvus_token: token.map(str::to_string),
            ..VectorConfig::default()
        };
        MilvusIndex::new(ApiClient::new(&HttpClientConfig::default()).unwrap(), config)
    }

    #[tokio::test]
    async fn test_search_request_and_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/vectordb/entities/search"))
            .and(header("Authorization", "Bearer root:Milvus"))
            .and(body_json(json!({
                "collectionName": "multi_modal_rag",
                "data": [[0.5, 1.0]],
                "annsField": "embedding",
                "limit": 2,
                "outputFields": ["text", "source_file", "type", "doc_id"],
                "searchParams": {"metricType": "IP", "params": {"nprobe": 10}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "data": [
                    {"distance": 0.75, "doc_id": "d1", "text": "isi", "source_file": "a.pdf", "type": "text"},
                    {"distance": 0.5, "doc_id": 7, "text": null}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let docs = index(&server, Some("root:Milvus"))
            .search(&[0.5, 1.0], 2)
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "d1");
        assert_eq!(docs[0].kind, "text");
        assert_eq!(docs[0].score, 0.75);
        assert_eq!(docs[1].id, "7");
        assert_eq!(docs[1].text, "");
        assert_eq!(docs[1].source_file, "");
    }

    #[tokio::test]
    async fn test_search_error_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 100,
                "message": "collection not found"
            })))
            .mount(&server)
            .await;

        let err = index(&server, None).search(&[1.0], 5).await.unwrap_err();
        assert!(err.to_string().contains("collection not found"));
    }
}

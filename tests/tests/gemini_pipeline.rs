use application::answer_service::AnswerGenerator;
use application::ingest_service::IngestionPipeline;
use application::rag_service::RagService;
use application::retrieval_service::Retriever;
use infrastructure::config::Config;
use infrastructure::embedding_storage::ParagraphStore;
use infrastructure::gemini_client::GeminiClient;
use serde_json::json;
use std::sync::Arc;
use tests::HashEmbedder;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rag_against(server: &MockServer, key: Option<&str>) -> RagService {
    let config = Config::from_lookup(|name| match name {
        "GEMINI_BASE_URL" => Some(server.uri()),
        "GEMINI_KEY" => key.map(String::from),
        "HTTP_MAX_RETRIES" => Some("0".to_string()),
        _ => None,
    });
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(ParagraphStore::in_memory().unwrap());
    IngestionPipeline::new(embedder.clone(), store.clone())
        .ingest_text("Rice needs water.\n\nRice grows in warm climates.")
        .unwrap();
    RagService::new(
        Retriever::new(embedder, store),
        AnswerGenerator::new(Arc::new(GeminiClient::new(&config).unwrap())),
        config.top_k,
    )
}

#[tokio::test]
async fn test_question_round_trip_through_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "farm-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "```json\nRice needs plenty of water.\n```" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rag = rag_against(&server, Some("farm-key"));
    let answer = rag.query("Does rice need water?").await.unwrap();
    assert_eq!(answer, "Rice needs plenty of water.");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Rice needs water."));
    assert!(prompt.contains("User Query: Does rice need water?"));
}

#[tokio::test]
async fn test_http_error_aborts_the_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let rag = rag_against(&server, Some("wrong"));
    let err = rag.query("anything").await.unwrap_err();
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn test_missing_key_fails_at_first_use() {
    let server = MockServer::start().await;
    let rag = rag_against(&server, None);
    let err = rag.query("anything").await.unwrap_err();
    assert!(err.to_string().contains("GEMINI_KEY"));
}

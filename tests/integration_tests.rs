use httpmock::prelude::*;
use pokemon_report::{
    FunTranslationsClient, LocalStorage, PokeApiClient, ReportEngine, ReportError,
    ReportGenerator, ReportOutcome, ReportRequest,
};
use tempfile::TempDir;

fn pikachu_body() -> serde_json::Value {
    serde_json::json!({
        "name": "pikachu",
        "height": 40,
        "weight": 60,
        "abilities": [
            {"ability": {"name": "static"}},
            {"ability": {"name": "lightning-rod"}}
        ]
    })
}

fn request(pokemon: &str) -> ReportRequest {
    ReportRequest {
        pokemon: pokemon.to_string(),
        translate_subject: None,
        output: "pokemon_report.pdf".to_string(),
    }
}

fn engine(
    server: &MockServer,
    temp_dir: &TempDir,
) -> ReportEngine<PokeApiClient, FunTranslationsClient, LocalStorage> {
    let lookup = PokeApiClient::new(server.url("/api/v2/pokemon/{name}"));
    let translator = FunTranslationsClient::new(server.url("/translate/pokemon.json"));
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());
    let generator = ReportGenerator::new(storage).with_html_file("pokemon_report.html");
    ReportEngine::new(lookup, translator, generator)
}

#[tokio::test]
async fn test_end_to_end_report_with_mocked_services() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let lookup_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/pikachu");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(pikachu_body());
        })
        .await;
    let translate_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/translate/pokemon.json")
                .query_param("text", "pikachu");
            then.status(200).json_body(serde_json::json!({
                "contents": {"translated": "Test Pikachu123"}
            }));
        })
        .await;

    let outcome = engine(&server, &temp_dir).run(&request("pikachu")).await.unwrap();

    lookup_mock.assert_async().await;
    translate_mock.assert_async().await;
    assert_eq!(outcome.to_string(), "PDF report saved as pokemon_report.pdf");

    let pdf_path = temp_dir.path().join("pokemon_report.pdf");
    assert!(pdf_path.exists());

    let html = std::fs::read_to_string(temp_dir.path().join("pokemon_report.html")).unwrap();
    assert!(html.contains("Test Pikachu123"));
    assert!(html.contains("Height: 40"));
    assert!(html.contains("Weight: 60"));
    assert!(html.contains("static, lightning-rod"));

    let doc = lopdf::Document::load(&pdf_path).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn test_end_to_end_not_found_skips_translation() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let lookup_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/asdlfjsaf");
            then.status(404).body("Not Found");
        })
        .await;
    let translate_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/translate/pokemon.json");
            then.status(200)
                .json_body(serde_json::json!({"contents": {"translated": "unused"}}));
        })
        .await;

    let outcome = engine(&server, &temp_dir).run(&request("asdlfjsaf")).await.unwrap();

    lookup_mock.assert_async().await;
    assert_eq!(translate_mock.hits_async().await, 0);
    assert_eq!(outcome, ReportOutcome::NotFound);
    assert_eq!(outcome.to_string(), "Pokemon not found.");
    assert!(!temp_dir.path().join("pokemon_report.pdf").exists());
    assert!(!temp_dir.path().join("pokemon_report.html").exists());
}

#[tokio::test]
async fn test_end_to_end_lookup_failure_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/pikachu");
            then.status(502);
        })
        .await;

    let err = engine(&server, &temp_dir)
        .run(&request("pikachu"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::ServiceError { status: 502, .. }));
    assert!(!temp_dir.path().join("pokemon_report.pdf").exists());
}

#[tokio::test]
async fn test_end_to_end_translation_rate_limited() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/pokemon/pikachu");
            then.status(200).json_body(pikachu_body());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/translate/pokemon.json");
            then.status(429).json_body(serde_json::json!({
                "error": {"code": 429, "message": "Too Many Requests: Rate limit of 5 requests per hour exceeded."}
            }));
        })
        .await;

    let err = engine(&server, &temp_dir)
        .run(&request("pikachu"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::ServiceError { status: 429, .. }));
    assert!(!temp_dir.path().join("pokemon_report.pdf").exists());
}

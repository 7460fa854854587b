// API Integration Tests
//
// Purpose: Exercise every endpoint against the built-in fixture catalog
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use recipe_scorer_rust::{create_router, AppState, Catalog, EngineConfig, SustainabilityScorer};
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app over the fixture catalog
    fn create_test_app() -> axum::Router {
        let config = EngineConfig::default();
        let scorer = SustainabilityScorer::new(config.scoring.clone());
        let (catalog, report) = Catalog::fixture(&scorer);
        create_router(AppState::from_catalog(config, catalog, report, None))
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    async fn text_response(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body.to_vec()).expect("Response is not UTF-8")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["recipes"], 11);
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Search
    // =========================================================================

    #[tokio::test]
    async fn test_search_group_c_orders_by_sustainability() {
        let response = create_test_app()
            .oneshot(get("/api/search?q=marha%2C%20hagyma&group=C"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["group"], "C");
        let results = body["results"].as_array().unwrap();
        assert!(!results.is_empty());

        let position = |name: &str| results.iter().position(|r| r["name"] == name).unwrap();
        assert!(position("Lencseleves") < position("Marhapörkölt"));

        let indices: Vec<f64> = results
            .iter()
            .map(|r| r["scores"]["sustainability_index"].as_f64().unwrap())
            .collect();
        assert!(indices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_search_group_a_hides_scores() {
        let response = create_test_app()
            .oneshot(get("/api/search?q=hagyma&group=A"))
            .await
            .unwrap();
        let body = json_response(response).await;

        for result in body["results"].as_array().unwrap() {
            assert!(result.get("scores").is_none());
            assert_eq!(result["explanation_available"], false);
        }
    }

    #[tokio::test]
    async fn test_search_uses_participant_group() {
        // "abd" hashes to group B
        let response = create_test_app()
            .oneshot(get("/api/search?q=paradicsom&participant=abd"))
            .await
            .unwrap();
        let body = json_response(response).await;
        assert_eq!(body["group"], "B");
    }

    #[tokio::test]
    async fn test_search_requires_group() {
        let response = create_test_app().oneshot(get("/api/search?q=hagyma")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = create_test_app()
            .oneshot(get("/api/search?q=hagyma&group=Z"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("Unknown test group"));
    }

    #[tokio::test]
    async fn test_empty_query_returns_empty_results() {
        let response = create_test_app().oneshot(get("/api/search?q=&group=B")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["count"], 0);
    }

    // =========================================================================
    // Section 3: Recipes and explanations
    // =========================================================================

    #[tokio::test]
    async fn test_get_recipe() {
        let response = create_test_app().oneshot(get("/api/recipes/1?group=B")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["name"], "Lencseleves");
        assert_eq!(body["category_label"], "Leves");
        assert_eq!(body["scores"]["band"]["label"], "Excellent");
    }

    #[tokio::test]
    async fn test_get_recipe_not_found() {
        let response = create_test_app().oneshot(get("/api/recipes/9999?group=B")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_explanation_for_group_c() {
        let response = create_test_app()
            .oneshot(get("/api/recipes/2/explanation?group=C"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["recipe_id"], 2);
        assert_eq!(body["source"]["kind"], "rule_based");
        let suggestions = body["suggestions"].as_array().unwrap();
        assert!((1..=3).contains(&suggestions.len()));
    }

    #[tokio::test]
    async fn test_explanation_markdown() {
        let response = create_test_app()
            .oneshot(get("/api/recipes/1/explanation?group=C&format=markdown"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let text = text_response(response).await;
        assert!(text.starts_with("# Why this score?"));
    }

    #[tokio::test]
    async fn test_explanation_forbidden_for_group_b() {
        let response = create_test_app()
            .oneshot(get("/api/recipes/2/explanation?group=B"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // =========================================================================
    // Section 4: Participants and choices
    // =========================================================================

    #[tokio::test]
    async fn test_register_and_return() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(post_json("/api/participants", json!({"participant_id": "abe"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_response(response).await;
        assert_eq!(body["test_group"], "C");
        assert_eq!(body["session_count"], 1);

        let response = app
            .oneshot(post_json("/api/participants", json!({"participant_id": "abe"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["session_count"], 2);
    }

    #[tokio::test]
    async fn test_register_blank_id() {
        let response = create_test_app()
            .oneshot(post_json("/api/participants", json!({"participant_id": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_choice_flow_and_export() {
        let app = create_test_app();

        app.clone()
            .oneshot(post_json("/api/participants", json!({"participant_id": "p-1"})))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/choices",
                json!({
                    "participant_id": "p-1",
                    "recipe_id": 1,
                    "rank": 2,
                    "query": "lencse",
                    "decision_time_seconds": 7.5,
                    "source": "search"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_response(response).await;
        assert_eq!(body["recipe_name"], "Lencseleves");
        assert_eq!(body["sustainability_index"], 86.8);

        let response = app.oneshot(get("/api/choices/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let csv = text_response(response).await;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("p-1,"));
    }

    #[tokio::test]
    async fn test_choice_requires_registered_participant() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/choices",
                json!({"participant_id": "ghost", "recipe_id": 1, "rank": 1, "source": "details"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

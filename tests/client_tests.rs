//! Integration tests for `PredictionClient` against mocked prediction
//! services.
//!
//! Covers:
//! - Request bodies carry exactly the widget's keys as raw strings
//! - Success bodies for each widget decode into the right prediction
//! - Non-2xx statuses, transport failures and malformed bodies
//! - The `/info` health check

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prediction_forms::form::{FormEvent, PredictionForm};
use prediction_forms::prediction::Prediction;
use prediction_forms::{ClientConfig, DisplayMode, FormEffect, PredictionClient, SubmitError, WidgetKind};

fn client_for(server: &MockServer) -> PredictionClient {
    let config = ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    };
    PredictionClient::new(&config).expect("test: client")
}

fn banknote_payload() -> serde_json::Map<String, serde_json::Value> {
    let mut form = PredictionForm::new(WidgetKind::BankNote);
    form.fill([("var", "3.6216"), ("skew", "8.6661"), ("curt", "-2.8073"), ("entr", "-0.44699")]);
    form.inputs().payload()
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn test_banknote_request_body_is_raw_field_strings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/banknote/authenticate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "var": "3.6216",
            "skew": "8.6661",
            "curt": "-2.8073",
            "entr": "-0.44699"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prediction": 1,
            "probability": [[0.1, 0.9]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prediction = client_for(&server)
        .predict(WidgetKind::BankNote, &banknote_payload())
        .await
        .expect("test: prediction");

    let Prediction::BankNote(note) = prediction else {
        panic!("expected banknote prediction, got {prediction:?}");
    };
    assert_eq!(note.label(), "Authentic Note");
    assert_eq!(note.confidence_text().as_deref(), Some("90.00%"));
}

#[tokio::test]
async fn test_bitcoin_sends_only_price() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bitcoin/predict"))
        .and(body_json(json!({"price": "45000"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_price": 45000,
            "predicted_price": 45500,
            "price_change": 500,
            "price_change_percent": 1.11,
            "prediction_timeframe": "2 minutes"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = PredictionForm::new(WidgetKind::Bitcoin);
    form.fill([("price", "45000")]);
    let prediction = client_for(&server)
        .predict(WidgetKind::Bitcoin, &form.inputs().payload())
        .await
        .expect("test: prediction");

    let Prediction::Bitcoin(p) = prediction else {
        panic!("expected bitcoin prediction");
    };
    assert_eq!(p.change_line().text, "+500 (+1.11%)");
    assert_eq!(p.prediction_timeframe.as_deref(), Some("2 minutes"));
}

#[tokio::test]
async fn test_breast_cancer_body_has_all_thirty_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/breastcancer/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prediction_label": "Benign",
            "confidence": 87.345,
            "feature_importance": [{"feature": "x", "label": "X", "importance": 0.42}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = PredictionForm::new(WidgetKind::BreastCancer);
    for field in WidgetKind::BreastCancer.fields() {
        form.update(FormEvent::Edit {
            key: field.key.into(),
            value: "1.0".into(),
        });
    }
    let client = client_for(&server);
    let FormEffect::Dispatch(ticket) = form.update(FormEvent::Submit) else {
        panic!("expected dispatch");
    };
    form.update(FormEvent::Resolved(client.dispatch(ticket).await));

    let requests = server.received_requests().await.expect("test: recording on");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("test: json body");
    let object = body.as_object().expect("test: object body");
    assert_eq!(object.len(), 30);
    assert_eq!(object["mean concave points"], "1.0");

    let DisplayMode::Success(Prediction::BreastCancer(p)) = form.mode() else {
        panic!("expected success, got {:?}", form.mode());
    };
    assert_eq!(p.confidence_text(), "87.35%");
}

#[tokio::test]
async fn test_diabetes_uses_configured_absolute_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prediction": 151.5})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ClientConfig {
        base_url: "http://unused.invalid".into(),
        ..ClientConfig::default()
    };
    config
        .endpoints
        .insert(WidgetKind::Diabetes, format!("{}/predict", server.uri()));
    let client = PredictionClient::new(&config).expect("test: client");

    let mut form = PredictionForm::new(WidgetKind::Diabetes);
    for key in ["age", "bmi", "bp", "s1", "s2", "s3", "s4", "s5", "s6"] {
        form.fill([(key, "0.01")]);
    }
    let prediction = client
        .predict(WidgetKind::Diabetes, &form.inputs().payload())
        .await
        .expect("test: prediction");
    assert!(matches!(prediction, Prediction::Diabetes(p) if p.prediction == 151.5));
}

#[tokio::test]
async fn test_base_url_path_prefix_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ml/api/bitcoin/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_price": 45000,
            "predicted_price": 44000,
            "price_change": -1000,
            "price_change_percent": -2.22
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        base_url: format!("{}/ml", server.uri()),
        ..ClientConfig::default()
    };
    let client = PredictionClient::new(&config).expect("test: client");
    let payload = serde_json::Map::from_iter([("price".to_string(), json!("45000"))]);
    let prediction = client
        .predict(WidgetKind::Bitcoin, &payload)
        .await
        .expect("test: prediction");
    assert!(matches!(prediction, Prediction::Bitcoin(ref p) if p.change_line().text == "-1000 (-2.22%)"));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_http_500_yields_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/banknote/authenticate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict(WidgetKind::BankNote, &banknote_payload())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Server Error: 500");
}

#[tokio::test]
async fn test_backend_error_detail_is_kept_but_not_displayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/banknote/authenticate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "could not convert string to float: 'x'"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict(WidgetKind::BankNote, &banknote_payload())
        .await
        .unwrap_err();
    match &err {
        SubmitError::Server { status, detail } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(detail.as_deref(), Some("could not convert string to float: 'x'"));
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Server Error: 400");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Nothing listens on port 1.
    let config = ClientConfig {
        base_url: "http://127.0.0.1:1".into(),
        ..ClientConfig::default()
    };
    let client = PredictionClient::new(&config).expect("test: client");
    let err = client
        .predict(WidgetKind::BankNote, &banknote_payload())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Transport(ref msg) if !msg.is_empty()), "{err:?}");
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bitcoin/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let payload = serde_json::Map::from_iter([("price".to_string(), json!("1"))]);
    let err = client_for(&server)
        .predict(WidgetKind::Bitcoin, &payload)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Malformed { .. }));
    assert_eq!(err.to_string(), "Invalid response from prediction service");
}

#[tokio::test]
async fn test_missing_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/breastcancer/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prediction_label": "Malignant"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict(WidgetKind::BreastCancer, &serde_json::Map::new())
        .await
        .unwrap_err();
    match err {
        SubmitError::Malformed { detail } => assert!(detail.contains("confidence"), "{detail}"),
        other => panic!("expected malformed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/diabetes/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"prediction": 1.0}))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        base_url: server.uri(),
        timeout_secs: Some(1),
        ..ClientConfig::default()
    };
    let client = PredictionClient::new(&config).expect("test: client");
    let err = client
        .predict(WidgetKind::Diabetes, &serde_json::Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Transport(_)), "{err:?}");
}

// ============================================================================
// Health check
// ============================================================================

#[tokio::test]
async fn test_info_reports_status_and_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "API is running",
            "models": ["diabetes", "banknote"]
        })))
        .mount(&server)
        .await;

    let info = client_for(&server).info().await.expect("test: info");
    assert_eq!(info.status, "API is running");
    assert_eq!(info.models, ["diabetes", "banknote"]);
}

#[tokio::test]
async fn test_info_non_2xx_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).info().await.unwrap_err();
    assert_eq!(err.to_string(), "Server Error: 503");
}

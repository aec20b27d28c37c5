mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use taxi_moto_fleet::controllers::auth_controller::AuthController;
use taxi_moto_fleet::create_app_router;

use common::*;

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let app = create_app_router(test_state());
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_private_routes_require_token() {
    let app = create_app_router(test_state());
    let (status, body) = send(&app, Method::GET, "/motos/", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_register_login_and_logout() {
    let app = create_app_router(test_state());

    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "username": "kossi",
            "password": PASSWORD,
            "password_confirm": PASSWORD,
            "phone": "+228 90 12 34 56",
            "address": "Lomé"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "driver");

    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "username": "kossi", "password": "mauvais-mot" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "username": "kossi", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "kossi");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, _) = send(&app, Method::POST, "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seeded_admin_can_log_in() {
    let config = taxi_moto_fleet::config::EnvironmentConfig {
        admin_username: Some("patron".to_string()),
        admin_password: Some(PASSWORD.to_string()),
        ..test_config()
    };
    let state = taxi_moto_fleet::AppState::in_memory(config);
    let (username, password) = state.config.admin_credentials().unwrap();
    let auth = AuthController::new(&state);

    assert!(auth.ensure_admin(username, password).await.unwrap());
    // Segundo arranque: no duplica ni falla
    assert!(!auth.ensure_admin(username, password).await.unwrap());

    let app = create_app_router(state);
    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "username": "patron", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::GET, "/bilan-general/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let state = test_state();
    let driver = create_driver(&state, "kossi").await;
    let token = token_for(&state, &driver);
    let app = create_app_router(state);

    let (status, _) = send(&app, Method::GET, "/bilan-general/", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/dashboard/conducteur/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_assignment_conflict_over_http() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let d1 = create_driver(&state, "kossi").await;
    let d2 = create_driver(&state, "yao").await;
    let token = token_for(&state, &admin);
    let app = create_app_router(state);

    let (status, body) = send(
        &app,
        Method::POST,
        "/motos/",
        Some(&token),
        Some(json!({ "name": "Haojue 1", "plate": "tg-1001-aa" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["plate"], "TG-1001-AA");
    let vehicle_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        "/attribuer-moto/",
        Some(&token),
        Some(json!({ "vehicle_id": vehicle_id, "driver_id": driver_id(&d1) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/attribuer-moto/",
        Some(&token),
        Some(json!({ "vehicle_id": vehicle_id, "driver_id": driver_id(&d2) })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = send(&app, Method::GET, &format!("/moto/{}/", vehicle_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "assigned");
    assert_eq!(body["data"]["driver"]["username"], "kossi");
}

#[tokio::test]
async fn test_public_question_form_and_faq() {
    let state = test_state();
    let admin = create_admin(&state).await;
    let token = token_for(&state, &admin);
    let app = create_app_router(state);

    let question = json!({
        "name": "Ama",
        "email": "ama@example.com",
        "subject": "Horaires",
        "message": "Travaillez-vous le dimanche ?"
    });

    let (status, body) = send(&app, Method::POST, "/poser-question/", None, Some(question.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("email").is_none());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::POST, "/poser-question/", None, Some(question)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::GET, &format!("/faq/{}/", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/questions/{}/repondre/", id),
        Some(&token),
        Some(json!({ "reply": "Oui, de 6h à 20h." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/faq/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sitemap_is_xml() {
    let app = create_app_router(test_state());
    let request = Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let xml = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("/faq/"));
}

#[tokio::test]
async fn test_public_forms_are_rate_limited() {
    let mut config = test_config();
    config.rate_limit_requests = 2;
    let app = create_app_router(taxi_moto_fleet::AppState::in_memory(config));

    let form = |i: u32| {
        json!({
            "full_name": "Ama Dzifa",
            "phone": "+228 92 22 22 22",
            "pickup": "Bè",
            "dropoff": format!("Arrêt {}", i)
        })
    };

    for i in 0..2 {
        let (status, _) = send(&app, Method::POST, "/reservation-rapide/", None, Some(form(i))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(&app, Method::POST, "/reservation-rapide/", None, Some(form(3))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

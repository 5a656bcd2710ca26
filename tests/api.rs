//! Integration tests for the REST API.

use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};
use std::time::Duration;
use tournament_bracket_web::api::{self, remove_inactive};

macro_rules! service {
    ($state:expr) => {
        test::init_service(App::new().app_data($state.clone()).configure(api::configure)).await
    };
}

#[actix_web::test]
async fn health_reports_ok() {
    let state = api::new_state();
    let app = service!(state);
    let resp: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp["ok"], true);
}

#[actix_web::test]
async fn only_api_routes_are_served() {
    let state = api::new_state();
    let app = service!(state);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/favicon.ico").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_update_and_read_back() {
    let state = api::new_state();
    let app = service!(state);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Friday Cup", "participants": ["Ann"], "participants_text": "Bob, Cid\nDee" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["matches"].as_array().unwrap().len(), 3);
    assert_eq!(created["participants"][1]["name"], "Bob");
    assert_eq!(created["status"], "created");

    let req = test::TestRequest::put()
        .uri(&format!("/api/tournaments/{id}/matches/1"))
        .set_json(json!({ "score_a": 2, "score_b": 1 }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["touched"], json!([1, 3]));
    let ann = created["participants"][0]["id"].clone();
    assert_eq!(updated["tournament"]["matches"][0]["winner"], ann);
    assert_eq!(updated["tournament"]["matches"][2]["slot_a"], json!({ "state": "filled", "ref": ann }));
    assert_eq!(updated["tournament"]["status"], "in_progress");

    let req = test::TestRequest::get().uri(&format!("/api/tournaments/{id}/stats")).to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["completed_matches"], 1);
    assert_eq!(stats["most_wins"], ann);
}

#[actix_web::test]
async fn invalid_input_and_unknown_ids() {
    let state = api::new_state();
    let app = service!(state);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup", "participants": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup", "participants": ["Ann", "ann"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/tournaments/00000000-0000-0000-0000-000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup", "participants": ["Ann", "Bob"] }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/tournaments/{id}/matches/9"))
        .set_json(json!({ "score_a": 1, "score_b": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn config_update_and_delete() {
    let state = api::new_state();
    let app = service!(state);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup", "kind": "team", "participants": ["Red Team", "Blue Team"] }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["participants"][0]["name"], "Red Team");

    let req = test::TestRequest::put()
        .uri(&format!("/api/tournaments/{id}/config"))
        .set_json(json!({ "allow_draws": true }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["config"]["allow_draws"], true);
    assert_eq!(updated["config"]["points_per_win"], 3);

    let req = test::TestRequest::delete().uri(&format!("/api/tournaments/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&format!("/api/tournaments/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn inactive_tournaments_are_swept() {
    let state = api::new_state();
    let app = service!(state);
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup", "participants": ["Ann", "Bob"] }))
        .to_request();
    let _: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(remove_inactive(&state, Duration::from_secs(3600)), 0);
    assert_eq!(remove_inactive(&state, Duration::ZERO), 1);
    assert!(state.read().unwrap().is_empty());
}

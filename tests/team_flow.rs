use actix_web::{http::StatusCode, test};

mod common;
use common::{client::TestClient, test_data, TestContext};

#[tokio::test]
async fn test_team_creation_returns_roster() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/team/add")
        .set_json(test_data::team_payload(
            "payments",
            &[("u1", "Alice", true), ("u2", "Bob", true), ("u3", "Cara", false)],
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["team"]["team_name"], "payments");
    let members = body["team"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 3);
    // roster is listed in user_id order
    assert_eq!(members[0]["user_id"], "u1");
    assert_eq!(members[1]["user_id"], "u2");
    assert_eq!(members[2]["user_id"], "u3");
    assert_eq!(members[2]["is_active"], false);

    // verify through the read side as well
    let team = ctx.db.get_team("payments").await.unwrap();
    assert_eq!(team.members.len(), 3);
}

#[tokio::test]
async fn test_duplicate_team_name_is_rejected_without_member_writes() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/team/add")
        .set_json(test_data::team_payload("core", &[("u1", "Alice", true)]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // second creation with the same name must fail and must not touch u1
    let req = test::TestRequest::post()
        .uri("/team/add")
        .set_json(test_data::team_payload("core", &[("u1", "Mallory", false)]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "TEAM_EXISTS");

    let user = ctx.db.get_user("u1").await.unwrap();
    assert_eq!(user.username, "Alice");
    assert!(user.is_active);
}

#[tokio::test]
async fn test_member_with_empty_username_fails_whole_creation() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/team/add")
        .set_json(test_data::team_payload(
            "broken",
            &[("u1", "Alice", true), ("u2", "", true)],
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // nothing committed: neither the team nor the valid first member
    assert!(ctx.db.get_team("broken").await.is_err());
    assert!(ctx.db.get_user("u1").await.is_err());
}

#[tokio::test]
async fn test_get_unknown_team_is_not_found() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/team/get?team_name=ghosts")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_readding_user_adopts_them_into_new_team() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/team/add")
        .set_json(test_data::team_payload("alpha", &[("u9", "Old Name", true)]))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    // the same user id joins another team; last writer wins on every field
    let req = test::TestRequest::post()
        .uri("/team/add")
        .set_json(test_data::team_payload("beta", &[("u9", "New Name", false)]))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let user = ctx.db.get_user("u9").await.unwrap();
    assert_eq!(user.team_name.as_deref(), Some("beta"));
    assert_eq!(user.username, "New Name");
    assert!(!user.is_active);

    let alpha = ctx.db.get_team("alpha").await.unwrap();
    assert!(alpha.members.is_empty());
    let beta = ctx.db.get_team("beta").await.unwrap();
    assert_eq!(beta.members.len(), 1);
}

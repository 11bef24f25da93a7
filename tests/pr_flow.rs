use actix_web::{http::StatusCode, test};

mod common;
use common::{client::TestClient, test_data, TestContext};

async fn create_team(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    team: &str,
    members: &[(&str, &str, bool)],
) {
    let req = test::TestRequest::post()
        .uri("/team/add")
        .set_json(test_data::team_payload(team, members))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_pr_creation_assigns_two_active_teammates() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    create_team(
        &app,
        "payments",
        &[("u1", "Alice", true), ("u2", "Bob", true), ("u3", "Cara", true)],
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr1", "Test PR1", "u1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["pr"]["status"], "OPEN");
    let reviewers: Vec<&str> = body["pr"]["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(reviewers.len(), 2);
    assert!(!reviewers.contains(&"u1"));
    for r in &reviewers {
        assert!(["u2", "u3"].contains(r));
    }
}

#[tokio::test]
async fn test_pr_creation_with_small_pool_assigns_what_exists() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    // one eligible teammate
    create_team(&app, "duo", &[("d1", "Dana", true), ("d2", "Dave", true)]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr-duo", "Duo PR", "d1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["pr"]["assigned_reviewers"],
        serde_json::json!(["d2"])
    );

    // nobody eligible at all: still a valid PR, zero reviewers
    create_team(&app, "solo", &[("s1", "Sam", true)]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr-solo", "Solo PR", "s1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["pr"]["status"], "OPEN");
    assert!(body["pr"]["assigned_reviewers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_inactive_members_are_never_assigned() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    create_team(
        &app,
        "mixed",
        &[
            ("m1", "Mia", true),
            ("m2", "Max", false),
            ("m3", "Moe", true),
        ],
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr-mixed", "Mixed PR", "m1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["pr"]["assigned_reviewers"],
        serde_json::json!(["m3"])
    );
}

#[tokio::test]
async fn test_duplicate_pr_id_is_rejected() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    create_team(&app, "duo", &[("d1", "Dana", true), ("d2", "Dave", true)]).await;
    for (want, code) in [(StatusCode::CREATED, None), (StatusCode::CONFLICT, Some("PR_EXISTS"))] {
        let req = test::TestRequest::post()
            .uri("/pullRequest/create")
            .set_json(test_data::pr_payload("pr1", "PR", "d1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), want);
        if let Some(code) = code {
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["code"], code);
        }
    }
}

#[tokio::test]
async fn test_unknown_author_cannot_open_pr() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr1", "PR", "nobody"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_merge_is_idempotent_and_keeps_first_timestamp() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    create_team(&app, "duo", &[("d1", "Dana", true), ("d2", "Dave", true)]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr1", "PR", "d1"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(serde_json::json!({"pull_request_id": "pr1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(first["pr"]["status"], "MERGED");
    let merged_at = first["pr"]["merged_at"].clone();
    assert!(!merged_at.is_null());

    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(serde_json::json!({"pull_request_id": "pr1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(second["pr"]["status"], "MERGED");
    assert_eq!(second["pr"]["merged_at"], merged_at);
}

#[tokio::test]
async fn test_merge_unknown_pr_is_not_found() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(serde_json::json!({"pull_request_id": "ghost"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_reassign_on_merged_pr_fails_and_freezes_reviewers() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    create_team(&app, "duo", &[("d1", "Dana", true), ("d2", "Dave", true)]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr1", "PR", "d1"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(serde_json::json!({"pull_request_id": "pr1"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(serde_json::json!({"pull_request_id": "pr1", "old_user_id": "d2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "PR_MERGED");

    let pr = ctx.db.get_pull_request("pr1").await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["d2".to_string()]);
}

#[tokio::test]
async fn test_reassign_requires_target_to_be_assigned() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    create_team(
        &app,
        "trio",
        &[("t1", "Tia", true), ("t2", "Tom", true), ("t3", "Tod", true)],
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr1", "PR", "t1"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    // the author is never an assigned reviewer
    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(serde_json::json!({"pull_request_id": "pr1", "old_user_id": "t1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_ASSIGNED");
}

#[tokio::test]
async fn test_reassign_without_spare_candidate_keeps_old_reviewer() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    // author + two reviewers exhaust the team: no spare
    create_team(
        &app,
        "trio",
        &[("t1", "Tia", true), ("t2", "Tom", true), ("t3", "Tod", true)],
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr1", "PR", "t1"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(serde_json::json!({"pull_request_id": "pr1", "old_user_id": "t2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NO_CANDIDATE");

    let pr = ctx.db.get_pull_request("pr1").await.unwrap();
    assert!(pr.assigned_reviewers.contains(&"t2".to_string()));
}

#[tokio::test]
async fn test_reassign_swaps_in_the_spare_at_the_same_slot() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    create_team(
        &app,
        "quad",
        &[
            ("q1", "Quinn", true),
            ("q2", "Quil", true),
            ("q3", "Quip", true),
            ("q4", "Quen", true),
        ],
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(test_data::pr_payload("pr1", "PR", "q1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let reviewers: Vec<String> = body["pr"]["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    let old = reviewers[0].clone();
    let spare: String = ["q2", "q3", "q4"]
        .iter()
        .find(|id| !reviewers.contains(&id.to_string()))
        .unwrap()
        .to_string();

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(serde_json::json!({"pull_request_id": "pr1", "old_user_id": old}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["replaced_by"], spare.as_str());

    let updated: Vec<String> = body["pr"]["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    // the slot is replaced in place: same length, same position, no author,
    // no duplicates
    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0], spare);
    assert_eq!(updated[1], reviewers[1]);
    assert!(!updated.contains(&"q1".to_string()));
    assert!(!updated.contains(&old));
}

//! HTTP-level integration tests for the site settings singleton.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, put_multipart_auth, seed_admin, seed_user, upload_exists,
};
use sqlx::PgPool;

const BASE_FIELDS: &[(&str, &str)] = &[
    ("siteName", "Tripdesk Travel"),
    ("description", "Your next trip starts here"),
];

#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_null_until_first_write(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool, dir.path());
    let response = get_auth(app, "/api/v1/settings", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_upsert_round_trip(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_multipart_auth(app, "/api/v1/settings", &token, BASE_FIELDS, &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["site_name"], "Tripdesk Travel");
    assert_eq!(json["is_online"], true);

    // A second write updates the same singleton row.
    let fields = [
        ("siteName", "Tripdesk"),
        ("isOnline", "false"),
        ("smtpHost", "smtp.example.com"),
        ("smtpPort", "587"),
    ];
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_multipart_auth(app, "/api/v1/settings", &token, &fields, &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["site_name"], "Tripdesk");
    assert_eq!(json["is_online"], false);
    assert_eq!(json["smtp_port"], 587);

    let app = common::build_test_app(pool, dir.path());
    let response = get_auth(app, "/api/v1/settings", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["site_name"], "Tripdesk");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logo_replacement_deletes_old_file(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_multipart_auth(
        app,
        "/api/v1/settings",
        &token,
        BASE_FIELDS,
        &[("logo", "logo-v1.png", b"logo one")],
    )
    .await;
    let json = body_json(response).await;
    let old_logo = json["logo"].as_str().unwrap().to_string();
    assert!(old_logo.starts_with("/uploads/logos/"));
    assert!(upload_exists(dir.path(), &old_logo));

    let app = common::build_test_app(pool, dir.path());
    let response = put_multipart_auth(
        app,
        "/api/v1/settings",
        &token,
        BASE_FIELDS,
        &[("logo", "logo-v2.png", b"logo two")],
    )
    .await;
    let json = body_json(response).await;
    let new_logo = json["logo"].as_str().unwrap();
    assert_ne!(new_logo, old_logo);
    assert!(upload_exists(dir.path(), new_logo));
    assert!(!upload_exists(dir.path(), &old_logo));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_remove_logo_flag(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_multipart_auth(
        app,
        "/api/v1/settings",
        &token,
        BASE_FIELDS,
        &[("logo", "logo.png", b"logo")],
    )
    .await;
    let logo = body_json(response).await["logo"]
        .as_str()
        .unwrap()
        .to_string();

    let mut fields = BASE_FIELDS.to_vec();
    fields.push(("removeLogo", "true"));
    let app = common::build_test_app(pool, dir.path());
    let response = put_multipart_auth(app, "/api/v1/settings", &token, &fields, &[]).await;
    let json = body_json(response).await;
    assert!(json["logo"].is_null());
    assert!(!upload_exists(dir.path(), &logo));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_requires_admin(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, user_token) = seed_user(&pool, "viewer@example.com", "user").await;

    let app = common::build_test_app(pool, dir.path());
    let response = get_auth(app, "/api/v1/settings", &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

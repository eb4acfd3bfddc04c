//! HTTP-level integration tests for the package type and article category
//! taxonomies, including the referenced-delete guard.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_admin};
use sqlx::PgPool;
use tripdesk_core::slug::generate_slug;
use tripdesk_core::types::DbId;
use tripdesk_db::models::article::ArticleInput;
use tripdesk_db::models::package::PackageInput;
use tripdesk_db::repositories::{ArticleRepo, PackageRepo};

async fn seed_package(pool: &PgPool, type_id: DbId) {
    let input = PackageInput {
        title: "Referencing Trip".to_string(),
        code: "REF-1".to_string(),
        description: "desc".to_string(),
        location: "Lisbon".to_string(),
        price: 100.0,
        start_date: Utc::now(),
        end_date: Utc::now(),
        max_guests: 2,
        dormitories: 0,
        suites: 0,
        bathrooms: 1,
        number_of_days: 3,
        status: "ACTIVE".to_string(),
        type_id,
    };
    PackageRepo::create(pool, &input, &generate_slug(&input.title), &[])
        .await
        .unwrap();
}

async fn seed_article(pool: &PgPool, category_id: DbId) {
    let input = ArticleInput {
        title: "Referencing Article".to_string(),
        content: "Body".to_string(),
        excerpt: String::new(),
        image_url: None,
        published: true,
        category_id,
    };
    ArticleRepo::create(pool, &input, &generate_slug(&input.title))
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Package types
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_list_package_types_with_counts(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/package-types",
        &token,
        serde_json::json!({"name": "Beach", "description": "Sun and sand"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let type_id = created["id"].as_i64().unwrap();

    seed_package(&pool, type_id).await;

    let app = common::build_test_app(pool, dir.path());
    let response = get_auth(app, "/api/v1/package-types", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let listed = json
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == type_id)
        .unwrap();
    assert_eq!(listed["name"], "Beach");
    assert_eq!(listed["package_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_package_type_name_returns_409(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/package-types",
        &token,
        serde_json::json!({"name": "Beach"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool, dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/package-types",
        &token,
        serde_json::json!({"name": "Beach"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_referenced_package_type_returns_409(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/package-types",
        &token,
        serde_json::json!({"name": "Beach"}),
    )
    .await;
    let type_id = body_json(response).await["id"].as_i64().unwrap();
    seed_package(&pool, type_id).await;

    let app = common::build_test_app(pool, dir.path());
    let response = delete_auth(app, &format!("/api/v1/package-types/{type_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_unreferenced_package_type_succeeds(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/package-types",
        &token,
        serde_json::json!({"name": "Ephemeral"}),
    )
    .await;
    let type_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool, dir.path());
    let response = delete_auth(app, &format!("/api/v1/package-types/{type_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_package_type(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/package-types",
        &token,
        serde_json::json!({"name": "Old Name"}),
    )
    .await;
    let type_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool, dir.path());
    let response = put_json_auth(
        app,
        &format!("/api/v1/package-types/{type_id}"),
        &token,
        serde_json::json!({"name": "New Name", "description": "Updated"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "New Name");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_package_type_name_returns_400(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool, dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/package-types",
        &token,
        serde_json::json!({"name": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Article categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_article_category_counts_and_delete_guard(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/article-categories",
        &token,
        serde_json::json!({"name": "Guides"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category_id = body_json(response).await["id"].as_i64().unwrap();
    seed_article(&pool, category_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get_auth(app, "/api/v1/article-categories", &token).await;
    let json = body_json(response).await;
    let listed = json
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == category_id)
        .unwrap();
    assert_eq!(listed["article_count"], 1);

    let app = common::build_test_app(pool, dir.path());
    let response = delete_auth(
        app,
        &format!("/api/v1/article-categories/{category_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_unreferenced_article_category_succeeds(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json_auth(
        app,
        "/api/v1/article-categories",
        &token,
        serde_json::json!({"name": "Empty"}),
    )
    .await;
    let category_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool, dir.path());
    let response = delete_auth(
        app,
        &format!("/api/v1/article-categories/{category_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

//! HTTP-level integration tests for the `/users` endpoints, including the
//! self-scoped mutation checks.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get_auth, login_user, patch_json_auth, post_json,
};
use sqlx::PgPool;
use taskhive_db::repositories::UserRepo;

/// Registration creates an account and returns the sanitized view.
#[sqlx::test(migrations = "../../migrations")]
async fn test_register(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "username": "newbie",
        "email": "newbie@test.com",
        "password": "a-long-enough-password"
    });
    let response = post_json(app, "/api/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "newbie");
    assert_eq!(json["email"], "newbie@test.com");
    assert!(json.get("password_hash").is_none(), "hash must not leak");

    // The stored hash must verify against the registration password.
    let user = UserRepo::find_by_email(&pool, "newbie@test.com")
        .await
        .unwrap()
        .expect("user must exist");
    assert!(
        taskhive_api::auth::password::verify_password(
            "a-long-enough-password",
            &user.password_hash
        )
        .unwrap(),
        "stored hash must match the registration password"
    );
}

/// Registering a duplicate email is rejected.
#[sqlx::test(migrations = "../../migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "taken").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "other",
        "email": "taken@test.com",
        "password": "whatever-password"
    });
    let response = post_json(app, "/api/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Email already in use");
}

/// Fetching a user by id requires authentication.
#[sqlx::test(migrations = "../../migrations")]
async fn test_get_user_requires_auth(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "lookmeup").await;

    let response = common::get(
        common::build_test_app(pool),
        &format!("/api/v1/users/{}", user.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A principal can update its own account; `updated_at` moves forward.
#[sqlx::test(migrations = "../../migrations")]
async fn test_patch_own_account(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "renamer").await;
    let token = login_user(common::build_test_app(pool.clone()), "renamer@test.com", &password).await;

    let body = serde_json::json!({ "username": "renamed" });
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{}", user.id),
        body,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "renamed");

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "renamed");
    assert!(stored.updated_at > user.updated_at);
}

/// Changing the password re-hashes it and the new password logs in.
#[sqlx::test(migrations = "../../migrations")]
async fn test_patch_password(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "rotator").await;
    let token = login_user(common::build_test_app(pool.clone()), "rotator@test.com", &password).await;

    let body = serde_json::json!({ "password": "brand-new-password" });
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{}", user.id),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let _token = login_user(
        common::build_test_app(pool),
        "rotator@test.com",
        "brand-new-password",
    )
    .await;
}

/// Updating someone else's account is 401 and leaves it unchanged.
#[sqlx::test(migrations = "../../migrations")]
async fn test_patch_other_account_is_unauthorized(pool: PgPool) {
    let (target, _target_password) = create_test_user(&pool, "target").await;
    let (_attacker, password) = create_test_user(&pool, "attacker").await;
    let attacker_token = login_user(
        common::build_test_app(pool.clone()),
        "attacker@test.com",
        &password,
    )
    .await;

    let body = serde_json::json!({ "username": "pwned" });
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{}", target.id),
        body,
        &attacker_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stored = UserRepo::find_by_id(&pool, target.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "target", "account must be unchanged");
}

/// A patch with zero effective fields is a 400.
#[sqlx::test(migrations = "../../migrations")]
async fn test_patch_with_no_fields_is_bad_request(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "noop").await;
    let token = login_user(common::build_test_app(pool.clone()), "noop@test.com", &password).await;

    let body = serde_json::json!({});
    let response = patch_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/users/{}", user.id),
        body,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Empty-string fields count as absent: the patch is a 400 and nothing
/// is committed, in particular no empty password is ever stored.
#[sqlx::test(migrations = "../../migrations")]
async fn test_patch_with_empty_strings_is_bad_request(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "blanker").await;
    let token = login_user(common::build_test_app(pool.clone()), "blanker@test.com", &password).await;

    let bodies = [
        serde_json::json!({ "username": "" }),
        serde_json::json!({ "password": "" }),
        serde_json::json!({ "username": "", "email": "", "password": "" }),
    ];
    for body in bodies {
        let response = patch_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/users/{}", user.id),
            body.clone(),
            &token,
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {body} must be rejected"
        );
    }

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "blanker", "username must be unchanged");
    assert_eq!(stored.updated_at, user.updated_at, "row must be untouched");

    // The original password still logs in; no empty password was stored.
    let _token = login_user(common::build_test_app(pool), "blanker@test.com", &password).await;
}

/// A principal can delete its own account.
#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_own_account(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "leaver").await;
    let token = login_user(common::build_test_app(pool.clone()), "leaver@test.com", &password).await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{}", user.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());
}

/// Deleting someone else's account is 401.
#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_other_account_is_unauthorized(pool: PgPool) {
    let (target, _target_password) = create_test_user(&pool, "survivor").await;
    let (_attacker, password) = create_test_user(&pool, "assassin").await;
    let attacker_token = login_user(
        common::build_test_app(pool.clone()),
        "assassin@test.com",
        &password,
    )
    .await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{}", target.id),
        &attacker_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(
        UserRepo::find_by_id(&pool, target.id).await.unwrap().is_some(),
        "target account must survive"
    );
}

/// Fetching an authenticated view of another user is allowed (read-only).
#[sqlx::test(migrations = "../../migrations")]
async fn test_get_other_user_view(pool: PgPool) {
    let (other, _other_password) = create_test_user(&pool, "visible").await;
    let (_viewer, password) = create_test_user(&pool, "viewer").await;
    let token = login_user(common::build_test_app(pool.clone()), "viewer@test.com", &password).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/users/{}", other.id),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "visible");
    assert!(json.get("password_hash").is_none());
}

//! Integration tests for user CRUD, the disable/enable guards, list
//! filtering, and the delete-with-authored-proposals rule.

use bidflow_db::models::proposal::CreateProposal;
use bidflow_db::models::user::{NewUser, UpdateUser, UserFilter};
use bidflow_db::repositories::{ProposalRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, email: &str, role: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$test-hash".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role: role.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: unique constraints on username and email
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_duplicate_email_is_a_constraint_violation(pool: PgPool) {
    UserRepo::create(&pool, &new_user("alice", "shared@example.com", "user"))
        .await
        .unwrap();

    let result = UserRepo::create(&pool, &new_user("alice2", "shared@example.com", "user")).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: list filters
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_list_filters_compose(pool: PgPool) {
    UserRepo::create(&pool, &new_user("alice", "alice@example.com", "admin"))
        .await
        .unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob", "bob@example.com", "user"))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("carol", "carol@example.com", "user"))
        .await
        .unwrap();
    UserRepo::set_active(&pool, bob.id, false).await.unwrap();

    let all = UserRepo::list(&pool, &UserFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let admins = UserRepo::list(
        &pool,
        &UserFilter {
            role: Some("admin".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].username, "alice");

    let active_users = UserRepo::list(
        &pool,
        &UserFilter {
            role: Some("user".to_string()),
            is_active: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(active_users.len(), 1);
    assert_eq!(active_users[0].username, "carol");

    let by_id = UserRepo::list(
        &pool,
        &UserFilter {
            id: Some(bob.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_id.len(), 1);
    assert!(!by_id[0].is_active);
}

// ---------------------------------------------------------------------------
// Test: disable/enable transitions and their idempotency guards
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_set_active_guards_no_op_transitions(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("dave", "dave@example.com", "user"))
        .await
        .unwrap();

    // Disable flips the flag and refreshes updated_at.
    assert!(UserRepo::set_active(&pool, user.id, false).await.unwrap());
    let disabled = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!disabled.is_active);

    // Disabling again changes nothing, updated_at included.
    assert!(!UserRepo::set_active(&pool, user.id, false).await.unwrap());
    let still_disabled = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(still_disabled.updated_at, disabled.updated_at);

    // Enable flips it back.
    assert!(UserRepo::set_active(&pool, user.id, true).await.unwrap());
    let enabled = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(enabled.is_active);

    // Enabling an active user is a guarded no-op.
    assert!(!UserRepo::set_active(&pool, user.id, true).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: partial update applies only supplied fields
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_partial_update(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("erin", "erin@example.com", "user"))
        .await
        .unwrap();

    let changes = UpdateUser {
        first_name: Some("  Erin  ".to_string()),
        role: Some("Moderator".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();

    let updated = UserRepo::update(&pool, user.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.first_name.as_deref(), Some("Erin"));
    assert_eq!(updated.role, "moderator");
    // Untouched fields survive.
    assert_eq!(updated.username, "erin");
    assert_eq!(updated.email, "erin@example.com");
    assert!(updated.updated_at > user.updated_at);
}

// ---------------------------------------------------------------------------
// Test: a user with authored proposals cannot be hard-deleted
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_delete_author_guard(pool: PgPool) {
    let author = UserRepo::create(&pool, &new_user("frank", "frank@example.com", "user"))
        .await
        .unwrap();
    let bystander = UserRepo::create(&pool, &new_user("grace", "grace@example.com", "user"))
        .await
        .unwrap();

    let payload: CreateProposal = serde_json::from_value(serde_json::json!({
        "name": "Owned", "site": "S", "client": "C",
        "quote_number": "Q", "client_name": "CN"
    }))
    .unwrap();
    ProposalRepo::create_with_tasks(&pool, author.id, &payload.validate().unwrap())
        .await
        .unwrap();

    assert_eq!(
        UserRepo::count_authored_proposals(&pool, author.id)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        UserRepo::count_authored_proposals(&pool, bystander.id)
            .await
            .unwrap(),
        0
    );

    // The service layer refuses when the count is non-zero; the FK is
    // the backstop if a delete slips through anyway.
    let result = UserRepo::delete(&pool, author.id).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => {
            assert_eq!(db_err.code().as_deref(), Some("23503"));
        }
        other => panic!("expected FK violation, got {other:?}"),
    }

    // A user with no proposals deletes cleanly.
    assert!(UserRepo::delete(&pool, bystander.id).await.unwrap());
}

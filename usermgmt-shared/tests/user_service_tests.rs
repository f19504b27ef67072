/// Integration tests for the record service
///
/// Each test runs against its own in-memory SQLite database.

use sqlx::SqlitePool;
use usermgmt_shared::db::migrations::run_migrations;
use usermgmt_shared::db::pool::{create_pool, DatabaseConfig};
use usermgmt_shared::models::manager::{Manager, SEED_MANAGER_IDS};
use usermgmt_shared::models::user::{User, UserFilter, UserPatch};
use usermgmt_shared::service::{
    CreateUserInput, DeleteUsersInput, ServiceError, UpdateUsersInput, UserService,
    ValidationError,
};

async fn setup() -> (SqlitePool, UserService) {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    Manager::seed_defaults(&pool).await.expect("Failed to seed managers");
    let service = UserService::new(pool.clone());
    (pool, service)
}

fn create_input(name: &str, mob_num: &str, manager_id: &str) -> CreateUserInput {
    CreateUserInput {
        full_name: Some(name.to_string()),
        mob_num: Some(mob_num.to_string()),
        pan_num: Some("abcd1234e".to_string()),
        manager_id: Some(manager_id.to_string()),
    }
}

fn assert_validation(result: Result<impl std::fmt::Debug, ServiceError>, expected: ValidationError) {
    match result {
        Err(ServiceError::Validation(err)) => assert_eq!(err, expected),
        other => panic!("Expected validation error {:?}, got {:?}", expected, other),
    }
}

async fn count_users(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_returns_fresh_ids_and_uppercases_pan() {
    let (_pool, service) = setup().await;

    let first = service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();
    let second = service.create(create_input("B", "2", SEED_MANAGER_IDS[0])).await.unwrap();
    assert_ne!(first, second);

    let users = service.query(&UserFilter::by_user_id(&first)).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].pan_num, "ABCD1234E");
}

#[tokio::test]
async fn test_create_missing_field() {
    let (pool, service) = setup().await;

    let mut input = create_input("A", "1", SEED_MANAGER_IDS[0]);
    input.mob_num = None;
    assert_validation(service.create(input).await, ValidationError::MissingFields);

    let mut input = create_input("A", "1", SEED_MANAGER_IDS[0]);
    input.pan_num = Some(String::new());
    assert_validation(service.create(input).await, ValidationError::MissingFields);

    assert_eq!(count_users(&pool).await, 0);
}

#[tokio::test]
async fn test_create_with_unknown_or_inactive_manager_writes_nothing() {
    let (pool, service) = setup().await;
    Manager::insert(&pool, "inactive", false).await.unwrap();

    assert_validation(
        service.create(create_input("A", "1", "unknown")).await,
        ValidationError::InvalidManager,
    );
    assert_validation(
        service.create(create_input("A", "1", "inactive")).await,
        ValidationError::InvalidManager,
    );

    assert_eq!(count_users(&pool).await, 0);
}

#[tokio::test]
async fn test_query_without_filters_returns_active_users() {
    let (_pool, service) = setup().await;

    let a = service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();
    let b = service.create(create_input("B", "2", SEED_MANAGER_IDS[1])).await.unwrap();
    let c = service.create(create_input("C", "3", SEED_MANAGER_IDS[1])).await.unwrap();

    service
        .update(UpdateUsersInput {
            user_ids: Some(vec![c.clone()]),
            update_data: Some(UserPatch {
                is_active: Some(false),
                ..Default::default()
            }),
        })
        .await
        .unwrap();

    let mut ids: Vec<String> = service
        .query(&UserFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.user_id)
        .collect();
    ids.sort();

    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_query_with_no_match_is_empty() {
    let (_pool, service) = setup().await;

    let users = service.query(&UserFilter::by_user_id("missing")).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_update_applies_manager_change_to_listed_users() {
    let (pool, service) = setup().await;

    let a = service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();
    let b = service.create(create_input("B", "2", SEED_MANAGER_IDS[0])).await.unwrap();
    let untouched = service.create(create_input("C", "3", SEED_MANAGER_IDS[0])).await.unwrap();

    let updated = service
        .update(UpdateUsersInput {
            user_ids: Some(vec![a.clone(), b.clone(), "missing".to_string()]),
            update_data: Some(UserPatch {
                manager_id: Some(SEED_MANAGER_IDS[1].to_string()),
                ..Default::default()
            }),
        })
        .await
        .unwrap();
    assert_eq!(updated, 2);

    for id in [&a, &b] {
        let user = User::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(user.manager_id.as_deref(), Some(SEED_MANAGER_IDS[1]));
    }
    let user = User::find_by_id(&pool, &untouched).await.unwrap().unwrap();
    assert_eq!(user.manager_id.as_deref(), Some(SEED_MANAGER_IDS[0]));
}

#[tokio::test]
async fn test_update_with_inactive_manager_changes_nothing() {
    let (pool, service) = setup().await;
    let a = service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();
    Manager::set_active(&pool, SEED_MANAGER_IDS[1], false).await.unwrap();

    let result = service
        .update(UpdateUsersInput {
            user_ids: Some(vec![a.clone()]),
            update_data: Some(UserPatch {
                full_name: Some("Renamed".to_string()),
                manager_id: Some(SEED_MANAGER_IDS[1].to_string()),
                ..Default::default()
            }),
        })
        .await;
    assert_validation(result, ValidationError::InvalidManager);

    let user = User::find_by_id(&pool, &a).await.unwrap().unwrap();
    assert_eq!(user.full_name, "A");
}

#[tokio::test]
async fn test_update_requires_ids_and_fields() {
    let (_pool, service) = setup().await;

    assert_validation(
        service
            .update(UpdateUsersInput {
                user_ids: None,
                update_data: Some(UserPatch {
                    full_name: Some("X".to_string()),
                    ..Default::default()
                }),
            })
            .await,
        ValidationError::MissingFields,
    );
    assert_validation(
        service
            .update(UpdateUsersInput {
                user_ids: Some(vec!["a".to_string()]),
                update_data: None,
            })
            .await,
        ValidationError::MissingFields,
    );
    assert_validation(
        service
            .update(UpdateUsersInput {
                user_ids: Some(vec!["a".to_string()]),
                update_data: Some(UserPatch::default()),
            })
            .await,
        ValidationError::EmptyUpdate,
    );
}

#[tokio::test]
async fn test_update_with_empty_id_list_is_a_no_op() {
    let (_pool, service) = setup().await;

    let updated = service
        .update(UpdateUsersInput {
            user_ids: Some(Vec::new()),
            update_data: Some(UserPatch {
                full_name: Some("X".to_string()),
                ..Default::default()
            }),
        })
        .await
        .unwrap();
    assert_eq!(updated, 0);
}

#[tokio::test]
async fn test_update_batch_is_all_or_nothing() {
    let (pool, service) = setup().await;

    let a = service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();
    let b = service.create(create_input("B", "2", SEED_MANAGER_IDS[0])).await.unwrap();

    // Reject writes to B only, so the batch fails after A was updated
    sqlx::query(&format!(
        "CREATE TRIGGER reject_b BEFORE UPDATE ON users WHEN OLD.user_id = '{b}'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END"
    ))
    .execute(&pool)
    .await
    .unwrap();

    let result = service
        .update(UpdateUsersInput {
            user_ids: Some(vec![a.clone(), b.clone()]),
            update_data: Some(UserPatch {
                full_name: Some("Renamed".to_string()),
                ..Default::default()
            }),
        })
        .await;
    assert!(matches!(result, Err(ServiceError::Storage(_))));

    let user = User::find_by_id(&pool, &a).await.unwrap().unwrap();
    assert_eq!(user.full_name, "A", "First row should have been rolled back");
}

#[tokio::test]
async fn test_delete_requires_a_criterion() {
    let (pool, service) = setup().await;
    service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();

    assert_validation(
        service.delete(DeleteUsersInput::default()).await,
        ValidationError::MissingFields,
    );
    assert_validation(
        service
            .delete(DeleteUsersInput {
                user_id: Some(String::new()),
                mob_num: Some(String::new()),
            })
            .await,
        ValidationError::MissingFields,
    );

    assert_eq!(count_users(&pool).await, 1);
}

#[tokio::test]
async fn test_delete_by_mobile_number_only() {
    let (pool, service) = setup().await;

    service.create(create_input("A", "555", SEED_MANAGER_IDS[0])).await.unwrap();
    service.create(create_input("B", "555", SEED_MANAGER_IDS[1])).await.unwrap();
    let keep = service.create(create_input("C", "777", SEED_MANAGER_IDS[0])).await.unwrap();

    let deleted = service
        .delete(DeleteUsersInput {
            user_id: None,
            mob_num: Some("555".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    assert_eq!(count_users(&pool).await, 1);
    assert!(User::find_by_id(&pool, &keep).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_twice_is_safe() {
    let (_pool, service) = setup().await;
    let id = service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();

    let input = DeleteUsersInput {
        user_id: Some(id),
        mob_num: None,
    };
    assert_eq!(service.delete(input.clone()).await.unwrap(), 1);
    assert_eq!(service.delete(input).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_removes_inactive_users_too() {
    let (pool, service) = setup().await;
    let id = service.create(create_input("A", "1", SEED_MANAGER_IDS[0])).await.unwrap();

    service
        .update(UpdateUsersInput {
            user_ids: Some(vec![id.clone()]),
            update_data: Some(UserPatch {
                is_active: Some(false),
                ..Default::default()
            }),
        })
        .await
        .unwrap();

    let deleted = service
        .delete(DeleteUsersInput {
            user_id: Some(id),
            mob_num: None,
        })
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(count_users(&pool).await, 0);
}

//! Relational store tests against an in-memory SQLite database with the
//! real migrations applied.

use std::collections::HashSet;

use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, Statement};

use portfolio_tracker::domain::{NewAsset, NewUser};
use portfolio_tracker::infra::{
    AssetRepository, AssetStore, Database, RepoError, UserRepository, UserStore,
};

/// Fresh migrated database; a single connection keeps `:memory:` shared.
async fn setup() -> Database {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let database = Database::from_connection(SeaDatabase::connect(options).await.unwrap());
    database.run_migrations().await.unwrap();
    database
}

#[tokio::test]
async fn test_asset_create_and_get() {
    let db = setup().await;
    let store = AssetStore::new(db.get_connection());

    let btc = store.create(NewAsset::new("BTC", "Bitcoin")).await.unwrap();
    let eth = store.create(NewAsset::new("ETH", "Ethereum")).await.unwrap();

    assert_eq!(btc.id, 1);
    assert_eq!(eth.id, 2);
    assert_eq!(store.get_by_id(btc.id).await.unwrap(), btc);
    assert_eq!(store.get_by_id(eth.id).await.unwrap(), eth);
}

#[tokio::test]
async fn test_asset_missing_is_not_found() {
    let db = setup().await;
    let store = AssetStore::new(db.get_connection());

    assert!(matches!(store.get_by_id(999).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_asset_list_is_ordered_by_id() {
    let db = setup().await;
    let store = AssetStore::new(db.get_connection());

    assert!(store.list().await.unwrap().is_empty());

    for (symbol, name) in [
        ("SOL", "Solana"),
        ("ADA", "Cardano"),
        ("BTC", "Bitcoin"),
        ("BTC", "Wrapped"),
    ] {
        store.create(NewAsset::new(symbol, name)).await.unwrap();
    }

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed.windows(2).all(|pair| pair[0].id <= pair[1].id));
    // Symbols are not unique
    assert_eq!(listed.iter().filter(|a| a.symbol == "BTC").count(), 2);
}

#[tokio::test]
async fn test_asset_storage_failure_is_reported() {
    let db = setup().await;
    let store = AssetStore::new(db.get_connection());

    db.connection()
        .execute(Statement::from_string(
            db.connection().get_database_backend(),
            "DROP TABLE assets".to_string(),
        ))
        .await
        .unwrap();

    assert!(matches!(store.list().await, Err(RepoError::Storage(_))));
    assert!(matches!(
        store.create(NewAsset::new("BTC", "Bitcoin")).await,
        Err(RepoError::Storage(_))
    ));
}

#[tokio::test]
async fn test_user_storage_failure_is_reported() {
    let db = setup().await;
    let store = UserStore::new(db.get_connection());

    db.connection()
        .execute(Statement::from_string(
            db.connection().get_database_backend(),
            "DROP TABLE users".to_string(),
        ))
        .await
        .unwrap();

    assert!(matches!(
        store.create(NewUser::new("dave@example.com", "hash")).await,
        Err(RepoError::Storage(_))
    ));
    assert!(matches!(
        store.get_by_email("dave@example.com").await,
        Err(RepoError::Storage(_))
    ));
    assert!(matches!(store.get_by_id(1).await, Err(RepoError::Storage(_))));
}

#[tokio::test]
async fn test_user_round_trip() {
    let db = setup().await;
    let store = UserStore::new(db.get_connection());

    let user = store
        .create(NewUser::new("alice@example.com", "$argon2id$stub"))
        .await
        .unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.password_hash, "$argon2id$stub");

    let by_id = store.get_by_id(user.id).await.unwrap();
    let by_email = store.get_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_id.email, "alice@example.com");
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_email.password_hash, user.password_hash);
}

#[tokio::test]
async fn test_user_duplicate_email() {
    let db = setup().await;
    let store = UserStore::new(db.get_connection());

    let first = store
        .create(NewUser::new("bob@example.com", "hash-1"))
        .await
        .unwrap();

    let second = store
        .create(NewUser::new("bob@example.com", "hash-2"))
        .await;
    assert!(matches!(second, Err(RepoError::DuplicateEmail)));

    let found = store.get_by_email("bob@example.com").await.unwrap();
    assert_eq!(found.id, first.id);
    assert_eq!(found.password_hash, "hash-1");

    // A different email still gets the next id
    let other = store
        .create(NewUser::new("carol@example.com", "hash-3"))
        .await
        .unwrap();
    assert_ne!(other.id, first.id);
}

#[tokio::test]
async fn test_user_missing_is_not_found() {
    let db = setup().await;
    let store = UserStore::new(db.get_connection());

    assert!(matches!(store.get_by_id(7).await, Err(RepoError::NotFound)));
    assert!(matches!(
        store.get_by_email("ghost@example.com").await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_migration_status_and_rollback() {
    let db = setup().await;

    let status = db.migration_status().await.unwrap();
    assert_eq!(status.len(), 2);
    assert!(status.iter().all(|(_, applied)| *applied));

    db.rollback_migration().await.unwrap();
    let pending: HashSet<String> = db
        .migration_status()
        .await
        .unwrap()
        .into_iter()
        .filter(|(_, applied)| !applied)
        .map(|(name, _)| name)
        .collect();
    assert_eq!(pending.len(), 1);
    assert!(pending.iter().all(|name| name.contains("create_users_table")));

    db.ping().await.unwrap();
}

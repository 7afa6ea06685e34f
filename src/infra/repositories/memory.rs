//! In-memory stores backed by `RwLock<HashMap>`.
//!
//! State lives for the lifetime of the process only. Identifiers come from a
//! counter bumped under the write lock, so they are unique and increasing
//! within one running instance.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::asset_repository::AssetRepository;
use super::error::{RepoError, RepoResult};
use super::user_repository::UserRepository;
use crate::domain::{Asset, NewAsset, NewUser, User};

/// Rows plus the last identifier handed out.
#[derive(Debug)]
struct Table<T> {
    last_id: i64,
    items: HashMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            items: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

// Every mutation is a single insert, so a poisoned table is still consistent.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// InMemoryAssetStore
// ---------------------------------------------------------------------------

/// In-memory asset store for development and testing.
///
/// `list` order is unspecified.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    table: RwLock<Table<Asset>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetStore {
    async fn create(&self, asset: NewAsset) -> RepoResult<Asset> {
        let asset = {
            let mut table = write(&self.table);
            let asset = asset.into_asset(table.next_id());
            table.items.insert(asset.id, asset.clone());
            asset
        };

        tracing::debug!(
            component = "memory_asset_store",
            id = asset.id,
            symbol = %asset.symbol,
            "created asset in memory"
        );
        Ok(asset)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Asset> {
        read(&self.table)
            .items
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list(&self) -> RepoResult<Vec<Asset>> {
        Ok(read(&self.table).items.values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// InMemoryUserStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct UserTable {
    rows: Table<User>,
    /// email -> id; the uniqueness index
    by_email: HashMap<String, i64>,
}

/// In-memory user store enforcing email uniqueness.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    table: RwLock<UserTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let mut table = write(&self.table);
        if table.by_email.contains_key(&user.email) {
            return Err(RepoError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: table.rows.next_id(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        table.by_email.insert(user.email.clone(), user.id);
        table.rows.items.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> RepoResult<User> {
        let table = read(&self.table);
        table
            .by_email
            .get(email)
            .and_then(|id| table.rows.items.get(id))
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<User> {
        read(&self.table)
            .rows
            .items
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
}

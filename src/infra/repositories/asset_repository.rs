//! Asset repository contract and its relational implementation.

use std::pin::pin;

use async_trait::async_trait;
use futures::TryStreamExt;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use super::entities::asset::{self, ActiveModel, Entity as AssetEntity};
use super::error::{storage_failure, RepoError, RepoResult};
use crate::domain::{Asset, NewAsset};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const COMPONENT: &str = "asset_store";

/// Asset storage capability.
///
/// Implemented by every backend; handlers depend on this trait only.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Store a new asset and return it with its assigned identifier
    async fn create(&self, asset: NewAsset) -> RepoResult<Asset>;

    /// Fetch an asset by identifier; `RepoError::NotFound` on a miss
    async fn get_by_id(&self, id: i64) -> RepoResult<Asset>;

    /// All stored assets (empty when there are none)
    async fn list(&self) -> RepoResult<Vec<Asset>>;
}

/// Relational asset store over a SeaORM connection pool.
///
/// `list` returns assets in ascending identifier order.
pub struct AssetStore {
    db: DatabaseConnection,
}

impl AssetStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssetRepository for AssetStore {
    async fn create(&self, asset: NewAsset) -> RepoResult<Asset> {
        tracing::debug!(component = COMPONENT, symbol = %asset.symbol, "inserting asset");

        // INSERT ... RETURNING
        let model = ActiveModel {
            id: NotSet,
            symbol: Set(asset.symbol),
            name: Set(asset.name),
        }
        .insert(&self.db)
        .await
        .map_err(storage_failure(COMPONENT, "create"))?;

        Ok(Asset::from(model))
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Asset> {
        tracing::debug!(component = COMPONENT, id, "selecting asset by id");

        AssetEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_failure(COMPONENT, "get_by_id"))?
            .map(Asset::from)
            .ok_or(RepoError::NotFound)
    }

    async fn list(&self) -> RepoResult<Vec<Asset>> {
        tracing::debug!(component = COMPONENT, "listing assets");

        let rows = AssetEntity::find()
            .order_by_asc(asset::Column::Id)
            .stream(&self.db)
            .await
            .map_err(storage_failure(COMPONENT, "list"))?;
        let mut rows = pin!(rows);

        // A bad row aborts the whole listing; the cursor is dropped on return.
        let mut assets = Vec::new();
        while let Some(model) = rows
            .try_next()
            .await
            .map_err(storage_failure(COMPONENT, "list"))?
        {
            assets.push(Asset::from(model));
        }

        Ok(assets)
    }
}

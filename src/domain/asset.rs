//! Asset domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A tracked financial asset.
///
/// The identifier is assigned by the store on creation and never changes
/// afterwards. Values handed out by a repository are snapshots owned by the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Ticker symbol
    #[schema(example = "BTC")]
    pub symbol: String,
    /// Display name
    #[schema(example = "Bitcoin")]
    pub name: String,
}

/// An asset that has not been persisted yet, so it carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub symbol: String,
    pub name: String,
}

impl NewAsset {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Attach a store-assigned identifier.
    pub fn into_asset(self, id: i64) -> Asset {
        Asset {
            id,
            symbol: self.symbol,
            name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_asset_keeps_fields() {
        let asset = NewAsset::new("BTC", "Bitcoin").into_asset(7);
        assert_eq!(
            asset,
            Asset {
                id: 7,
                symbol: "BTC".to_string(),
                name: "Bitcoin".to_string(),
            }
        );
    }

    #[test]
    fn test_asset_serializes_flat() {
        let asset = NewAsset::new("ETH", "Ethereum").into_asset(2);
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 2, "symbol": "ETH", "name": "Ethereum" })
        );
    }
}

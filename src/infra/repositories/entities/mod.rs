//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod asset;
pub mod user;

#[allow(unused_imports)]
pub use asset::{ActiveModel as AssetActiveModel, Entity as AssetEntity, Model as AssetModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};

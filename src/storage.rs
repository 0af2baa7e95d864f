mod errors;
mod internal;

use async_trait::async_trait;

pub use errors::StorageError;
pub use internal::SlotStorage;

/// The single durable location holding the encoded note collection.
#[async_trait]
pub trait CollectionSlot: Send + Sync {
    /// `None` means the slot was never written (first run).
    async fn load(&self) -> Result<Option<String>, StorageError>;

    async fn store(&self, encoded: &str) -> Result<(), StorageError>;
}

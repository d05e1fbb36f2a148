use async_trait::async_trait;

use crate::modules::attendance::core::settings::{SettingsDocument, SettingsScope};
use crate::shared::core::errors::StoreError;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self, scope: &SettingsScope) -> Result<Option<SettingsDocument>, StoreError>;

    /// Stores `document` unless one already exists for its scope; returns whichever is stored.
    async fn insert_if_absent(
        &self,
        document: SettingsDocument,
    ) -> Result<SettingsDocument, StoreError>;

    /// Creates or replaces the document for its scope.
    async fn save(&self, document: SettingsDocument) -> Result<SettingsDocument, StoreError>;
}

// In memory settings documents, one per scope. Counts loads so cache behaviour is observable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::modules::attendance::adapters::outbound::settings_repository::SettingsRepository;
use crate::modules::attendance::core::settings::{SettingsDocument, SettingsScope};
use crate::shared::core::errors::StoreError;

#[derive(Default)]
pub struct InMemorySettingsRepository {
    documents: RwLock<HashMap<SettingsScope, SettingsDocument>>,
    loads: AtomicUsize,
    is_offline: AtomicBool,
    delay_load_ms: AtomicU64,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn set_delay_load_ms(&self, ms: u64) {
        self.delay_load_ms.store(ms, Ordering::SeqCst);
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("Settings store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self, scope: &SettingsScope) -> Result<Option<SettingsDocument>, StoreError> {
        self.ensure_online()?;
        self.loads.fetch_add(1, Ordering::SeqCst);
        let document = self.documents.read().await.get(scope).cloned();
        let ms = self.delay_load_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        Ok(document)
    }

    async fn insert_if_absent(
        &self,
        document: SettingsDocument,
    ) -> Result<SettingsDocument, StoreError> {
        self.ensure_online()?;
        let mut guard = self.documents.write().await;
        Ok(guard
            .entry(document.scope.clone())
            .or_insert(document)
            .clone())
    }

    async fn save(&self, document: SettingsDocument) -> Result<SettingsDocument, StoreError> {
        self.ensure_online()?;
        let mut guard = self.documents.write().await;
        guard.insert(document.scope.clone(), document.clone());
        Ok(document)
    }
}

// Settings resolution with a short-lived cache keyed by scope.
//
// Responsibilities
// - Resolve defaults <- global document <- department document into one EffectiveSettings.
// - Create the global document on first use.
// - Invalidate synchronously on every write. A global write drops every entry because departments
//   inherit from global.
//
// A generation counter guards against a resolve that started before a write re-populating the
// cache with pre-write rules after the invalidation. The counter is checked again after the insert
// because a write can land between the first check and the insert.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;

use crate::modules::attendance::adapters::outbound::settings_repository::SettingsRepository;
use crate::modules::attendance::core::settings::{
    EffectiveSettings, SettingsDocument, SettingsOverride, SettingsScope, merge,
};
use crate::shared::core::errors::ApplicationError;

pub struct SettingsResolver {
    repository: Arc<dyn SettingsRepository>,
    cache: Cache<SettingsScope, Arc<EffectiveSettings>>,
    generation: AtomicU64,
}

impl SettingsResolver {
    pub fn new(repository: Arc<dyn SettingsRepository>, ttl: Duration, capacity: u64) -> Self {
        Self {
            repository,
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn effective_settings(
        &self,
        department: Option<&str>,
    ) -> Result<Arc<EffectiveSettings>, ApplicationError> {
        let scope = scope_of(department);
        if let Some(hit) = self.cache.get(&scope).await {
            return Ok(hit);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let resolved = Arc::new(self.resolve(department).await?);
        if self.generation.load(Ordering::SeqCst) == generation {
            self.cache.insert(scope.clone(), resolved.clone()).await;
            if self.generation.load(Ordering::SeqCst) != generation {
                self.cache.invalidate(&scope).await;
            }
        }
        Ok(resolved)
    }

    pub async fn invalidate(&self, scope: &SettingsScope) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        match scope {
            SettingsScope::Global => self.cache.invalidate_all(),
            SettingsScope::Department(_) => self.cache.invalidate(scope).await,
        }
        tracing::debug!(?scope, "settings cache invalidated");
    }

    pub async fn update_global(
        &self,
        overrides: SettingsOverride,
    ) -> Result<SettingsDocument, ApplicationError> {
        self.update(SettingsScope::Global, overrides).await
    }

    pub async fn update_department(
        &self,
        department: &str,
        overrides: SettingsOverride,
    ) -> Result<SettingsDocument, ApplicationError> {
        if department.trim().is_empty() {
            return Err(ApplicationError::Validation("department must not be empty".into()));
        }
        self.update(SettingsScope::Department(department.to_string()), overrides)
            .await
    }

    pub async fn document(
        &self,
        scope: &SettingsScope,
    ) -> Result<Option<SettingsDocument>, ApplicationError> {
        Ok(self.repository.load(scope).await?)
    }

    async fn update(
        &self,
        scope: SettingsScope,
        overrides: SettingsOverride,
    ) -> Result<SettingsDocument, ApplicationError> {
        overrides
            .validate()
            .map_err(|e| ApplicationError::Validation(e.to_string()))?;

        let now = Utc::now();
        let document = match self.repository.load(&scope).await? {
            Some(existing) => SettingsDocument {
                overrides,
                updated_at: now,
                ..existing
            },
            None => SettingsDocument::new(scope.clone(), overrides, now),
        };
        let saved = self.repository.save(document).await?;
        self.invalidate(&scope).await;
        tracing::info!(?scope, "settings updated");
        Ok(saved)
    }

    async fn resolve(&self, department: Option<&str>) -> Result<EffectiveSettings, ApplicationError> {
        let global = match self.repository.load(&SettingsScope::Global).await? {
            Some(document) => document,
            None => {
                tracing::info!("creating global settings document with defaults");
                self.repository
                    .insert_if_absent(SettingsDocument::new(
                        SettingsScope::Global,
                        SettingsOverride::default(),
                        Utc::now(),
                    ))
                    .await?
            }
        };

        let mut layered = global.overrides;
        if let Some(department) = department {
            let scope = SettingsScope::Department(department.to_string());
            if let Some(document) = self.repository.load(&scope).await? {
                layered = layered.overlay(&document.overrides);
            }
        }
        Ok(merge(&EffectiveSettings::default(), &layered))
    }
}

fn scope_of(department: Option<&str>) -> SettingsScope {
    match department {
        Some(d) => SettingsScope::Department(d.to_string()),
        None => SettingsScope::Global,
    }
}

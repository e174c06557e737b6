use chrono::{DateTime, Utc};
use footingplan_core::StructuralConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// A named [`StructuralConfig`] as kept by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: StructuralConfig,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ConfigRecord {
    /// New record with a fresh id.
    pub fn new(name: impl Into<String>, config: StructuralConfig) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            config,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the parameters and bumps `modified_at`.
    pub fn update_config(&mut self, config: StructuralConfig) {
        self.config = config;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Checks the record envelope. Parameter values are not checked here;
    /// out-of-range numbers are sanitized at render time.
    pub fn validate(&self) -> StoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(StoreError::InvalidRecord("id is empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidRecord(format!(
                "record {} has an empty name",
                self.id
            )));
        }
        if self.modified_at < self.created_at {
            return Err(StoreError::InvalidRecord(format!(
                "record {} was modified before it was created",
                self.id
            )));
        }
        Ok(())
    }
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self::new("New configuration", StructuralConfig::default())
    }
}

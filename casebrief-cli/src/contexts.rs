use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use casebrief::{CustomerContext, CustomerContextProvider};
use std::collections::HashMap;
use std::path::Path;

/// Customer contexts keyed by e-mail, loaded from a JSON object
#[derive(Debug, Clone, Default)]
pub struct FileContextProvider {
    contexts: HashMap<String, CustomerContext>,
}

impl FileContextProvider {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read contexts file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid contexts file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let contexts = serde_json::from_str(raw)?;
        Ok(Self { contexts })
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[async_trait]
impl CustomerContextProvider for FileContextProvider {
    async fn customer_context(&self, email: &str) -> Result<CustomerContext> {
        self.contexts
            .get(email)
            .cloned()
            .ok_or_else(|| anyhow!("no customer context for {}", email))
    }
}

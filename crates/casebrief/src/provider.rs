use async_trait::async_trait;
use casebrief_types::CustomerContext;

/// Source of CRM data for the customer who opened a thread
///
/// Lookups may fail (unknown address, backend down); the pipeline then
/// continues without context.
#[async_trait]
pub trait CustomerContextProvider: Send + Sync {
    async fn customer_context(&self, email: &str) -> anyhow::Result<CustomerContext>;
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Bronze,
    Silver,
    Gold,
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tier = match self {
            CustomerTier::Bronze => "bronze",
            CustomerTier::Silver => "silver",
            CustomerTier::Gold => "gold",
        };
        f.write_str(tier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub tier: CustomerTier,
    pub lifetime_value: f64,
    pub previous_issues: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    pub product: String,
    pub status: String,
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: String,
    pub subject: String,
    pub status: String,
    pub priority: String,
    pub created_at: String,
}

/// CRM data about the customer behind a thread, used only to enrich prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContext {
    pub customer_profile: CustomerProfile,
    /// Most recent first
    #[serde(default)]
    pub order_history: Vec<OrderRecord>,
    /// Most recent first
    #[serde(default)]
    pub related_tickets: Vec<TicketRecord>,
    #[serde(default)]
    pub suggested_responses: Vec<String>,
}

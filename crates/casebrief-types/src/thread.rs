use serde::{Deserialize, Serialize};

/// Who wrote a message in a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Customer,
    Company,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Customer => "customer",
            Sender::Company => "company",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub sender: Sender,
    /// ISO-8601, rendered verbatim into prompts
    pub timestamp: String,
    pub body: String,
}

impl ThreadMessage {
    pub fn new(sender: Sender, timestamp: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender,
            timestamp: timestamp.into(),
            body: body.into(),
        }
    }
}

/// A customer-service conversation about a single order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadInput {
    pub order_id: String,
    pub product: String,
    pub topic: String,
    pub initiated_by: String,
    /// Thread order (oldest first)
    pub messages: Vec<ThreadMessage>,
}

impl ThreadInput {
    pub fn new(
        order_id: impl Into<String>,
        product: impl Into<String>,
        topic: impl Into<String>,
        initiated_by: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product: product.into(),
            topic: topic.into(),
            initiated_by: initiated_by.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: ThreadMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages_from(&self, sender: Sender) -> impl Iterator<Item = &ThreadMessage> {
        self.messages.iter().filter(move |m| m.sender == sender)
    }
}

use casebrief_types::{CustomerContext, ThreadInput};
use std::fmt::Write;

/// How many orders and tickets from the customer's history go into the prompt
const HISTORY_LIMIT: usize = 3;

pub const SYSTEM_PROMPT: &str = r#"You are an expert customer service analyst. Your job is to analyze email threads between customers and a company, then provide structured summaries that help customer experience associates respond quickly and effectively.

Guidelines:
- Be concise but comprehensive
- Identify the core issue, not just symptoms
- Assess customer sentiment accurately
- Provide actionable next steps
- Use professional, neutral language
- If information is ambiguous, acknowledge uncertainty

Output Format: Always respond with valid JSON matching this schema:
{
  "summary": "2-3 sentence overview of the entire conversation",
  "keyIssue": "The main problem the customer is experiencing",
  "sentiment": "frustrated | neutral | satisfied | angry",
  "currentStatus": "unresolved | pending | resolved",
  "recommendedAction": "Specific next step for the associate",
  "confidenceScore": 0.0-1.0,
  "additionalContext": "Any important details or red flags"
}"#;

/// The two text blocks sent for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn build_prompts(thread: &ThreadInput, context: Option<&CustomerContext>) -> PromptPair {
    PromptPair {
        system: SYSTEM_PROMPT.to_string(),
        user: build_user_prompt(thread, context),
    }
}

/// Renders order metadata, optional customer context, then every message in thread order
pub fn build_user_prompt(thread: &ThreadInput, context: Option<&CustomerContext>) -> String {
    let mut prompt = String::from("Analyze this customer service email thread:\n\n");

    // Writing into a String cannot fail.
    let _ = write!(
        prompt,
        "ORDER DETAILS:\n- Order ID: {}\n- Product: {}\n- Topic: {}\n- Initiated By: {}\n\n",
        thread.order_id, thread.product, thread.topic, thread.initiated_by
    );

    if let Some(ctx) = context {
        render_customer_context(&mut prompt, ctx);
    }

    prompt.push_str("EMAIL THREAD:\n");
    for message in &thread.messages {
        let _ = write!(
            prompt,
            "\n[{} at {}]:\n{}\n",
            message.sender, message.timestamp, message.body
        );
    }

    prompt.push_str(
        "\nProvide a structured analysis in JSON format. Consider the customer's history and tier when assessing priority and recommended actions.",
    );

    prompt
}

fn render_customer_context(prompt: &mut String, ctx: &CustomerContext) {
    let profile = &ctx.customer_profile;
    let _ = write!(
        prompt,
        "CUSTOMER CONTEXT:\n- Name: {}\n- Email: {}\n- Customer Tier: {}\n- Lifetime Value: ${}\n- Previous Issues: {}\n\n",
        profile.name, profile.email, profile.tier, profile.lifetime_value, profile.previous_issues
    );

    let orders = ctx
        .order_history
        .iter()
        .take(HISTORY_LIMIT)
        .map(|o| format!("- {} ({}) - ${} on {}", o.product, o.status, o.value, o.date))
        .collect::<Vec<_>>()
        .join("\n");
    let _ = write!(prompt, "RECENT ORDERS:\n{}\n\n", orders);

    let tickets = ctx
        .related_tickets
        .iter()
        .take(HISTORY_LIMIT)
        .map(|t| format!("- {} ({}, {})", t.subject, t.status, t.priority))
        .collect::<Vec<_>>()
        .join("\n");
    let _ = write!(prompt, "RELATED TICKETS:\n{}\n\n", tickets);

    let responses = ctx
        .suggested_responses
        .iter()
        .map(|r| format!("- \"{}\"", r))
        .collect::<Vec<_>>()
        .join("\n");
    let _ = write!(prompt, "SUGGESTED RESPONSE PATTERNS:\n{}\n\n", responses);
}

pub mod assessment;
pub mod config;
pub mod context;
pub mod error;
pub mod summary;
pub mod thread;

pub use assessment::{ConfidenceAssessment, CriteriaScores};
pub use config::{AssessmentConfig, GenerationConfig, DEFAULT_MODEL};
pub use context::{CustomerContext, CustomerProfile, CustomerTier, OrderRecord, TicketRecord};
pub use error::SchemaError;
pub use summary::{CandidateSummary, CurrentStatus, Sentiment, SummaryResult};
pub use thread::{Sender, ThreadInput, ThreadMessage};

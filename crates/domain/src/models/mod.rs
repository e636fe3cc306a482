//! Domain models for PromptCampaign.

pub mod analysis;
pub mod bulk_import;
pub mod campaign;
pub mod feedback;
pub mod metric;
pub mod user;

pub use analysis::{MetricAnalysisPayload, SendMetricsRequest, SendMetricsResponse};
pub use bulk_import::{ImportReport, MetricImportRow, RawImportRow, REQUIRED_IMPORT_COLUMNS};
pub use campaign::{Campaign, CampaignResponse, CreateCampaignRequest};
pub use feedback::{Feedback, FeedbackResponse, ReceiveFeedbackRequest};
pub use metric::{CreateMetricRequest, Metric, MetricResponse};
pub use user::{LoginForm, SignupRequest, UpdateUserRequest, User, UserResponse};

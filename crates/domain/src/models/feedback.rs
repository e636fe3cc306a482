//! Feedback domain model and payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Qualitative feedback text produced by the external analysis workflow,
/// tied to one campaign and one metric row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub campaign_id: i64,
    pub metric_id: i64,
    pub feedback_text: String,
}

/// Payload posted back by the external workflow with generated feedback.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ReceiveFeedbackRequest {
    pub campaign_id: i64,
    pub metric_id: i64,

    #[validate(length(min = 1, message = "Feedback text is required"))]
    pub feedback_text: String,
}

/// Response payload for feedback records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub metric_id: i64,
    pub feedback_text: String,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            campaign_id: feedback.campaign_id,
            metric_id: feedback.metric_id,
            feedback_text: feedback.feedback_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_request_requires_text() {
        let request = ReceiveFeedbackRequest {
            campaign_id: 1,
            metric_id: 2,
            feedback_text: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_receive_request_valid() {
        let request = ReceiveFeedbackRequest {
            campaign_id: 1,
            metric_id: 2,
            feedback_text: "CTR is healthy; raise the budget on weekends.".into(),
        };
        assert!(request.validate().is_ok());
    }
}

use crate::backend_gateway::error::GatewayError;
use crate::selected_image::SelectedImage;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// The only other label a binary classifier could have meant.
    pub fn complement(self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub gender: Gender,
    /// Percentage in `0..=100`.
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Built right before a feedback call and dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub image: SelectedImage,
    pub predicted: Gender,
    pub confidence: f64,
    pub asserted: Gender,
}

impl FeedbackRecord {
    pub fn new(image: SelectedImage, result: &PredictionResult, verdict: Verdict) -> Self {
        let asserted = match verdict {
            Verdict::Correct => result.gender,
            Verdict::Incorrect => result.gender.complement(),
        };

        Self {
            image,
            predicted: result.gender,
            confidence: result.confidence,
            asserted,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedbackReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_feedback: Option<u64>,
    #[serde(default)]
    pub training_loss: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stats {
    pub total_feedback: u64,
    pub accuracy: f64,
    pub correct_predictions: u64,
    pub online_training_count: u64,
    #[serde(default)]
    pub incorrect_predictions: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// One request/response round trip per call; no retries and no queueing.
pub trait BackendGateway: Send + Sync {
    fn predict(&self, image: &SelectedImage) -> Result<PredictionResult, GatewayError>;
    fn submit_feedback(&self, feedback: &FeedbackRecord)
        -> Result<FeedbackReceipt, GatewayError>;
    fn fetch_stats(&self) -> Result<Stats, GatewayError>;
    /// Returns the backup identifier the server created.
    fn save_model(&self) -> Result<String, GatewayError>;
    fn check_health(&self) -> Result<Health, GatewayError>;
}

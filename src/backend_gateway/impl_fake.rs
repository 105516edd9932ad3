use crate::backend_gateway::error::GatewayError;
use crate::backend_gateway::interface::{
    BackendGateway, FeedbackReceipt, FeedbackRecord, Gender, Health, PredictionResult, Stats,
};
use crate::library::logger::interface::Logger;
use crate::selected_image::SelectedImage;
use rand::distr::{Distribution, Uniform};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
struct Counters {
    total_feedback: u64,
    correct_predictions: u64,
    incorrect_predictions: u64,
    online_training_count: u64,
    last_updated: Option<String>,
}

/// Stands in for the classification service: random predictions, in-memory stats.
pub struct BackendGatewayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    latency: Duration,
    counters: Mutex<Counters>,
}

impl BackendGatewayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, latency: Duration) -> Self {
        Self {
            logger: logger.with_namespace("gateway").with_namespace("fake"),
            latency,
            counters: Mutex::new(Counters::default()),
        }
    }

    fn counters(&self) -> std::sync::MutexGuard<'_, Counters> {
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }
}

impl BackendGateway for BackendGatewayFake {
    fn predict(&self, image: &SelectedImage) -> Result<PredictionResult, GatewayError> {
        let _ = self.logger.info(&format!("Classifying {}...", image.name));
        self.simulate_latency();

        if image.bytes.is_empty() {
            return Err(GatewayError::Application("No image selected".to_string()));
        }

        let mut rng = rand::rng();
        let score_dist = Uniform::new(0.0_f64, 1.0)
            .map_err(|err| GatewayError::Malformed(err.to_string()))?;
        let score = score_dist.sample(&mut rng);

        let (gender, confidence) = if score > 0.5 {
            (Gender::Male, score * 100.0)
        } else {
            (Gender::Female, (1.0 - score) * 100.0)
        };

        Ok(PredictionResult {
            gender,
            confidence: (confidence * 100.0).round() / 100.0,
        })
    }

    fn submit_feedback(
        &self,
        feedback: &FeedbackRecord,
    ) -> Result<FeedbackReceipt, GatewayError> {
        let _ = self.logger.info(&format!(
            "Learning from feedback: predicted {} actual {}",
            feedback.predicted, feedback.asserted
        ));
        self.simulate_latency();

        let mut counters = self.counters();
        counters.total_feedback += 1;
        counters.online_training_count += 1;
        if feedback.predicted == feedback.asserted {
            counters.correct_predictions += 1;
        } else {
            counters.incorrect_predictions += 1;
        }
        counters.last_updated = Some(chrono::Local::now().to_rfc3339());

        Ok(FeedbackReceipt {
            message: Some("Model learned from your feedback instantly! (No data saved)".to_string()),
            total_feedback: Some(counters.total_feedback),
            training_loss: None,
        })
    }

    fn fetch_stats(&self) -> Result<Stats, GatewayError> {
        let counters = self.counters().clone();
        let accuracy = if counters.total_feedback > 0 {
            let percent =
                counters.correct_predictions as f64 / counters.total_feedback as f64 * 100.0;
            (percent * 100.0).round() / 100.0
        } else {
            0.0
        };

        Ok(Stats {
            total_feedback: counters.total_feedback,
            accuracy,
            correct_predictions: counters.correct_predictions,
            online_training_count: counters.online_training_count,
            incorrect_predictions: Some(counters.incorrect_predictions),
            last_updated: counters.last_updated,
        })
    }

    fn save_model(&self) -> Result<String, GatewayError> {
        let _ = self.logger.info("Saving model...");
        self.simulate_latency();
        let backup = format!(
            "gender_classification_model_backup_{}.h5",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let _ = self.logger.info(&format!("Backup created: {}", backup));
        Ok(backup)
    }

    fn check_health(&self) -> Result<Health, GatewayError> {
        Ok(Health {
            status: "healthy".to_string(),
            model_loaded: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend_gateway::interface::Verdict;
    use crate::library::logger::impl_fake::LoggerFake;

    fn gateway() -> BackendGatewayFake {
        BackendGatewayFake::new(Arc::new(LoggerFake::new()), Duration::ZERO)
    }

    #[test]
    fn predictions_stay_in_range() {
        let gateway = gateway();
        let image = SelectedImage::new("cat.png", "image/png", vec![1, 2, 3]);

        for _ in 0..50 {
            let result = gateway.predict(&image).unwrap();
            assert!((50.0..=100.0).contains(&result.confidence));
        }
    }

    #[test]
    fn empty_upload_is_rejected() {
        let image = SelectedImage::new("empty.png", "image/png", vec![]);
        let err = gateway().predict(&image).unwrap_err();
        assert_eq!(err.user_message(), "No image selected");
    }

    #[test]
    fn feedback_updates_stats() {
        let gateway = gateway();
        let image = SelectedImage::new("cat.png", "image/png", vec![1]);
        let result = PredictionResult {
            gender: Gender::Male,
            confidence: 70.0,
        };

        gateway
            .submit_feedback(&FeedbackRecord::new(image.clone(), &result, Verdict::Correct))
            .unwrap();
        gateway
            .submit_feedback(&FeedbackRecord::new(image.clone(), &result, Verdict::Correct))
            .unwrap();
        let receipt = gateway
            .submit_feedback(&FeedbackRecord::new(image, &result, Verdict::Incorrect))
            .unwrap();

        let stats = gateway.fetch_stats().unwrap();
        assert_eq!(receipt.total_feedback, Some(3));
        assert_eq!(stats.total_feedback, 3);
        assert_eq!(stats.correct_predictions, 2);
        assert_eq!(stats.incorrect_predictions, Some(1));
        assert_eq!(stats.online_training_count, 3);
        assert_eq!(stats.accuracy, 66.67);
    }

    #[test]
    fn save_names_a_backup() {
        let backup = gateway().save_model().unwrap();
        assert!(backup.starts_with("gender_classification_model_backup_"));
        assert!(backup.ends_with(".h5"));
    }
}

use crate::backend_gateway::error::GatewayError;
use crate::backend_gateway::interface::{
    BackendGateway, FeedbackReceipt, FeedbackRecord, Gender, Health, PredictionResult, Stats,
};
use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::selected_image::SelectedImage;
use reqwest::blocking::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";
const FEEDBACK_REJECTED_MESSAGE: &str = "Feedback was not accepted";
const SAVE_REJECTED_MESSAGE: &str = "Model was not saved";

pub struct BackendGatewayHttp {
    client: Client,
    base_url: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl BackendGatewayHttp {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| GatewayError::InvalidRequest(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            logger: logger.with_namespace("gateway").with_namespace("http"),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<(u16, String), GatewayError> {
        let response = request
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let code = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let _ = self
            .logger
            .info(&format!("HTTP {} ({} bytes)", code, body.len()));
        Ok((code, body))
    }
}

impl BackendGateway for BackendGatewayHttp {
    fn predict(&self, image: &SelectedImage) -> Result<PredictionResult, GatewayError> {
        let _ = self.logger.info(&format!(
            "POST /api/predict {} ({} bytes)",
            image.name,
            image.byte_len()
        ));
        let form = multipart::Form::new().part("image", image_part(image)?);
        let (code, body) = self.send(self.client.post(self.url("/api/predict")).multipart(form))?;
        parse_predict(code, &body)
    }

    fn submit_feedback(
        &self,
        feedback: &FeedbackRecord,
    ) -> Result<FeedbackReceipt, GatewayError> {
        let _ = self.logger.info(&format!(
            "POST /api/feedback prediction={} correctGender={}",
            feedback.predicted, feedback.asserted
        ));
        let form = multipart::Form::new()
            .part("image", image_part(&feedback.image)?)
            .text("correctGender", feedback.asserted.as_str())
            .text("prediction", feedback.predicted.as_str())
            .text("confidence", feedback.confidence.to_string());
        let (code, body) =
            self.send(self.client.post(self.url("/api/feedback")).multipart(form))?;
        parse_feedback(code, &body)
    }

    fn fetch_stats(&self) -> Result<Stats, GatewayError> {
        let _ = self.logger.info("GET /api/stats");
        let (code, body) = self.send(self.client.get(self.url("/api/stats")))?;
        decode(code, &body)
    }

    fn save_model(&self) -> Result<String, GatewayError> {
        let _ = self.logger.info("POST /api/save-model");
        let (code, body) = self.send(self.client.post(self.url("/api/save-model")))?;
        parse_save(code, &body)
    }

    fn check_health(&self) -> Result<Health, GatewayError> {
        let _ = self.logger.info("GET /api/health");
        let (code, body) = self.send(self.client.get(self.url("/api/health")))?;
        decode(code, &body)
    }
}

fn image_part(image: &SelectedImage) -> Result<multipart::Part, GatewayError> {
    multipart::Part::bytes(image.bytes.to_vec())
        .file_name(image.name.clone())
        .mime_str(&image.mime)
        .map_err(|err| GatewayError::InvalidRequest(err.to_string()))
}

#[derive(Debug, Deserialize)]
struct ErrorWire {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictWire {
    #[serde(default)]
    success: bool,
    gender: Option<Gender>,
    confidence: Option<f64>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedbackWire {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    message: Option<String>,
    total_feedback: Option<u64>,
    training_loss: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SaveWire {
    #[serde(default)]
    success: bool,
    backup_created: Option<String>,
    error: Option<String>,
}

fn decode<T: DeserializeOwned>(code: u16, body: &str) -> Result<T, GatewayError> {
    let trimmed = body.trim();
    if !(200..300).contains(&code) {
        return Err(status_error(code, trimmed));
    }
    serde_json::from_str(trimmed)
        .map_err(|err| GatewayError::Malformed(format!("{err}: {trimmed}")))
}

fn status_error(code: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorWire>(body)
        .ok()
        .and_then(|wire| wire.error.or(wire.message))
        .filter(|message| !message.trim().is_empty());

    match message {
        Some(message) => GatewayError::Application(message),
        None => GatewayError::Status {
            code,
            body: body.to_string(),
        },
    }
}

fn parse_predict(code: u16, body: &str) -> Result<PredictionResult, GatewayError> {
    let wire: PredictWire = decode(code, body)?;
    if !wire.success {
        return Err(GatewayError::Application(
            wire.error
                .unwrap_or_else(|| PREDICTION_FAILED_MESSAGE.to_string()),
        ));
    }

    match (wire.gender, wire.confidence) {
        (Some(gender), Some(confidence)) if (0.0..=100.0).contains(&confidence) => {
            Ok(PredictionResult { gender, confidence })
        }
        (Some(_), Some(confidence)) => Err(GatewayError::Malformed(format!(
            "confidence {confidence} outside 0..=100"
        ))),
        _ => Err(GatewayError::Malformed(
            "prediction is missing gender or confidence".to_string(),
        )),
    }
}

fn parse_feedback(code: u16, body: &str) -> Result<FeedbackReceipt, GatewayError> {
    let wire: FeedbackWire = decode(code, body)?;
    if !wire.success {
        return Err(GatewayError::Application(
            wire.error
                .or(wire.message)
                .unwrap_or_else(|| FEEDBACK_REJECTED_MESSAGE.to_string()),
        ));
    }

    Ok(FeedbackReceipt {
        message: wire.message,
        total_feedback: wire.total_feedback,
        training_loss: wire.training_loss,
    })
}

fn parse_save(code: u16, body: &str) -> Result<String, GatewayError> {
    let wire: SaveWire = decode(code, body)?;
    if !wire.success {
        return Err(GatewayError::Application(
            wire.error
                .unwrap_or_else(|| SAVE_REJECTED_MESSAGE.to_string()),
        ));
    }

    wire.backup_created
        .ok_or_else(|| GatewayError::Malformed("save response without backup_created".to_string()))
}

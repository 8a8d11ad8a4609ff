use crate::models::prediction::{PredictionResult, RiskLevel};
use serde::{Deserialize, Serialize};

/// Display-ready projection of a [`PredictionResult`]. Holds no state of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultView {
    pub probability_text: String,
    pub risk_label: String,
    pub tone: String,
    pub icon: String,
    pub prediction_label: String,
    pub assessment: String,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Style token the webview maps to a color.
    pub fn tone(self) -> &'static str {
        match self {
            RiskLevel::Low => "success",
            RiskLevel::Medium => "warning",
            RiskLevel::High => "risk-high",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskLevel::Low => "trending-up",
            RiskLevel::Medium => "alert-triangle",
            RiskLevel::High => "trending-down",
        }
    }

    pub fn assessment(self) -> &'static str {
        match self {
            RiskLevel::Low => "this customer presents a low risk profile with good repayment indicators.",
            RiskLevel::Medium => "this customer presents a moderate risk profile requiring careful consideration.",
            RiskLevel::High => "this customer presents a high risk profile with concerning financial indicators.",
        }
    }
}

pub fn probability_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

pub fn prediction_label(prediction: u8) -> &'static str {
    if prediction == 1 {
        "Default Risk"
    } else {
        "No Default Risk"
    }
}

pub fn describe(result: &PredictionResult) -> ResultView {
    ResultView {
        probability_text: probability_percent(result.probability),
        risk_label: result.risk_level.label().to_string(),
        tone: result.risk_level.tone().to_string(),
        icon: result.risk_level.icon().to_string(),
        prediction_label: prediction_label(result.prediction).to_string(),
        assessment: format!(
            "Based on the provided data, {}",
            result.risk_level.assessment()
        ),
    }
}

pub fn completion_message(result: &PredictionResult) -> String {
    format!(
        "Risk assessment completed with {} confidence.",
        probability_percent(result.probability)
    )
}

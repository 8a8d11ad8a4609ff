use crate::models::fields::{FieldKey, FieldRecord};
use crate::models::prediction::{PredictionRequest, PredictionResult};
use crate::scoring::presentation::{describe, ResultView};
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Transient form state for one window session. Never persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub record: FieldRecord,
    pub threshold: f64,
    pub busy: bool,
    pub result: Option<PredictionResult>,
    pub last_error: Option<String>,
    pub last_completed_at: Option<i64>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl SessionState {
    pub fn new(threshold: f64) -> Self {
        Self {
            record: FieldRecord::default(),
            threshold,
            busy: false,
            result: None,
            last_error: None,
            last_completed_at: None,
        }
    }

    pub fn request(&self) -> PredictionRequest {
        PredictionRequest {
            data: self.record,
            threshold: self.threshold,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            fields: self
                .record
                .iter()
                .map(|(key, value)| FieldRow {
                    key,
                    label: key.label().to_string(),
                    value,
                })
                .collect(),
            threshold: self.threshold,
            busy: self.busy,
            result: self.result,
            view: self.result.as_ref().map(describe),
            last_error: self.last_error.clone(),
            last_completed_at: self.last_completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRow {
    pub key: FieldKey,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub fields: Vec<FieldRow>,
    pub threshold: f64,
    pub busy: bool,
    pub result: Option<PredictionResult>,
    pub view: Option<ResultView>,
    pub last_error: Option<String>,
    pub last_completed_at: Option<i64>,
}

impl SessionSnapshot {
    pub fn value_of(&self, key: FieldKey) -> Option<f64> {
        self.fields.iter().find(|row| row.key == key).map(|row| row.value)
    }
}

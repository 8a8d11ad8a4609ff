use crate::commands::form::{emit_session, lock_session, SharedSession};
use crate::commands::settings::{effective_settings_or_default, AppPaths};
use crate::models::notification::Notification;
use crate::models::session::{SessionSnapshot, SessionState};
use crate::scoring::client::{PredictionError, PredictionService, ScoringClient};
use crate::scoring::presentation::completion_message;
use crate::scoring::validation::validate_request;
use log::{info, warn};
use tauri::Emitter;
use uuid::Uuid;

#[tauri::command]
pub async fn submit_prediction(
    session: tauri::State<'_, SharedSession>,
    paths: tauri::State<'_, AppPaths>,
    app: tauri::AppHandle,
) -> Result<SessionSnapshot, String> {
    let settings = effective_settings_or_default(&paths.config_dir);
    let notify = |notification: Notification| {
        let _ = app.emit("notification", notification);
    };

    let snapshot = match ScoringClient::new(&settings.client_options()) {
        Ok(client) => {
            submit_internal(session.inner(), &client, settings.validate_inputs, notify).await?
        }
        Err(err) => absorb_failure_internal(session.inner(), &err, notify)?,
    };
    emit_session(&app, &snapshot);
    Ok(snapshot)
}

/// Clears `busy` however the submission ends, including when its future is dropped.
struct BusyGuard<'a> {
    session: &'a SharedSession,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.busy = false;
    }
}

fn record_failure(state: &mut SessionState, err: &PredictionError) -> Notification {
    warn!("prediction failed: {err}");
    state.last_error = Some(err.to_command_error());
    Notification::prediction_failed()
}

/// Reports a failure that happened before any request could be sent, with the
/// same outcome as a failed round trip: one notification, prior result kept.
pub fn absorb_failure_internal<F>(
    session: &SharedSession,
    err: &PredictionError,
    mut notify: F,
) -> Result<SessionSnapshot, String>
where
    F: FnMut(Notification),
{
    let (snapshot, notification) = {
        let mut state = lock_session(session)?;
        let notification = record_failure(&mut state, err);
        (state.snapshot(), notification)
    };
    notify(notification);
    Ok(snapshot)
}

/// One scoring round trip for the current form.
///
/// A failed prediction is absorbed here: it raises one destructive
/// notification, records `last_error`, leaves the previous result untouched and
/// still returns `Ok`. Only `BUSY` (another submission in flight) and lock
/// poisoning come back as `Err`.
pub async fn submit_internal<P, F>(
    session: &SharedSession,
    service: &P,
    validate_inputs: bool,
    mut notify: F,
) -> Result<SessionSnapshot, String>
where
    P: PredictionService,
    F: FnMut(Notification) + Send,
{
    let request = {
        let mut state = lock_session(session)?;
        if state.busy {
            return Err("BUSY: a prediction is already in flight".to_string());
        }
        state.busy = true;
        state.request()
    };
    let _busy = BusyGuard { session };

    let correlation = Uuid::new_v4();
    info!(
        "[{correlation}] submitting prediction request (threshold {})",
        request.threshold
    );

    let checked = if validate_inputs {
        validate_request(&request).map_err(PredictionError::Invalid)
    } else {
        Ok(())
    };
    let outcome = match checked {
        Ok(()) => service.predict(&request).await,
        Err(err) => Err(err),
    };

    let (snapshot, notification) = {
        let mut state = lock_session(session)?;
        state.busy = false;
        let notification = match outcome {
            Ok(result) => {
                info!(
                    "[{correlation}] prediction={} probability={:.3} risk_level={:?}",
                    result.prediction, result.probability, result.risk_level
                );
                state.result = Some(result);
                state.last_error = None;
                state.last_completed_at = Some(chrono::Utc::now().timestamp());
                Notification::info("Prediction Complete", completion_message(&result))
            }
            Err(err) => {
                warn!("[{correlation}] submission failed");
                record_failure(&mut state, &err)
            }
        };
        (state.snapshot(), notification)
    };

    notify(notification);
    Ok(snapshot)
}

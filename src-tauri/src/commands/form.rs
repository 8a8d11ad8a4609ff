use crate::commands::settings::{effective_settings_or_default, AppPaths};
use crate::models::fields::{field_descriptors, FieldDescriptor, FieldKey, FieldRecord};
use crate::models::notification::Notification;
use crate::models::presets::Preset;
use crate::models::session::{SessionSnapshot, SessionState};
use std::sync::{Arc, Mutex, MutexGuard};
use tauri::Emitter;

pub type SharedSession = Arc<Mutex<SessionState>>;

pub(crate) fn lock_session(session: &SharedSession) -> Result<MutexGuard<'_, SessionState>, String> {
    session.lock().map_err(|_| "Session lock error".to_string())
}

pub(crate) fn emit_session(app: &tauri::AppHandle, snapshot: &SessionSnapshot) {
    let _ = app.emit("session_changed", snapshot);
}

#[tauri::command]
pub async fn list_fields() -> Result<Vec<FieldDescriptor>, String> {
    Ok(field_descriptors())
}

#[tauri::command]
pub async fn get_session(
    session: tauri::State<'_, SharedSession>,
) -> Result<SessionSnapshot, String> {
    Ok(lock_session(session.inner())?.snapshot())
}

#[tauri::command]
pub async fn set_field(
    key: String,
    value: f64,
    session: tauri::State<'_, SharedSession>,
    app: tauri::AppHandle,
) -> Result<SessionSnapshot, String> {
    let snapshot = set_field_internal(session.inner(), &key, value)?;
    emit_session(&app, &snapshot);
    Ok(snapshot)
}

pub fn set_field_internal(
    session: &SharedSession,
    key: &str,
    value: f64,
) -> Result<SessionSnapshot, String> {
    let key: FieldKey = key.parse()?;
    let mut state = lock_session(session)?;
    state.record.set(key, value);
    Ok(state.snapshot())
}

#[tauri::command]
pub async fn set_threshold(
    value: f64,
    session: tauri::State<'_, SharedSession>,
    app: tauri::AppHandle,
) -> Result<SessionSnapshot, String> {
    let snapshot = set_threshold_internal(session.inner(), value)?;
    emit_session(&app, &snapshot);
    Ok(snapshot)
}

pub fn set_threshold_internal(session: &SharedSession, value: f64) -> Result<SessionSnapshot, String> {
    let mut state = lock_session(session)?;
    state.threshold = value;
    Ok(state.snapshot())
}

#[tauri::command]
pub async fn load_preset(
    name: String,
    session: tauri::State<'_, SharedSession>,
    app: tauri::AppHandle,
) -> Result<SessionSnapshot, String> {
    let snapshot = load_preset_internal(session.inner(), &name, |notification| {
        let _ = app.emit("notification", notification);
    })?;
    emit_session(&app, &snapshot);
    Ok(snapshot)
}

pub fn load_preset_internal<F>(
    session: &SharedSession,
    name: &str,
    mut notify: F,
) -> Result<SessionSnapshot, String>
where
    F: FnMut(Notification),
{
    let preset: Preset = name.parse()?;
    let snapshot = {
        let mut state = lock_session(session)?;
        state.record = preset.record();
        state.snapshot()
    };

    log::info!("loaded {name} sample record");
    notify(Notification::info(
        format!("{} Sample Loaded", preset.title()),
        format!(
            "Sample data for {} profile has been loaded.",
            preset.profile()
        ),
    ));
    Ok(snapshot)
}

#[tauri::command]
pub async fn reset_form(
    session: tauri::State<'_, SharedSession>,
    paths: tauri::State<'_, AppPaths>,
    app: tauri::AppHandle,
) -> Result<SessionSnapshot, String> {
    let default_threshold = effective_settings_or_default(&paths.config_dir).default_threshold;
    let snapshot = reset_form_internal(session.inner(), default_threshold)?;
    emit_session(&app, &snapshot);
    Ok(snapshot)
}

/// Zeroes every field and restores the threshold; the last result stays on screen.
pub fn reset_form_internal(
    session: &SharedSession,
    default_threshold: f64,
) -> Result<SessionSnapshot, String> {
    let mut state = lock_session(session)?;
    state.record = FieldRecord::default();
    state.threshold = default_threshold;
    Ok(state.snapshot())
}

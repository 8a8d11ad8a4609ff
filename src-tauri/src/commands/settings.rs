use crate::models::session::DEFAULT_THRESHOLD;
use crate::scoring::client::{ClientOptions, DEFAULT_ENDPOINT};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_SCHEMA_VERSION: i64 = 2;
const SETTINGS_FILE: &str = "settings.json";

/// Directory the settings file lives in, managed by the Tauri app.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    pub endpoint: String,
    pub default_threshold: f64,
    pub request_timeout_secs: u64,
    pub auth_token: String,
    pub validate_inputs: bool,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_threshold: DEFAULT_THRESHOLD,
            request_timeout_secs: 0,
            auth_token: String::new(),
            validate_inputs: false,
        }
    }
}

impl EffectiveSettings {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            endpoint: self.endpoint.clone(),
            timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
            auth_token: (!self.auth_token.is_empty()).then(|| self.auth_token.clone()),
        }
    }
}

#[tauri::command]
pub async fn get_settings(paths: tauri::State<'_, AppPaths>) -> Result<Value, String> {
    load_settings_from_disk(&paths.config_dir)
}

#[tauri::command]
pub async fn save_settings(
    paths: tauri::State<'_, AppPaths>,
    settings: Value,
) -> Result<Value, String> {
    save_settings_to_disk(&paths.config_dir, settings)
}

pub fn load_effective_settings(config_dir: &Path) -> Result<EffectiveSettings, String> {
    let settings = load_settings_from_disk(config_dir)?;
    let defaults = EffectiveSettings::default();

    Ok(EffectiveSettings {
        endpoint: settings
            .get("endpoint")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.endpoint),
        default_threshold: settings
            .get("defaultThreshold")
            .and_then(Value::as_f64)
            .unwrap_or(defaults.default_threshold),
        request_timeout_secs: settings
            .get("requestTimeoutSecs")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.request_timeout_secs),
        auth_token: settings
            .get("authToken")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.auth_token),
        validate_inputs: settings
            .get("validateInputs")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.validate_inputs),
    })
}

/// Settings for a single operation; unreadable configuration degrades to defaults.
pub fn effective_settings_or_default(config_dir: &Path) -> EffectiveSettings {
    load_effective_settings(config_dir).unwrap_or_else(|e| {
        log::warn!("falling back to default settings: {e}");
        EffectiveSettings::default()
    })
}

pub fn load_settings_from_disk(config_dir: &Path) -> Result<Value, String> {
    let path = settings_path(config_dir);
    ensure_config_dir(config_dir)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("SETTINGS_IO: Failed to read settings.json: {e}"))?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(e) => {
                // Leave the unreadable file for the user to repair.
                log::warn!(
                    "ignoring unparseable {} ({e}); using default settings",
                    path.display()
                );
                return Ok(migrate_settings(json!({})));
            }
        }
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(config_dir: &Path, settings: Value) -> Result<Value, String> {
    let path = settings_path(config_dir);
    ensure_config_dir(config_dir)?;

    let mut merged = load_settings_from_disk(config_dir).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    log::info!("settings saved to {}", path.display());
    Ok(migrated)
}

fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE)
}

fn ensure_config_dir(config_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(config_dir)
        .map_err(|e| format!("SETTINGS_IO: Failed to create config directory: {e}"))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("SETTINGS_IO: Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("SETTINGS_IO: Failed to write settings.json: {e}"))
}

fn migrate_settings(input: Value) -> Value {
    let defaults = default_settings();
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let version = out
        .get("schema_version")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if version < 2 {
        // V1 stored the slider position as a percentage.
        migrate_threshold_from_percentage(&mut out);
    }

    deep_merge_defaults(&mut out, &defaults);
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "endpoint": DEFAULT_ENDPOINT,
        "defaultThreshold": DEFAULT_THRESHOLD,
        "requestTimeoutSecs": 0,
        "authToken": "",
        "validateInputs": false
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn migrate_threshold_from_percentage(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };
    let Some(raw) = obj.get("defaultThreshold").and_then(Value::as_f64) else {
        return;
    };
    if raw > 1.0 {
        obj.insert("defaultThreshold".to_string(), json!(raw / 100.0));
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_f64(obj, "defaultThreshold", 0.0, 1.0, DEFAULT_THRESHOLD);
    clamp_u64(obj, "requestTimeoutSecs", 0, 300, 0);
    ensure_string(obj, "endpoint", DEFAULT_ENDPOINT);
    ensure_string(obj, "authToken", "");
    ensure_bool(obj, "validateInputs", false);

    // An endpoint the client cannot POST to is worse than the default one.
    let endpoint_ok = obj
        .get("endpoint")
        .and_then(Value::as_str)
        .is_some_and(|v| v.starts_with("http://") || v.starts_with("https://"));
    if !endpoint_ok {
        obj.insert("endpoint".to_string(), json!(DEFAULT_ENDPOINT));
    }
}

fn clamp_f64(map: &mut Map<String, Value>, key: &str, min: f64, max: f64, default: f64) {
    let raw = map
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn ensure_string(map: &mut Map<String, Value>, key: &str, default: &str) {
    let value = map
        .get(key)
        .and_then(Value::as_str)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| default.to_string());
    map.insert(key.to_string(), json!(value));
}

fn ensure_bool(map: &mut Map<String, Value>, key: &str, default: bool) {
    let value = map.get(key).and_then(Value::as_bool).unwrap_or(default);
    map.insert(key.to_string(), json!(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrates_percentage_threshold_to_fraction() {
        let input = json!({
            "schema_version": 1,
            "defaultThreshold": 35
        });

        let migrated = migrate_settings(input);
        assert_eq!(migrated["defaultThreshold"], json!(0.35));
        assert_eq!(
            migrated
                .get("schema_version")
                .and_then(Value::as_i64)
                .unwrap(),
            SETTINGS_SCHEMA_VERSION
        );
    }

    #[test]
    fn current_schema_clamps_instead_of_rescaling() {
        let migrated = migrate_settings(json!({
            "schema_version": 2,
            "defaultThreshold": 7.5,
            "requestTimeoutSecs": 9000
        }));

        assert_eq!(migrated["defaultThreshold"], json!(1.0));
        assert_eq!(migrated["requestTimeoutSecs"], json!(300));
    }

    #[test]
    fn merges_partial_settings_without_losing_existing_values() {
        let mut existing = default_settings();
        merge_settings(&mut existing, &json!({ "requestTimeoutSecs": 15 }));
        let migrated = migrate_settings(existing);

        assert_eq!(migrated["requestTimeoutSecs"], json!(15));
        assert_eq!(migrated["endpoint"], json!(DEFAULT_ENDPOINT));
        assert_eq!(migrated["validateInputs"], json!(false));
    }

    #[test]
    fn rejects_endpoint_without_http_scheme() {
        let migrated = migrate_settings(json!({ "endpoint": "ftp://scores.local/predict" }));
        assert_eq!(migrated["endpoint"], json!(DEFAULT_ENDPOINT));
    }

    #[test]
    fn defaults_produce_unhardened_client_options() {
        let options = EffectiveSettings::default().client_options();
        assert_eq!(options.endpoint, DEFAULT_ENDPOINT);
        assert!(options.timeout.is_none());
        assert!(options.auth_token.is_none());

        let hardened = EffectiveSettings {
            request_timeout_secs: 10,
            auth_token: "secret".to_string(),
            ..EffectiveSettings::default()
        }
        .client_options();
        assert_eq!(hardened.timeout, Some(Duration::from_secs(10)));
        assert_eq!(hardened.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn unparseable_file_is_left_untouched_and_defaults_apply() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE);
        let truncated = r#"{"endpoint":"https://mine/predict","authToken":"tok","#;
        fs::write(&path, truncated).expect("write truncated settings");

        let loaded = load_settings_from_disk(dir.path()).expect("load settings");
        assert_eq!(loaded["endpoint"], json!(DEFAULT_ENDPOINT));
        assert_eq!(
            load_effective_settings(dir.path()).expect("effective"),
            EffectiveSettings::default()
        );
        assert_eq!(fs::read_to_string(&path).expect("reread"), truncated);
    }

    #[test]
    fn unusable_config_dir_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let not_a_dir = dir.path().join("occupied");
        fs::write(&not_a_dir, "plain file").expect("write blocker");

        assert!(load_effective_settings(&not_a_dir).is_err());
        assert_eq!(
            effective_settings_or_default(&not_a_dir),
            EffectiveSettings::default()
        );
    }

    #[test]
    fn load_writes_defaults_on_first_run() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = load_settings_from_disk(dir.path()).expect("load settings");

        assert!(dir.path().join(SETTINGS_FILE).exists());
        assert_eq!(loaded["defaultThreshold"], json!(DEFAULT_THRESHOLD));
        assert_eq!(
            load_effective_settings(dir.path()).expect("effective"),
            EffectiveSettings::default()
        );
    }
}

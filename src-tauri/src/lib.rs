pub mod commands;
pub mod models;
pub mod scoring;

use commands::{
    form::{get_session, list_fields, load_preset, reset_form, set_field, set_threshold},
    predict::submit_prediction,
    settings::{effective_settings_or_default, get_settings, save_settings, AppPaths},
};
use models::session::SessionState;
use std::sync::{Arc, Mutex};
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    tauri::Builder::default()
        .setup(|app| {
            let config_dir = app.path().app_config_dir()?;
            let settings = effective_settings_or_default(&config_dir);
            log::info!("scoring endpoint: {}", settings.endpoint);

            app.manage(AppPaths { config_dir });
            app.manage(Arc::new(Mutex::new(SessionState::new(
                settings.default_threshold,
            ))));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            list_fields,
            get_session,
            set_field,
            set_threshold,
            load_preset,
            reset_form,
            submit_prediction,
            get_settings,
            save_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

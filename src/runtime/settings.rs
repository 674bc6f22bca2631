use log::{debug, warn};

use crate::config;

pub fn load_settings() -> config::Settings {
    if let Some(path) = config::resolve_config_path() {
        debug!("config file: {}", path.display());
    }
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent startup.
            warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

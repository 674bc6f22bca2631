use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tuneloop_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNELOOP_CONFIG_PATH", "/tmp/tuneloop-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tuneloop-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tuneloop")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tuneloop")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_documented_values() {
    let s = Settings::default();
    assert_eq!(s.library.extensions, vec!["mp3", "wav", "flac", "m4a", "aac"]);
    assert_eq!(s.pager.page_size, 10);
    assert_eq!(s.pager.timeout_secs, 60);
    assert_eq!(s.playback.loop_no_match, NoMatchPolicy::Report);
    assert_eq!(s.console.command_prefix, "!");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_policy_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
root = "/srv/music"
extensions = ["mp3", "ogg"]
include_hidden = false
follow_links = false

[playback]
loop_no_match = "everything"

[audio]
poll_interval_ms = 50

[pager]
page_size = 5
timeout_secs = 30

[console]
command_prefix = "?"
default_channel = 42
default_user = 7
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNELOOP_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TUNELOOP__PAGER__PAGE_SIZE");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.root, "/srv/music");
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.playback.loop_no_match, NoMatchPolicy::Fallback);
    assert_eq!(s.audio.poll_interval_ms, 50);
    assert_eq!(s.pager.page_size, 5);
    assert_eq!(s.pager.timeout_secs, 30);
    assert_eq!(s.console.command_prefix, "?");
    assert_eq!(s.console.default_channel, 42);
    assert_eq!(s.console.default_user, 7);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[pager]
page_size = 25
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNELOOP_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TUNELOOP__PAGER__PAGE_SIZE", "3");

    let s = Settings::load().unwrap();
    assert_eq!(s.pager.page_size, 3);
}

#[test]
fn validate_rejects_zero_page_size_and_poll_interval() {
    let mut s = Settings::default();
    s.pager.page_size = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.poll_interval_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_bounds_pager_timeout() {
    let mut s = Settings::default();
    s.pager.timeout_secs = MAX_PAGER_TIMEOUT_SECS;
    assert!(s.validate().is_ok());

    s.pager.timeout_secs = u64::MAX;
    assert!(s.validate().is_err());
}

#[test]
fn to_toml_renders_every_section() {
    let rendered = Settings::default().to_toml().unwrap();
    for section in ["[library]", "[playback]", "[audio]", "[pager]", "[console]"] {
        assert!(rendered.contains(section), "missing {section} in:\n{rendered}");
    }
    assert!(rendered.contains("loop_no_match = \"report\""));
}

use std::{
    collections::HashMap,
    env,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;
use log::warn;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&default_config_path(), env::vars())
    }

    /// Like `load`, with an explicit rc file and environment. A missing rc
    /// file is skipped.
    pub fn load_from<I>(path: &Path, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let rc = fs::read_to_string(path).ok();
        let mut cfg = Self::from_sources(rc.as_deref(), vars);
        cfg.config_path = path.to_path_buf();
        cfg
    }

    /// Defaults, then `KEY=VALUE` lines of an rc file, then environment.
    pub fn from_sources<I>(rc: Option<&str>, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = default_map();

        // Read .lv2proberc lines if present
        if let Some(text) = rc {
            for line in text.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((k, v)) = line.split_once('=') {
                    map.insert(k.trim().to_string(), v.trim().to_string());
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in vars {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path: default_config_path() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// `COMMAND_TIMEOUT` in seconds. `None` when unset or unparsable, so the
    /// caller's default applies; `Some(None)` when explicitly disabled.
    pub fn command_timeout(&self) -> Option<Option<Duration>> {
        let raw = self.get("COMMAND_TIMEOUT")?;
        let parsed = parse_timeout(&raw);
        if parsed.is_none() {
            warn!("ignoring COMMAND_TIMEOUT `{raw}`: expected seconds, 0 or none");
        }
        parsed
    }
}

/// `Some(None)` disables the timeout; `None` means the value is invalid.
fn parse_timeout(raw: &str) -> Option<Option<Duration>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    let secs = raw.parse::<f64>().ok().filter(|s| *s >= 0.0)?;
    let d = Duration::try_from_secs_f64(secs).ok()?;
    Some(Some(d).filter(|d| !d.is_zero()))
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &["LV2LS_BIN", "LV2INFO_BIN", "COMMAND_TIMEOUT", "DEFAULT_COLOR"];
    KEYS.contains(&k)
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("lv2probe").join(".lv2proberc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("LV2LS_BIN".into(), "lv2ls".into());
    m.insert("LV2INFO_BIN".into(), "lv2info".into());
    m.insert("DEFAULT_COLOR".into(), "true".into());
    m
}

/// Effective settings for one probe run: CLI over config over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lv2ls: String,
    pub lv2info: String,
    pub timeout: Option<Duration>,
    pub color: bool,
}

impl Settings {
    pub fn resolve(args: &Cli, cfg: &Config, default_timeout: Option<Duration>) -> Self {
        let timeout = if args.no_timeout {
            None
        } else if let Some(secs) = args.timeout {
            // --timeout 0 behaves like --no-timeout
            Some(Duration::from_secs(secs)).filter(|d| !d.is_zero())
        } else {
            cfg.command_timeout().unwrap_or(default_timeout)
        };
        Self {
            lv2ls: args
                .lv2ls
                .clone()
                .or_else(|| cfg.get("LV2LS_BIN"))
                .unwrap_or_else(|| "lv2ls".to_string()),
            lv2info: args
                .lv2info
                .clone()
                .or_else(|| cfg.get("LV2INFO_BIN"))
                .unwrap_or_else(|| "lv2info".to_string()),
            timeout,
            color: !args.no_color && cfg.get_bool("DEFAULT_COLOR"),
        }
    }
}

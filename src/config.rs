use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::extras::{EmphasisExtras, Extension};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Extra emphasis families to recognize. Absent means all of them; an
    /// empty list leaves only `*` and `_`.
    #[serde(default)]
    pub extensions: Option<Vec<Extension>>,
}

impl Config {
    pub fn extras(&self) -> EmphasisExtras {
        match &self.extensions {
            Some(list) => list.iter().copied().collect(),
            None => EmphasisExtras::DEFAULT,
        }
    }
}

const CANDIDATE_NAMES: &[&str] = &[".inlinemark.toml", "inlinemark.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    let s = fs::read_to_string(path)?;
    parse_config_str(&s, path)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("inlinemark").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("inlinemark")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .inlinemark.toml, inlinemark.toml
/// 3) XDG: $XDG_CONFIG_HOME/inlinemark/config.toml or ~/.config/inlinemark/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        log::debug!("Using config {}", path.display());
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => {
                log::debug!("Using config {}", p.display());
                return Ok((cfg, Some(p)));
            }
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    if let Some(p) = xdg_config_path() {
        match read_config(&p) {
            Ok(cfg) => {
                log::debug!("Using config {}", p.display());
                return Ok((cfg, Some(p)));
            }
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    Ok((Config::default(), None))
}

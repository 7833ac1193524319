use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, Command};
use crate::error::{Error, Result};

pub const DEFAULT_DEPTH: usize = 2;
const HISTORY_FILE: &str = "history.jsonl";
const CONFIG_FILE: &str = "config.toml";

pub struct Config {
    pub history: PathBuf,
    pub root: PathBuf,
    pub depth: usize,
    pub json_output: bool,
}

/// Optional settings from `config.toml`. Every key may be omitted.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub history: Option<PathBuf>,
    pub depth: Option<usize>,
}

impl FileConfig {
    /// Parse `path`; a missing file yields the empty config.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Config {
    /// Flags win over the config file, which wins over built-in defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            // an explicit path has to exist
            Some(path) => FileConfig::parse(path, &fs::read_to_string(path)?)?,
            None => match default_config_path() {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            },
        };

        Self::resolve(cli, file)
    }

    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let history = match cli.history.clone().or(file.history) {
            Some(path) => path,
            None => default_history_path()?,
        };

        let (root, depth) = match &cli.command {
            Command::Scan(args) => (
                args.root.clone().unwrap_or_else(home_dir),
                args.depth.or(file.depth).unwrap_or(DEFAULT_DEPTH),
            ),
            _ => (home_dir(), file.depth.unwrap_or(DEFAULT_DEPTH)),
        };

        Ok(Config {
            history,
            root,
            depth,
            json_output: cli.json,
        })
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "snaplog")
}

/// `~/.config/snaplog/config.toml` or platform equivalent
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// `~/.local/share/snaplog/history.jsonl` or platform equivalent
pub fn default_history_path() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(HISTORY_FILE))
        .ok_or(Error::NoDataDir)
}

fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("snaplog").chain(args.iter().copied()))
    }

    #[test]
    fn missing_config_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let file = FileConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn config_file_keys_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "history = \"/var/lib/snaplog/disk.json\"\ndepth = 4\n").unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.history, Some(PathBuf::from("/var/lib/snaplog/disk.json")));
        assert_eq!(file.depth, Some(4));
    }

    #[test]
    fn invalid_config_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "depth = \"deep\"").unwrap();

        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn flags_override_file() {
        let file = FileConfig { history: Some(PathBuf::from("file.json")), depth: Some(4) };
        let config = Config::resolve(
            &cli(&["--history", "flag.jsonl", "--json", "scan", "/data", "--depth", "1"]),
            file,
        )
        .unwrap();

        assert_eq!(config.history, PathBuf::from("flag.jsonl"));
        assert_eq!(config.root, PathBuf::from("/data"));
        assert_eq!(config.depth, 1);
        assert!(config.json_output);
    }

    #[test]
    fn file_fills_missing_flags() {
        let file = FileConfig { history: Some(PathBuf::from("file.json")), depth: Some(4) };
        let config = Config::resolve(&cli(&["scan"]), file).unwrap();

        assert_eq!(config.history, PathBuf::from("file.json"));
        assert_eq!(config.depth, 4);
    }

    #[test]
    fn depth_defaults_when_unset() {
        let config = Config::resolve(&cli(&["--history", "h.jsonl", "report"]), FileConfig::default()).unwrap();
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert!(!config.json_output);
    }
}

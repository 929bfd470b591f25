use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};

/// Endpoint used when the config file doesn't name one. Deployments point
/// this at their own analysis backend via `analysis_url` in config.toml.
const DEFAULT_ANALYSIS_URL: &str = "http://localhost:3000/analyze";

pub(crate) const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute directory where the journal snapshot file lives.
    pub journal_dir: PathBuf,
    /// URL of the remote nutrition-estimation service.
    pub analysis_url: String,
    /// Per-request timeout for the photo upload.
    pub upload_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    journal_dir: Option<PathBuf>,
    analysis_url: Option<String>,
    upload_timeout_secs: Option<u64>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults for anything missing.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|_| FileConfig {
            journal_dir: None,
            analysis_url: None,
            upload_timeout_secs: None,
        });

        let journal_dir = file_config
            .journal_dir
            .unwrap_or_else(Self::default_journal_dir);

        let analysis_url = file_config
            .analysis_url
            .unwrap_or_else(|| DEFAULT_ANALYSIS_URL.to_string());

        let upload_timeout = Duration::from_secs(
            file_config
                .upload_timeout_secs
                .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS),
        );

        Ok(Self {
            journal_dir,
            analysis_url,
            upload_timeout,
        })
    }

    /// Default journal root: `{data_dir}/foodlog`
    /// - macOS:   `~/Library/Application Support/foodlog`
    /// - Linux:   `$XDG_DATA_HOME/foodlog` or `~/.local/share/foodlog`
    /// - Windows: `%APPDATA%\foodlog`
    fn default_journal_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("foodlog");
            p
        } else {
            PathBuf::from("./foodlog")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("foodlog")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("foodlog").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            journal_dir: None,
            analysis_url: None,
            upload_timeout_secs: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::path::Path;

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(journal_dir: PathBuf) -> Config {
        Config {
            journal_dir,
            analysis_url: DEFAULT_ANALYSIS_URL.to_string(),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("foodlog")
                .join("config.toml");
            let expected_native = b.config_dir().join("foodlog").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_journal_dir_and_url() {
        let toml = r#"
            journal_dir = "/tmp/my-foodlog"
            analysis_url = "https://api.example.com/analyze"
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(fc.journal_dir.as_deref(), Some(Path::new("/tmp/my-foodlog")));
        assert_eq!(
            fc.analysis_url.as_deref(),
            Some("https://api.example.com/analyze")
        );
        assert!(fc.upload_timeout_secs.is_none());
    }

    #[test]
    fn parse_file_accepts_timeout_override() {
        let toml = "upload_timeout_secs = 10";
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(fc.upload_timeout_secs, Some(10));
    }

    #[test]
    fn parse_file_rejects_invalid_toml() {
        assert!(super::Config::parse_file("journal_dir = [").is_err());
    }
}

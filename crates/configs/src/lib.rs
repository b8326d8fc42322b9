use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub conventions: ConventionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Naming rule applied to injected services.
#[derive(Debug, Clone, Deserialize)]
pub struct ConventionsConfig {
    #[serde(default = "default_marker")]
    pub marker: String,
    /// `contains` or `ends_with`
    #[serde(default = "default_match_mode")]
    pub match_mode: String,
}

impl Default for ConventionsConfig {
    fn default() -> Self {
        Self { marker: default_marker(), match_mode: default_match_mode() }
    }
}

fn default_marker() -> String { "Service".to_string() }
fn default_match_mode() -> String { "contains".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.conventions.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl ConventionsConfig {
    fn normalize(&mut self) -> Result<()> {
        self.marker = self.marker.trim().to_string();
        if self.marker.is_empty() {
            return Err(anyhow!("conventions.marker must not be empty"));
        }
        self.match_mode = self.match_mode.trim().to_lowercase();
        if !matches!(self.match_mode.as_str(), "contains" | "ends_with") {
            return Err(anyhow!(
                "conventions.match_mode must be `contains` or `ends_with`, got `{}`",
                self.match_mode
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.conventions.marker, "Service");
        assert_eq!(cfg.conventions.match_mode, "contains");
    }

    #[test]
    fn parses_conventions_section() {
        let mut cfg = load_from_str(
            r#"
            [server]
            host = ""
            port = 9000
            worker_threads = 0

            [conventions]
            match_mode = " Ends_With "
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.conventions.match_mode, "ends_with");
        assert_eq!(cfg.conventions.marker, "Service");
    }

    #[test]
    fn rejects_bad_conventions() {
        let mut cfg = load_from_str("[conventions]\nmarker = \"  \"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = load_from_str("[conventions]\nmatch_mode = \"suffix\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_zero_port() {
        let mut cfg = load_from_str("[server]\nhost = \"0.0.0.0\"\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }
}

use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Replacement for the bundled OpenAPI document.
    pub swagger_file: Option<PathBuf>,
    pub build: BuildEnv,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| "public".to_string())
                .into(),
            swagger_file: lookup("SWAGGER_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            build: BuildEnv::from_lookup(&lookup),
        })
    }
}

/// Raw build and scan values as found in the environment.
///
/// Nothing is defaulted here; that happens when the `/devsecops-info`
/// payload is assembled so each field falls back on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    pub app_name: Option<String>,
    pub environment: Option<String>,
    pub commit_id: Option<String>,
    pub build_time: Option<String>,
    pub trivy_last_run: Option<String>,
    pub trivy_vulns: Option<String>,
    pub trivy_status: Option<String>,
    pub sonar_last_run: Option<String>,
    pub sonar_gate: Option<String>,
    pub zap_last_run: Option<String>,
    pub zap_alerts: Option<String>,
    pub zap_status: Option<String>,
}

impl BuildEnv {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            app_name: lookup("APP_NAME"),
            environment: lookup("NODE_ENV"),
            commit_id: lookup("COMMIT_ID"),
            build_time: lookup("BUILD_TIME"),
            trivy_last_run: lookup("TRIVY_LAST_RUN"),
            trivy_vulns: lookup("TRIVY_VULNS"),
            trivy_status: lookup("TRIVY_STATUS"),
            sonar_last_run: lookup("SONAR_LAST_RUN"),
            sonar_gate: lookup("SONAR_GATE"),
            zap_last_run: lookup("ZAP_LAST_RUN"),
            zap_alerts: lookup("ZAP_ALERTS"),
            zap_status: lookup("ZAP_STATUS"),
        }
    }
}

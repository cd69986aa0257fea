use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::BuildEnv;

pub const CI_SYSTEM: &str = "Jenkins";
pub const PROMETHEUS_ENDPOINT: &str = "/metrics";
pub const GRAFANA_DASHBOARD: &str = "http://localhost:3001";
pub const SWAGGER_DOCS: &str = "/swagger";

/// Payload of `GET /devsecops-info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Omitted from the JSON entirely when `APP_NAME` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    pub environment: String,
    pub build: Build,
    pub security_scans: SecurityScans,
    pub monitoring: Monitoring,
    pub swagger_docs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub commit_id: String,
    pub build_time: String,
    pub ci_system: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScans {
    pub trivy: TrivyScan,
    pub sonarqube: SonarQubeScan,
    pub zap: ZapScan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrivyScan {
    pub last_run: Option<String>,
    pub vulnerabilities_found: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SonarQubeScan {
    pub last_run: Option<String>,
    pub quality_gate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapScan {
    pub last_run: Option<String>,
    pub alerts: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitoring {
    pub prometheus_endpoint: String,
    pub grafana_dashboards: Vec<String>,
}

impl BuildInfo {
    /// Build the payload from raw environment values.
    ///
    /// Every field falls back independently. Empty values count as unset,
    /// except for `app_name` which is passed through as-is. `now` is only
    /// used when no build time was provided.
    pub fn assemble(env: &BuildEnv, now: DateTime<Utc>) -> Self {
        Self {
            app_name: env.app_name.clone(),
            environment: or_default(&env.environment, "development"),
            build: Build {
                commit_id: or_default(&env.commit_id, "unknown"),
                build_time: present(&env.build_time)
                    .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ci_system: CI_SYSTEM.to_string(),
            },
            security_scans: SecurityScans {
                trivy: TrivyScan {
                    last_run: present(&env.trivy_last_run),
                    vulnerabilities_found: count_or_zero("TRIVY_VULNS", &env.trivy_vulns),
                    status: or_default(&env.trivy_status, "unknown"),
                },
                sonarqube: SonarQubeScan {
                    last_run: present(&env.sonar_last_run),
                    quality_gate: or_default(&env.sonar_gate, "unknown"),
                },
                zap: ZapScan {
                    last_run: present(&env.zap_last_run),
                    alerts: count_or_zero("ZAP_ALERTS", &env.zap_alerts),
                    status: or_default(&env.zap_status, "not available"),
                },
            },
            monitoring: Monitoring {
                prometheus_endpoint: PROMETHEUS_ENDPOINT.to_string(),
                grafana_dashboards: vec![GRAFANA_DASHBOARD.to_string()],
            },
            swagger_docs: SWAGGER_DOCS.to_string(),
        }
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

fn or_default(value: &Option<String>, default: &str) -> String {
    present(value).unwrap_or_else(|| default.to_string())
}

/// Integer counts never fail the request; garbage reads as 0.
fn count_or_zero(var: &str, value: &Option<String>) -> i64 {
    let Some(raw) = present(value) else {
        return 0;
    };
    match raw.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            warn!(var, value = %raw, "Ignoring non-integer scan count");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn defaults_for_empty_environment() {
        let info = BuildInfo::assemble(&BuildEnv::default(), fixed_now());
        let value = serde_json::to_value(&info).unwrap();

        assert_eq!(
            value,
            json!({
                "environment": "development",
                "build": {
                    "commitId": "unknown",
                    "buildTime": "2024-03-01T12:30:45.000Z",
                    "ciSystem": "Jenkins",
                },
                "securityScans": {
                    "trivy": { "lastRun": null, "vulnerabilitiesFound": 0, "status": "unknown" },
                    "sonarqube": { "lastRun": null, "qualityGate": "unknown" },
                    "zap": { "lastRun": null, "alerts": 0, "status": "not available" },
                },
                "monitoring": {
                    "prometheusEndpoint": "/metrics",
                    "grafanaDashboards": ["http://localhost:3001"],
                },
                "swaggerDocs": "/swagger",
            })
        );
        assert!(value.get("appName").is_none());
    }

    #[test]
    fn environment_values_win() {
        let env = BuildEnv {
            app_name: Some("status-service".into()),
            environment: Some("production".into()),
            commit_id: Some("9f2c1e7".into()),
            build_time: Some("2024-02-29T08:00:00Z".into()),
            trivy_last_run: Some("2024-02-29T08:05:00Z".into()),
            trivy_vulns: Some("7".into()),
            trivy_status: Some("passed".into()),
            sonar_last_run: Some("2024-02-29T08:06:00Z".into()),
            sonar_gate: Some("OK".into()),
            zap_last_run: Some("2024-02-29T08:07:00Z".into()),
            zap_alerts: Some("3".into()),
            zap_status: Some("warn".into()),
        };
        let info = BuildInfo::assemble(&env, fixed_now());

        assert_eq!(info.app_name.as_deref(), Some("status-service"));
        assert_eq!(info.environment, "production");
        assert_eq!(info.build.commit_id, "9f2c1e7");
        assert_eq!(info.build.build_time, "2024-02-29T08:00:00Z");
        assert_eq!(info.security_scans.trivy.vulnerabilities_found, 7);
        assert_eq!(info.security_scans.trivy.status, "passed");
        assert_eq!(info.security_scans.sonarqube.quality_gate, "OK");
        assert_eq!(info.security_scans.zap.alerts, 3);
        assert_eq!(info.security_scans.zap.status, "warn");
        assert_eq!(
            info.security_scans.zap.last_run.as_deref(),
            Some("2024-02-29T08:07:00Z")
        );
    }

    #[test]
    fn scan_counts_serialise_as_integers() {
        let env = BuildEnv {
            trivy_vulns: Some("7".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(BuildInfo::assemble(&env, fixed_now())).unwrap();
        assert_eq!(value["securityScans"]["trivy"]["vulnerabilitiesFound"], json!(7));
    }

    #[test]
    fn bad_counts_fall_back_to_zero() {
        let env = BuildEnv {
            trivy_vulns: Some("lots".into()),
            zap_alerts: Some(" 4 ".into()),
            ..Default::default()
        };
        let info = BuildInfo::assemble(&env, fixed_now());
        assert_eq!(info.security_scans.trivy.vulnerabilities_found, 0);
        assert_eq!(info.security_scans.zap.alerts, 4);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let env = BuildEnv {
            app_name: Some(String::new()),
            environment: Some(String::new()),
            trivy_last_run: Some(String::new()),
            ..Default::default()
        };
        let info = BuildInfo::assemble(&env, fixed_now());

        // appName has no default, so an empty value is reported as-is.
        assert_eq!(info.app_name.as_deref(), Some(""));
        assert_eq!(info.environment, "development");
        assert_eq!(info.security_scans.trivy.last_run, None);
    }

    #[test]
    fn fields_default_independently() {
        let env = BuildEnv {
            commit_id: Some("abc".into()),
            ..Default::default()
        };
        let info = BuildInfo::assemble(&env, fixed_now());
        assert_eq!(info.build.commit_id, "abc");
        assert_eq!(info.build.build_time, "2024-03-01T12:30:45.000Z");
        assert_eq!(info.security_scans.sonarqube.quality_gate, "unknown");
    }
}

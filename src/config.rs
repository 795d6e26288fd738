use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::*;
use crate::error::{RebuildError, Result};
use crate::output::Destination;
use crate::pipeline::ble::{BlePipelineConfig, BleSources, BleThresholds};
use crate::pipeline::oui::OuiPipelineConfig;

/// Optional TOML settings shared by both tools. Every key has a default,
/// so an absent file reproduces the stock repository layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repo_root: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub oui: OuiConfig,
    pub ble: BleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OuiConfig {
    pub ieee_sources: Vec<PathBuf>,
    pub override_file: PathBuf,
    pub min_entries: usize,
    /// Replaces the stock destinations entirely when present.
    pub destinations: Option<Vec<DestinationConfig>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationConfig {
    pub path: PathBuf,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BleConfig {
    pub company_url: String,
    pub service_url: String,
    pub characteristic_url: String,
    pub descriptor_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub resources_dir: PathBuf,
    pub min_companies: usize,
    pub min_assigned: usize,
    pub min_services: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            log_dir: None,
            oui: OuiConfig::default(),
            ble: BleConfig::default(),
        }
    }
}

impl Default for OuiConfig {
    fn default() -> Self {
        Self {
            ieee_sources: vec![
                PathBuf::from(IEEE_PRIMARY_SOURCE),
                PathBuf::from(IEEE_SECONDARY_SOURCE),
            ],
            override_file: PathBuf::from(OUI_OVERRIDE_SOURCE),
            min_entries: MIN_OUI_ENTRIES,
            destinations: None,
        }
    }
}

impl Default for BleConfig {
    fn default() -> Self {
        Self {
            company_url: COMPANY_URL.to_string(),
            service_url: SERVICE_URL.to_string(),
            characteristic_url: CHARACTERISTIC_URL.to_string(),
            descriptor_url: DESCRIPTOR_URL.to_string(),
            user_agent: BLE_USER_AGENT.to_string(),
            timeout_secs: BLE_FETCH_TIMEOUT_SECS,
            resources_dir: PathBuf::from(BLE_RESOURCES_DIR),
            min_companies: MIN_COMPANIES,
            min_assigned: MIN_ASSIGNED,
            min_services: MIN_SERVICES,
        }
    }
}

impl Config {
    /// Loads `path` when given, else `vendor_tables.toml` from the working
    /// directory if it exists, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            RebuildError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        }
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir.as_deref().map(|p| self.resolve(p))
    }

    pub fn oui_pipeline(&self) -> OuiPipelineConfig {
        let destinations = match &self.oui.destinations {
            Some(list) => list
                .iter()
                .map(|d| Destination {
                    path: self.resolve(&d.path),
                    required: d.required,
                })
                .collect(),
            None => self.default_oui_destinations(),
        };
        OuiPipelineConfig {
            ieee_sources: self.oui.ieee_sources.iter().map(|p| self.resolve(p)).collect(),
            override_file: self.resolve(&self.oui.override_file),
            destinations,
            min_entries: self.oui.min_entries,
        }
    }

    fn default_oui_destinations(&self) -> Vec<Destination> {
        let mut destinations = vec![
            Destination::required(self.resolve(Path::new(OUI_COMBINED_OUT))),
            Destination::required(self.resolve(Path::new(OUI_DEVSTATION_OUT))),
        ];
        match dirs::home_dir() {
            Some(home) => destinations.push(Destination::best_effort(home.join(OUI_RUNTIME_OUT))),
            None => warn!("home directory unknown, skipping runtime OUI install"),
        }
        destinations
    }

    pub fn ble_pipeline(&self) -> BlePipelineConfig {
        let ble = &self.ble;
        let resources = self.resolve(&ble.resources_dir);
        BlePipelineConfig {
            sources: BleSources {
                company: ble.company_url.clone(),
                service: ble.service_url.clone(),
                characteristic: ble.characteristic_url.clone(),
                descriptor: ble.descriptor_url.clone(),
            },
            thresholds: BleThresholds {
                companies: ble.min_companies,
                assigned: ble.min_assigned,
                services: ble.min_services,
            },
            company_destinations: vec![Destination::required(resources.join(BLE_COMPANY_FILE))],
            assigned_destinations: vec![Destination::required(resources.join(BLE_ASSIGNED_FILE))],
            service_destinations: vec![Destination::required(resources.join(BLE_SERVICE_FILE))],
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.ble.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_repository_layout() {
        let cfg = Config::default();
        let oui = cfg.oui_pipeline();
        assert_eq!(
            oui.ieee_sources,
            vec![PathBuf::from("./data/resources/oui.txt"), PathBuf::from("./data/resources/oui 2.txt")]
        );
        assert_eq!(oui.min_entries, 1000);
        assert!(oui.destinations[0].required);
        assert!(oui.destinations[1].required);
        assert!(oui.destinations.iter().skip(2).all(|d| !d.required));

        let ble = cfg.ble_pipeline();
        assert_eq!(ble.thresholds.companies, 3900);
        assert_eq!(ble.thresholds.assigned, 600);
        assert_eq!(ble.thresholds.services, 75);
        assert!(ble.company_destinations[0].path.ends_with("BLECompanyIDs.txt"));
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn toml_overrides_resolve_against_repo_root() {
        let cfg = Config::from_toml_str(
            r#"
            repo_root = "/srv/sods"
            log_dir = "logs"

            [oui]
            min_entries = 1
            [[oui.destinations]]
            path = "out/oui.txt"
            [[oui.destinations]]
            path = "/tmp/runtime.txt"
            required = false

            [ble]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        let oui = cfg.oui_pipeline();
        assert_eq!(oui.min_entries, 1);
        assert_eq!(
            oui.destinations,
            vec![
                Destination::required("/srv/sods/out/oui.txt"),
                Destination::best_effort("/tmp/runtime.txt"),
            ]
        );
        assert_eq!(oui.override_file, PathBuf::from("/srv/sods").join(OUI_OVERRIDE_SOURCE));
        assert_eq!(cfg.log_dir(), Some(PathBuf::from("/srv/sods/logs")));
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.ble.user_agent, BLE_USER_AGENT);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, RebuildError::Config(_)));
    }
}

//! Scenario loading from a JSON file or the legacy string encodings.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use parcelgrid_lib::Scenario;

/// Where the scenario for a subcommand comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct ScenarioSource {
    /// Path to a JSON scenario file.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["legacy_state", "legacy_traffic"])]
    pub scenario: Option<PathBuf>,

    /// Legacy initial state string: `m;n;P;S;cx,cy,...;x1,y1,x2,y2,...`.
    #[arg(long, value_name = "STATE", requires = "legacy_traffic")]
    pub legacy_state: Option<String>,

    /// Legacy traffic string: `x1,y1,x2,y2,level;...`.
    #[arg(long, value_name = "TRAFFIC", requires = "legacy_state")]
    pub legacy_traffic: Option<String>,
}

impl ScenarioSource {
    /// A source reading from a scenario file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            scenario: Some(path.into()),
            ..Self::default()
        }
    }

    /// Load and validate the scenario.
    pub fn load(&self) -> Result<Scenario> {
        let scenario = match (&self.scenario, &self.legacy_state, &self.legacy_traffic) {
            (Some(path), _, _) => Scenario::load(path)
                .with_context(|| format!("failed to load scenario from {}", path.display()))?,
            (None, Some(state), Some(traffic)) => Scenario::from_legacy(state, traffic)
                .context("failed to parse legacy scenario strings")?,
            _ => bail!("provide --scenario <FILE> or both --legacy-state and --legacy-traffic"),
        };
        scenario.validate().context("scenario failed validation")?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_an_error() {
        let err = ScenarioSource::default().load().unwrap_err();
        assert!(err.to_string().contains("--scenario"));
    }

    #[test]
    fn legacy_strings_load() {
        let source = ScenarioSource {
            scenario: None,
            legacy_state: Some("2;2;1;1;1,1;".to_string()),
            legacy_traffic: Some("0,0,0,1,1;0,1,1,1,1".to_string()),
        };
        let scenario = source.load().expect("legacy scenario loads");
        assert_eq!((scenario.rows, scenario.columns), (2, 2));
        assert_eq!(scenario.customers.len(), 1);
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = ScenarioSource::from_path("/nonexistent/scenario.json")
            .load()
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scenario.json"));
    }
}

//! Demo data configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Configuration values controlling the demo data seed run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEMO_DATA")]
pub struct DemoDataSettings {
    /// Dataset file to seed from. The built-in dataset is used when unset.
    pub dataset_path: Option<PathBuf>,
    /// Emit logs as JSON lines instead of plain text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl DemoDataSettings {
    /// Apply values given explicitly on the command line.
    ///
    /// Explicit values win over configured ones; `None` and `false` leave
    /// the configured value in place.
    #[must_use]
    pub fn with_overrides(mut self, dataset_path: Option<PathBuf>, json_logs: bool) -> Self {
        if dataset_path.is_some() {
            self.dataset_path = dataset_path;
        }
        self.json_logs |= json_logs;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for demo data configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> DemoDataSettings {
        DemoDataSettings::load_from_iter([OsString::from("linkboard-seed")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("DEMO_DATA_DATASET_PATH", None::<String>),
            ("DEMO_DATA_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.dataset_path.is_none());
        assert!(!settings.json_logs);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "DEMO_DATA_DATASET_PATH",
                Some("/tmp/linkboard-dataset.json".to_owned()),
            ),
            ("DEMO_DATA_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.dataset_path,
            Some(PathBuf::from("/tmp/linkboard-dataset.json"))
        );
        assert!(settings.json_logs);
    }

    #[rstest]
    #[case::keeps_configured(None, false, Some("configured.json"), true)]
    #[case::cli_path_wins(Some("cli.json"), false, Some("cli.json"), true)]
    fn command_line_overrides_configured_values(
        #[case] cli_path: Option<&str>,
        #[case] cli_json: bool,
        #[case] expected_path: Option<&str>,
        #[case] expected_json: bool,
    ) {
        let configured = DemoDataSettings {
            dataset_path: Some(PathBuf::from("configured.json")),
            json_logs: true,
        };
        let merged = configured.with_overrides(cli_path.map(PathBuf::from), cli_json);
        assert_eq!(merged.dataset_path, expected_path.map(PathBuf::from));
        assert_eq!(merged.json_logs, expected_json);
    }

    #[rstest]
    fn json_flag_enables_json_logs() {
        let configured = DemoDataSettings {
            dataset_path: None,
            json_logs: false,
        };
        let merged = configured.with_overrides(None, true);
        assert!(merged.json_logs);
    }
}

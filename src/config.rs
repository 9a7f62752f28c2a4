use std::path::PathBuf;

/// Where the dashboard reads its tables and writes its log file.
///
/// Values come from the environment (a `.env` file is honoured by the binary)
/// and fall back to the file names the fleet simulator produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub summary_path: PathBuf,
    pub daily_path: PathBuf,
    pub log_file_path: PathBuf,
}

impl DashboardConfig {
    pub const DEFAULT_SUMMARY_PATH: &'static str = "fleet_summary.csv";
    pub const DEFAULT_DAILY_PATH: &'static str = "fleet_daily_data.csv";
    pub const DEFAULT_LOG_FILE_PATH: &'static str = "logs/ev_fleet_health.log";

    /// Reads `FLEET_SUMMARY_PATH`, `FLEET_DAILY_PATH` and `LOG_FILE_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            PathBuf::from(
                lookup(key)
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| default.to_string()),
            )
        };

        Self {
            summary_path: get("FLEET_SUMMARY_PATH", Self::DEFAULT_SUMMARY_PATH),
            daily_path: get("FLEET_DAILY_PATH", Self::DEFAULT_DAILY_PATH),
            log_file_path: get("LOG_FILE_PATH", Self::DEFAULT_LOG_FILE_PATH),
        }
    }

    /// Replaces the table paths with any that were given explicitly.
    pub fn with_overrides(mut self, summary: Option<PathBuf>, daily: Option<PathBuf>) -> Self {
        if let Some(summary) = summary {
            self.summary_path = summary;
        }
        if let Some(daily) = daily {
            self.daily_path = daily;
        }
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

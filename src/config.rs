use std::path::PathBuf;

/// Environment variable overriding the work plan location.
pub const CSV_PATH_ENV: &str = "WORKPLAN_CSV";

const DEFAULT_CSV_PATH: &str = "assets/cronoprogramma.csv";

/// Startup settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub csv_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(path) = lookup(CSV_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            log::debug!("{CSV_PATH_ENV} set, reading work plan from {path}");
            config.csv_path = PathBuf::from(path);
        }
        config
    }
}

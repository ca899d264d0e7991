use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "review_flattener.toml";
pub const ENV_PREFIX: &str = "REVIEWS";

pub const DEFAULT_INPUT: &str = "data/yelp_reviews.json";
pub const DEFAULT_OUTPUT: &str = "data/parsed_reviews.csv";
pub const DEFAULT_INSPECT_INPUT: &str = "data/signature-india.csv";
pub const DEFAULT_DROP_COLUMNS: [&str; 2] = ["web-scraper-order", "web-scraper-start-url"];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub root: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub parquet_output: Option<PathBuf>,
    pub inspect_input: PathBuf,
    pub drop_columns: Vec<String>,
    pub preview_rows: usize,
    pub max_colwidth: usize,
    pub display_width: usize,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Defaults, then `review_flattener.toml` under `root`, then `REVIEWS_*`
    /// environment variables.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .set_default("root", root.to_string_lossy().into_owned())?
            .set_default("input", DEFAULT_INPUT)?
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("inspect_input", DEFAULT_INSPECT_INPUT)?
            .set_default("drop_columns", DEFAULT_DROP_COLUMNS.to_vec())?
            .set_default("preview_rows", 5_i64)?
            .set_default("max_colwidth", 80_i64)?
            .set_default("display_width", 120_i64)?
            .add_source(File::from(root.join(CONFIG_FILE)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("drop_columns"),
            )
            .build()?;
        cfg.try_deserialize()
    }

    /// Resolve a configured path against `root`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    pub fn parquet_path(&self) -> Option<PathBuf> {
        self.parquet_output.as_deref().map(|p| self.resolve(p))
    }

    pub fn inspect_path(&self) -> PathBuf {
        self.resolve(&self.inspect_input)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_dir.as_deref().map(|p| self.resolve(p))
    }
}

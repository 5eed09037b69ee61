use std::path::{Path, PathBuf};

use config::Config;
use serde::Deserialize;

use crate::error::SettingsError;
use crate::extract::selectors::SelectorMap;

const ENV_PREFIX: &str = "SHOP_PARSER";

/// Runtime settings: optional TOML file, then `SHOP_PARSER_*` env vars,
/// then CLI flags (applied by the caller).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub workbook: PathBuf,
    pub sheet: String,
    /// First data row (1-based); row 1 is the header.
    pub first_row: u32,
    /// Column holding product URLs (1-based, A = 1).
    pub url_column: u32,
    pub images_dir: PathBuf,
    pub download_images: bool,
    pub verify_tls: bool,
    pub timeout_secs: u64,
    pub columns: Columns,
    pub selectors: SelectorMap,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            workbook: PathBuf::from("for_parsing.xlsx"),
            sheet: "only_product".to_string(),
            first_row: 2,
            url_column: 1,
            images_dir: PathBuf::from("images"),
            download_images: true,
            verify_tls: true,
            timeout_secs: 30,
            columns: Columns::default(),
            selectors: SelectorMap::default(),
        }
    }
}

/// Output column layout (1-based). Characteristics fill columns from
/// `characteristics` rightwards, one pair per cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub price: u32,
    pub old_price: u32,
    pub description: u32,
    pub category_path: u32,
    pub ware_code: u32,
    pub image_url: u32,
    pub image_local_path: u32,
    pub characteristics: u32,
}

impl Default for Columns {
    fn default() -> Self {
        // I..O, then P onwards
        Columns {
            price: 9,
            old_price: 10,
            description: 11,
            category_path: 12,
            ware_code: 13,
            image_url: 14,
            image_local_path: 15,
            characteristics: 16,
        }
    }
}

impl Settings {
    pub fn load(config_file: &Path) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(config::File::from(config_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    /// Prefix written into `image_local_path`, always with forward slashes.
    /// Relative directories stay relative to the working directory; an
    /// absolute `images_dir` gives an absolute prefix.
    pub fn images_prefix(&self) -> String {
        self.images_dir
            .to_string_lossy()
            .replace('\\', "/")
            .trim_end_matches('/')
            .to_string()
    }
}

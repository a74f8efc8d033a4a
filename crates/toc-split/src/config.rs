//! Configuration loading for toc-split.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use toc_segmenter::Segmenter;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub segmentation: Option<SegmentationConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SegmentationConfig {
    pub merge_threshold: Option<usize>,
    pub intro_title: Option<String>,
    pub fallback_title: Option<String>,
    pub title_separator: Option<String>,
    pub require_literal_match: Option<bool>,
}

impl Config {
    /// Build a segmenter from the configured values, library defaults otherwise.
    pub fn segmenter(&self) -> Segmenter {
        let mut builder = Segmenter::builder();
        let Some(segmentation) = self.segmentation.as_ref() else {
            return builder.build();
        };

        if let Some(threshold) = segmentation.merge_threshold {
            builder = builder.merge_threshold(threshold);
        }
        if let Some(title) = &segmentation.intro_title {
            builder = builder.intro_title(title.as_str());
        }
        if let Some(title) = &segmentation.fallback_title {
            builder = builder.fallback_title(title.as_str());
        }
        if let Some(separator) = &segmentation.title_separator {
            builder = builder.title_separator(separator.as_str());
        }
        if let Some(require) = segmentation.require_literal_match {
            builder = builder.require_literal_match(require);
        }
        builder.build()
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        merge_threshold: Option<usize>,
        normalized_positions: bool,
    ) -> Self {
        if merge_threshold.is_none() && !normalized_positions {
            return self;
        }
        let segmentation = self.segmentation.get_or_insert_with(Default::default);
        if let Some(threshold) = merge_threshold {
            segmentation.merge_threshold = Some(threshold);
        }
        if normalized_positions {
            segmentation.require_literal_match = Some(false);
        }
        self
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "toc-split")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}

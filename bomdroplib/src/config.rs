//! Site configuration.
//!
//! Everything that used to be a module-level constant (the reference total,
//! the base URL, feed metadata) lives in [`SiteConfig`]. It is read once,
//! validated, and handed to [`crate::Site`] together with the dataset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BomdropError;
use crate::quantity::ReferenceTotal;
use crate::Result;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "bomdrop.toml";

/// Site-wide settings.
///
/// Every key is optional in the TOML file; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Canonical origin, without a trailing slash
    pub base_url: String,
    /// Site name shown on preview cards
    pub site_name: String,
    /// The amount every unit cost is divided into
    pub reference_total: f64,
    /// What the reference total was spent on
    pub spend_label: String,
    /// Who "could buy" things in share text
    pub buyer: String,
    pub feed_title: String,
    pub feed_description: String,
    pub feed_version: String,
    pub license: String,
    /// How many records the home page features
    pub featured_count: usize,
    /// How many related items a comparison page lists
    pub related_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bomdrop.com.au".to_string(),
            site_name: "BoMdrop.com.au".to_string(),
            reference_total: 96_500_000.0,
            spend_label: "BOM.gov.au".to_string(),
            buyer: "Australia".to_string(),
            feed_title: "BoMdrop.com.au - Complete Data Feed".to_string(),
            feed_description: "Machine-readable data feed of all cost comparisons for the $96.5M BOM.gov.au redesign".to_string(),
            feed_version: "1.0".to_string(),
            license: "Creative Commons Attribution 4.0 International (CC BY 4.0)".to_string(),
            featured_count: 9,
            related_limit: 3,
        }
    }
}

impl SiteConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BomdropError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    /// Load `bomdrop.toml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut config: Self = toml::from_str(text).map_err(|e| BomdropError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.base_url = normalize_base_url(&config.base_url);
        config.validate()?;
        Ok(config)
    }

    /// Override the base URL.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = normalize_base_url(url);
        self
    }

    /// Override the reference total.
    pub fn reference_total(mut self, total: f64) -> Self {
        self.reference_total = total;
        self
    }

    /// Check values that the type system does not.
    pub fn validate(&self) -> Result<ReferenceTotal> {
        ReferenceTotal::new(self.reference_total)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.reference_total, 96_500_000.0);
        assert_eq!(config.base_url, "https://bomdrop.com.au");
        assert_eq!(config.featured_count, 9);
        assert_eq!(config.related_limit, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
            base_url = "https://staging.example.org/"
            reference_total = 1000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://staging.example.org");
        assert_eq!(config.reference_total, 1000.0);
        assert_eq!(config.site_name, "BoMdrop.com.au");
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = SiteConfig::from_toml_str("refrence_total = 5.0").unwrap_err();
        assert!(matches!(err, BomdropError::Config { .. }));
    }

    #[test]
    fn test_rejects_negative_total() {
        let err = SiteConfig::from_toml_str("reference_total = -5.0").unwrap_err();
        assert!(matches!(err, BomdropError::InvalidReferenceTotal { .. }));
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SiteConfig::discover(dir.path()).unwrap(), SiteConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "buyer = \"Tasmania\"\n").unwrap();
        let config = SiteConfig::discover(dir.path()).unwrap();
        assert_eq!(config.buyer, "Tasmania");
    }

    #[test]
    fn test_builder_overrides() {
        let config = SiteConfig::new().base_url("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");
    }
}

//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxError};

/// Main configuration for voxinv.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxConfig {
    /// Line-item synthesis configuration.
    pub extraction: ExtractionConfig,

    /// Invoice draft configuration.
    pub draft: DraftConfig,
}

/// Line-item synthesis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Unit price for services mentioned without an amount.
    pub default_unit_price: Decimal,

    /// Maximum items synthesized when only one side (services or amounts) is present.
    pub max_synthesized_items: usize,

    /// Description for amounts mentioned without a service (English).
    pub generic_description_en: String,

    /// Description for amounts mentioned without a service (Hindi).
    pub generic_description_hi: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_unit_price: Decimal::new(5000, 1),
            max_synthesized_items: 3,
            generic_description_en: "Professional Services".to_string(),
            generic_description_hi: "व्यावसायिक सेवा".to_string(),
        }
    }
}

/// Invoice draft configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Description of the item used when nothing could be synthesized.
    pub placeholder_description: String,

    /// Unit price of the placeholder item.
    pub placeholder_unit_price: Decimal,

    /// Tax rate as a fraction (0.10 = 10%).
    pub default_tax_rate: Decimal,

    /// Currency code.
    pub currency: String,

    /// Days between issue and due date.
    pub due_in_days: u32,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            placeholder_description: "Service based on voice input".to_string(),
            placeholder_unit_price: Decimal::new(5000, 1),
            default_tax_rate: Decimal::new(10, 2),
            currency: "USD".to_string(),
            due_in_days: 30,
        }
    }
}

impl VoxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn check(&self) -> Result<()> {
        if self.extraction.default_unit_price <= Decimal::ZERO {
            return Err(VoxError::Config(
                "extraction.default_unit_price must be positive".to_string(),
            ));
        }
        if self.draft.placeholder_unit_price <= Decimal::ZERO {
            return Err(VoxError::Config(
                "draft.placeholder_unit_price must be positive".to_string(),
            ));
        }
        if self.draft.default_tax_rate < Decimal::ZERO {
            return Err(VoxError::Config(
                "draft.default_tax_rate must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = VoxConfig::default();
        assert_eq!(config.extraction.default_unit_price, Decimal::new(500, 0));
        assert_eq!(config.extraction.max_synthesized_items, 3);
        assert_eq!(config.draft.default_tax_rate, Decimal::new(1, 1));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = VoxConfig::default();
        config.draft.currency = "INR".to_string();
        config.save(&path).unwrap();

        let loaded = VoxConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"draft": {"due_in_days": 14}}"#).unwrap();

        let loaded = VoxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.draft.due_in_days, 14);
        assert_eq!(loaded.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"default_unit_price": "0"}}"#).unwrap();

        assert!(matches!(
            VoxConfig::from_file(&path),
            Err(VoxError::Config(_))
        ));
    }
}

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Minimum description similarity for a fuzzy pair, in `0..=1`.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_match_threshold: f64,
    /// Fuzzy pairs scoring below this are flagged `unidentified`.
    #[serde(default = "default_identity_trust")]
    pub identity_trust_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: default_fuzzy_threshold(),
            identity_trust_threshold: default_identity_trust(),
        }
    }
}

fn default_fuzzy_threshold() -> f64 {
    0.85
}

fn default_identity_trust() -> f64 {
    0.95
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    /// Absolute quantity tolerance; a difference exactly equal still matches.
    #[serde(default)]
    pub quantity: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self { quantity: 0.0 }
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// CSV export shape. Column order and header names are configuration, not
/// hard-coded: this is the compatibility surface with downstream spreadsheet
/// consumers.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub summary: SummaryPlacement,
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnSpec>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            summary: SummaryPlacement::default(),
            columns: default_columns(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPlacement {
    /// Summary block appended after a blank row in the same file.
    Trailing,
    /// Summary written to a sibling `<stem>-summary.csv` file.
    SeparateFile,
    /// No summary emitted.
    Omit,
}

impl Default for SummaryPlacement {
    fn default() -> Self {
        Self::Trailing
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub field: ExportField,
    /// Header override; the field's canonical header is used otherwise.
    #[serde(default)]
    pub header: Option<String>,
}

impl ColumnSpec {
    pub fn header(&self) -> &str {
        self.header
            .as_deref()
            .unwrap_or_else(|| self.field.default_header())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportField {
    Identifier,
    Description,
    Unit,
    ExpectedQty,
    ActualQty,
    Delta,
    Category,
    Confidence,
    Similarity,
}

impl ExportField {
    pub fn default_header(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Description => "description",
            Self::Unit => "unit",
            Self::ExpectedQty => "expected_qty",
            Self::ActualQty => "actual_qty",
            Self::Delta => "delta",
            Self::Category => "category",
            Self::Confidence => "confidence",
            Self::Similarity => "similarity",
        }
    }
}

fn default_columns() -> Vec<ColumnSpec> {
    [
        ExportField::Identifier,
        ExportField::Description,
        ExportField::ExpectedQty,
        ExportField::ActualQty,
        ExportField::Delta,
        ExportField::Category,
        ExportField::Confidence,
    ]
    .into_iter()
    .map(|field| ColumnSpec { field, header: None })
    .collect()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast before any matching occurs.
    pub fn validate(&self) -> Result<(), ReconError> {
        check_ratio(
            "matching.fuzzy_match_threshold",
            self.matching.fuzzy_match_threshold,
        )?;
        check_ratio(
            "matching.identity_trust_threshold",
            self.matching.identity_trust_threshold,
        )?;

        let tolerance = self.tolerance.quantity;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "tolerance.quantity must be a finite value >= 0, got {tolerance}"
            )));
        }

        if self.export.columns.is_empty() {
            return Err(ReconError::ConfigValidation(
                "export.columns must not be empty".into(),
            ));
        }

        Ok(())
    }
}

fn check_ratio(name: &str, value: f64) -> Result<(), ReconError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ReconError::ConfigValidation(format!(
            "{name} must be between 0 and 1, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ReconConfig::default();
        assert_eq!(config.matching.fuzzy_match_threshold, 0.85);
        assert_eq!(config.matching.identity_trust_threshold, 0.95);
        assert_eq!(config.tolerance.quantity, 0.0);
        assert_eq!(config.export.summary, SummaryPlacement::Trailing);
        assert_eq!(config.export.columns.len(), 7);
        assert_eq!(config.export.columns[0].field, ExportField::Identifier);
        config.validate().unwrap();
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ReconConfig::from_toml("").unwrap();
        assert_eq!(config.matching.fuzzy_match_threshold, 0.85);
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
[matching]
fuzzy_match_threshold = 0.8
identity_trust_threshold = 0.9

[tolerance]
quantity = 0.5

[export]
summary = "separate_file"

[[export.columns]]
field = "identifier"
header = "SKU"

[[export.columns]]
field = "delta"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.matching.fuzzy_match_threshold, 0.8);
        assert_eq!(config.tolerance.quantity, 0.5);
        assert_eq!(config.export.summary, SummaryPlacement::SeparateFile);
        assert_eq!(config.export.columns.len(), 2);
        assert_eq!(config.export.columns[0].header(), "SKU");
        assert_eq!(config.export.columns[1].header(), "delta");
    }

    #[test]
    fn reject_threshold_out_of_range() {
        let err = ReconConfig::from_toml("[matching]\nfuzzy_match_threshold = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("fuzzy_match_threshold"));
    }

    #[test]
    fn reject_negative_tolerance() {
        let err = ReconConfig::from_toml("[tolerance]\nquantity = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("tolerance.quantity"));
    }

    #[test]
    fn reject_empty_column_list() {
        let err = ReconConfig::from_toml("[export]\ncolumns = []\n").unwrap_err();
        assert!(err.to_string().contains("export.columns"));
    }

    #[test]
    fn reject_unknown_field_name() {
        let input = "[[export.columns]]\nfield = \"sku_code\"\n";
        assert!(ReconConfig::from_toml(input).is_err());
    }
}

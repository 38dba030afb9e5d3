//! Analysis configuration: which columns to read and how to label the table.

use std::{collections::HashSet, path::Path};

use crosstab_stats::{independence::DEFAULT_ALPHA, record::Category};
use serde::{Deserialize, Serialize};

use crate::util;

pub const DEFAULT_AGE_COLUMN: &str = "Grupo de edad";
pub const DEFAULT_GENRE_COLUMN: &str = "Género favorito";
pub const DEFAULT_AGE_GROUPS: [&str; 3] = ["Adultos", "Adultos mayores", "Jóvenes"];
pub const DEFAULT_GENRES: [&str; 3] = ["Terror", "Comedia", "Drama"];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("column name for {field} must not be empty")]
    EmptyColumnName { field: &'static str },
    #[display("at least one age group is required")]
    NoAgeGroups,
    #[display("at least one genre category is required")]
    NoCategories,
    #[display("age group {label:?} is listed more than once")]
    DuplicateAgeGroup { label: String },
    #[display("genre category {name:?} is listed more than once")]
    DuplicateCategory { name: String },
    #[display("significance level must be between 0 and 1 (exclusive), got {alpha}")]
    InvalidAlpha { alpha: f64 },
}

/// Column names, row labels, genre categories and significance level of one analysis.
///
/// Every field has a default, so a configuration file only needs the fields
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Header of the age-group column (compared after trimming header whitespace).
    pub age_column: String,
    /// Header of the favorite-genre column.
    pub genre_column: String,
    /// Table rows, in display order.
    pub age_groups: Vec<String>,
    /// Table columns, in display order.
    pub categories: Vec<Category>,
    /// Significance level for the decision.
    pub alpha: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            age_column: DEFAULT_AGE_COLUMN.to_owned(),
            genre_column: DEFAULT_GENRE_COLUMN.to_owned(),
            age_groups: DEFAULT_AGE_GROUPS.map(str::to_owned).to_vec(),
            categories: DEFAULT_GENRES.map(Category::singleton).to_vec(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl AnalysisConfig {
    /// Loads and validates a configuration file.
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config: Self = util::read_json_file("configuration", path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.age_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "age_column",
            });
        }
        if self.genre_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "genre_column",
            });
        }
        if self.age_groups.is_empty() {
            return Err(ConfigError::NoAgeGroups);
        }
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        let mut seen = HashSet::new();
        if let Some(label) = self.age_groups.iter().find(|l| !seen.insert(l.as_str())) {
            return Err(ConfigError::DuplicateAgeGroup {
                label: label.clone(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(category) = self.categories.iter().find(|c| !seen.insert(c.name.as_str())) {
            return Err(ConfigError::DuplicateCategory {
                name: category.name.clone(),
            });
        }

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha { alpha: self.alpha });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalysisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.age_groups, ["Adultos", "Adultos mayores", "Jóvenes"]);
        assert_eq!(config.categories[0], Category::singleton("Terror"));
        assert_eq!(config.alpha, 0.05);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "alpha": 0.01, "categories": [{"name": "Miedo", "members": ["Terror", "Horror"]}] }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.age_column, DEFAULT_AGE_COLUMN);
        assert_eq!(config.categories.len(), 1);
        assert!(config.categories[0].contains("Horror"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let json = r#"{ "alpah": 0.01 }"#;
        assert!(serde_json::from_str::<AnalysisConfig>(json).is_err());
    }

    #[test]
    fn test_validation_errors() {
        let config = AnalysisConfig {
            age_groups: vec!["Adultos".to_owned(), "Adultos".to_owned()],
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateAgeGroup { label }) if label == "Adultos"
        ));

        let config = AnalysisConfig {
            categories: vec![Category::singleton("Drama"), Category::singleton("Drama")],
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateCategory { .. })
        ));

        let config = AnalysisConfig {
            categories: vec![],
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoCategories)));

        let config = AnalysisConfig {
            genre_column: "  ".to_owned(),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyColumnName {
                field: "genre_column"
            })
        ));

        for alpha in [0.0, 1.0, -0.5, f64::NAN] {
            let config = AnalysisConfig {
                alpha,
                ..AnalysisConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidAlpha { .. })),
                "alpha {alpha} should be rejected"
            );
        }
    }
}

use serde::{Deserialize, Serialize};

/// A single observation with two categorical fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Age group label, compared verbatim against the table rows.
    pub age_group: String,
    /// Free-form favorite genre, mapped into columns through [`Category`] membership.
    pub genre: String,
}

impl Record {
    #[must_use]
    pub fn new(age_group: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            age_group: age_group.into(),
            genre: genre.into(),
        }
    }
}

/// A named genre column together with the raw labels that belong to it.
///
/// A raw label may be a member of several categories, in which case a record
/// carrying it is counted once in each of them. Labels that belong to no
/// category are not counted anywhere.
///
/// # Examples
///
/// ```
/// use crosstab_stats::record::Category;
///
/// let scary = Category::new("Miedo", ["Terror", "Suspenso"]);
/// assert!(scary.contains("Suspenso"));
/// assert!(!scary.contains("terror"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Column label used in every table.
    pub name: String,
    /// Raw genre labels counted under this column. Matching is exact.
    pub members: Vec<String>,
}

impl Category {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a category whose only member is its own name.
    #[must_use]
    pub fn singleton(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            members: vec![name.clone()],
            name,
        }
    }

    #[must_use]
    pub fn contains(&self, genre: &str) -> bool {
        self.members.iter().any(|m| m == genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_contains_own_name() {
        let category = Category::singleton("Drama");
        assert_eq!(category.name, "Drama");
        assert!(category.contains("Drama"));
        assert!(!category.contains("Comedia"));
    }

    #[test]
    fn test_membership_is_exact() {
        let category = Category::new("Comedia", ["Comedia", "Comedia romántica"]);
        assert!(category.contains("Comedia romántica"));
        assert!(!category.contains("comedia"));
        assert!(!category.contains(" Comedia"));
    }

    #[test]
    fn test_category_json_shape() {
        let json = r#"{"name":"Terror","members":["Terror","Horror"]}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category, Category::new("Terror", ["Terror", "Horror"]));
    }
}

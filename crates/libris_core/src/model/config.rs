//! School taxonomy configuration.
//!
//! # Responsibility
//! - Hold the ordered class and parallel label lists.
//! - Provide the defaults used when no config file exists.
//!
//! # Invariants
//! - Config is the sole source of truth for labels offered by editing
//!   workflows; stored students may still carry labels outside these lists.

use serde::{Deserialize, Serialize};

/// Ordered class/parallel label lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub classes: Vec<String>,
    pub parallels: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            classes: (1..=11).map(|grade| grade.to_string()).collect(),
            parallels: ["А", "Б", "В", "Г", "Д", "Л", "М"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl LibraryConfig {
    /// Label with the greatest integer value among `classes`.
    ///
    /// Labels that do not parse as integers are ignored; `None` when no
    /// label is numeric, in which case promotion has no terminal class.
    pub fn max_numeric_class(&self) -> Option<&str> {
        self.classes
            .iter()
            .filter_map(|label| label.parse::<u64>().ok().map(|value| (value, label)))
            .max_by_key(|(value, _)| *value)
            .map(|(_, label)| label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::LibraryConfig;

    #[test]
    fn defaults_cover_eleven_grades_and_seven_parallels() {
        let config = LibraryConfig::default();
        assert_eq!(config.classes.len(), 11);
        assert_eq!(config.classes.first().map(String::as_str), Some("1"));
        assert_eq!(config.classes.last().map(String::as_str), Some("11"));
        assert_eq!(config.parallels.len(), 7);
    }

    #[test]
    fn max_numeric_class_orders_by_value_not_lexicographically() {
        let config = LibraryConfig::default();
        assert_eq!(config.max_numeric_class(), Some("11"));
    }

    #[test]
    fn max_numeric_class_skips_non_numeric_labels() {
        let config = LibraryConfig {
            classes: vec!["prep".to_string(), "9".to_string(), "10".to_string()],
            parallels: vec!["А".to_string()],
        };
        assert_eq!(config.max_numeric_class(), Some("10"));

        let all_text = LibraryConfig {
            classes: vec!["junior".to_string(), "senior".to_string()],
            parallels: vec!["А".to_string()],
        };
        assert_eq!(all_text.max_numeric_class(), None);
    }
}

//! Enumeration types for the view configuration.

use serde::{Deserialize, Serialize};

/// Which normalized field the free-text query matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Resolved title.
    #[default]
    Title,
    /// Resolved author credit string.
    Authors,
    /// Resolved journal display string.
    Journal,
}

/// Sort key for the record list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Lexicographic by resolved title.
    Title,
    /// Numeric by publication year, absent treated as 0.
    #[default]
    Year,
    /// Numeric by resolved impact factor, absent treated as 0.
    ImpactFactor,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_start() {
        assert_eq!(SearchField::default(), SearchField::Title);
        assert_eq!(SortKey::default(), SortKey::Year);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }

    #[test]
    fn test_sort_key_wire_names() {
        assert_eq!(serde_json::to_string(&SortKey::ImpactFactor).unwrap(), "\"impact_factor\"");
        assert_eq!(serde_json::to_string(&SearchField::Journal).unwrap(), "\"journal\"");
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }
}

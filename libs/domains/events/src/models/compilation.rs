use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{EventShort, not_blank};

/// Stored compilation: a titled set of events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub id: i64,
    pub title: String,
    pub pinned: bool,
    /// Sorted, no duplicates
    pub event_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewCompilation {
    #[serde(default)]
    pub events: Vec<i64>,
    #[serde(default)]
    pub pinned: bool,
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompilation {
    /// Replaces the whole set when present
    #[serde(default)]
    pub events: Option<Vec<i64>>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default)]
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompilationDto {
    pub id: i64,
    pub events: Vec<EventShort>,
    pub pinned: bool,
    pub title: String,
}

/// `GET /compilations?pinned=true`
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompilationQuery {
    #[serde(default)]
    pub pinned: Option<bool>,
}

/// Sorted and deduplicated copy of `ids`.
pub(crate) fn normalize_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_compilation_defaults() {
        let input: NewCompilation = serde_json::from_str(r#"{"title":"Summer"}"#).unwrap();
        assert!(!input.pinned);
        assert!(input.events.is_empty());
        assert!(input.validate().is_ok());

        let too_long = NewCompilation {
            title: "x".repeat(51),
            ..input
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_normalize_ids() {
        assert_eq!(normalize_ids(&[3, 1, 3, 2]), vec![1, 2, 3]);
    }
}

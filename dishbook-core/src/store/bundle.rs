//! Export/import bundles.
//!
//! A bundle is a single JSON object holding any subset of the four collections plus
//! export metadata:
//!
//! ```json
//! {"dishes": [...], "categories": [...], "orders": [...], "favorites": [...],
//!  "exportTime": "2024-02-10T12:00:00.000Z", "version": "1.0"}
//! ```

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::StoreError;
use crate::models::{dedup_in_order, Dish, Order};

/// Format version written into every export.
pub const BUNDLE_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dishes: Option<Vec<Dish>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Bundle {
    /// Builds a complete bundle stamped with the current time and format version.
    pub fn snapshot(
        dishes: Vec<Dish>,
        categories: Vec<String>,
        orders: Vec<Order>,
        favorites: Vec<String>,
    ) -> Self {
        Self {
            dishes: Some(dishes),
            categories: Some(categories),
            orders: Some(orders),
            favorites: Some(favorites),
            export_time: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            version: Some(BUNDLE_VERSION.to_string()),
        }
    }

    /// Parses and validates an import document.
    ///
    /// The text must be a JSON object; each collection field, when present and not null,
    /// must be an array of well-formed records.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| StoreError::InvalidBundle(format!("not valid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(StoreError::InvalidBundle(
                "expected a JSON object at the top level".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| StoreError::InvalidBundle(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// True when none of the four collections is present.
    pub fn is_empty(&self) -> bool {
        self.dishes.is_none()
            && self.categories.is_none()
            && self.orders.is_none()
            && self.favorites.is_none()
    }

    /// Suggested download name for an export made on `date`.
    pub fn file_name(date: NaiveDate) -> String {
        format!("dishbook-backup-{}.json", date.format("%Y-%m-%d"))
    }
}

/// How an imported bundle combines with what is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Keep existing records; add only records with unseen ids, union the sets.
    #[default]
    Merge,
    /// Overwrite every collection present in the bundle.
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Merge => write!(f, "merge"),
            ImportMode::Replace => write!(f, "replace"),
        }
    }
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merge" => Ok(ImportMode::Merge),
            "replace" => Ok(ImportMode::Replace),
            _ => Err(format!(
                "Invalid import mode '{}'. Valid modes: merge, replace",
                s
            )),
        }
    }
}

/// Records taken from a bundle during one import, per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub dishes: usize,
    pub categories: usize,
    pub orders: usize,
    pub favorites: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.dishes + self.categories + self.orders + self.favorites
    }
}

/// Appends incoming records whose id is not already present. Existing records win.
pub(crate) fn merge_by_id<T>(
    mut existing: Vec<T>,
    incoming: Vec<T>,
    id: impl Fn(&T) -> &str,
) -> (Vec<T>, usize) {
    let mut seen: std::collections::HashSet<String> =
        existing.iter().map(|r| id(r).to_string()).collect();
    let before = existing.len();

    for record in incoming {
        if seen.insert(id(&record).to_string()) {
            existing.push(record);
        }
    }

    let added = existing.len() - before;
    (existing, added)
}

/// De-duplicated union, existing values first.
pub(crate) fn union(existing: Vec<String>, incoming: Vec<String>) -> (Vec<String>, usize) {
    let before = dedup_in_order(existing.clone()).len();
    let merged = dedup_in_order(existing.into_iter().chain(incoming).collect());
    let added = merged.len() - before;
    (merged, added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderedDish;

    #[test]
    fn test_from_json_partial_bundle() {
        let bundle = Bundle::from_json(r#"{"categories": ["Soups"], "favorites": ["1"]}"#).unwrap();

        assert!(bundle.dishes.is_none());
        assert!(bundle.orders.is_none());
        assert_eq!(bundle.categories, Some(vec!["Soups".to_string()]));
        assert_eq!(bundle.favorites, Some(vec!["1".to_string()]));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        for text in ["null", "[]", "42", r#""dishes""#, "not json"] {
            let err = Bundle::from_json(text).unwrap_err();
            assert!(matches!(err, StoreError::InvalidBundle(_)), "{}", text);
        }
    }

    #[test]
    fn test_from_json_rejects_wrong_collection_shape() {
        let err = Bundle::from_json(r#"{"dishes": "Fried Rice"}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidBundle(_)));

        let err = Bundle::from_json(r#"{"categories": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidBundle(_)));
    }

    #[test]
    fn test_from_json_null_collection_is_absent() {
        let bundle = Bundle::from_json(r#"{"dishes": null, "categories": []}"#).unwrap();
        assert!(bundle.dishes.is_none());
        assert_eq!(bundle.categories, Some(vec![]));
    }

    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let bundle = Bundle::from_json(r#"{"theme": "dark", "favorites": []}"#).unwrap();
        assert_eq!(bundle.favorites, Some(vec![]));
    }

    #[test]
    fn test_snapshot_metadata() {
        let bundle = Bundle::snapshot(vec![], vec![], vec![], vec![]);
        let json: serde_json::Value =
            serde_json::from_str(&bundle.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["version"], "1.0");
        assert!(json["exportTime"].as_str().unwrap().ends_with('Z'));
        assert!(json["dishes"].is_array());
        assert!(!bundle.is_empty());
    }

    #[test]
    fn test_file_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert_eq!(Bundle::file_name(date), "dishbook-backup-2024-02-14.json");
    }

    #[test]
    fn test_import_mode_from_str() {
        assert_eq!("merge".parse::<ImportMode>().unwrap(), ImportMode::Merge);
        assert_eq!("REPLACE".parse::<ImportMode>().unwrap(), ImportMode::Replace);
        assert!("overwrite".parse::<ImportMode>().is_err());
    }

    #[test]
    fn test_merge_by_id_keeps_existing() {
        let existing = vec![OrderedDish::new("1", "A"), OrderedDish::new("2", "B")];
        let incoming = vec![
            OrderedDish::new("2", "B prime"),
            OrderedDish::new("3", "C"),
            OrderedDish::new("3", "C again"),
        ];

        let (merged, added) = merge_by_id(existing, incoming, |d| d.id.as_str());

        assert_eq!(added, 1);
        assert_eq!(
            merged,
            vec![
                OrderedDish::new("1", "A"),
                OrderedDish::new("2", "B"),
                OrderedDish::new("3", "C"),
            ]
        );
    }

    #[test]
    fn test_union_deduplicates() {
        let (merged, added) = union(
            vec!["x".into(), "y".into()],
            vec!["y".into(), "z".into(), "z".into()],
        );
        assert_eq!(merged, vec!["x", "y", "z"]);
        assert_eq!(added, 1);
    }
}

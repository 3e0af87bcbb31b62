//! The user's view choices.
//!
//! A [`ViewState`] is what gets persisted between sessions: per-field
//! filters, the global search text, the multi-key sort, the group-by field,
//! column visibility and the row density. All mutations keep the
//! invariants below:
//!
//! - at most one sort key per field
//! - `Title` is always effectively visible

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;
use crate::field::Field;
use crate::names;
use crate::schema::Schema;

/// Sort direction of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ModelError::UnknownSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the sort sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    #[serde(rename = "dir")]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Parses `FIELD` or `FIELD:asc|desc`.
impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((field, direction)) = s.rsplit_once(':')
            && let Ok(direction) = direction.parse::<SortDirection>()
        {
            let field = field.trim();
            if field.is_empty() {
                return Err(ModelError::InvalidSortKey(s.to_string()));
            }
            return Ok(Self::new(field, direction));
        }
        let field = s.trim();
        if field.is_empty() {
            return Err(ModelError::InvalidSortKey(s.to_string()));
        }
        Ok(Self::ascending(field))
    }
}

/// Row density of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Compact,
    #[serde(alias = "cozy")]
    Comfortable,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Comfortable => "comfortable",
        }
    }
}

impl FromStr for Density {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "comfortable" | "cozy" => Ok(Self::Comfortable),
            _ => Err(ModelError::UnknownDensity(s.to_string())),
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `FIELD=PATTERN` filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: String,
    pub pattern: String,
}

impl FromStr for FilterSpec {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((field, pattern)) = s.split_once('=') else {
            return Err(ModelError::InvalidFilter(s.to_string()));
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(ModelError::InvalidFilter(s.to_string()));
        }
        Ok(Self {
            field: field.to_string(),
            pattern: pattern.to_string(),
        })
    }
}

/// Persisted view choices.
///
/// Deserialization fills every missing key from [`ViewState::default`], so a
/// stored blob only overrides what it actually contains. The legacy key
/// names `visibleCols` and `globalQ` are still accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    #[serde(alias = "visibleCols")]
    pub visible_columns: BTreeMap<String, bool>,
    pub sort: Vec<SortKey>,
    pub filters: BTreeMap<String, String>,
    #[serde(alias = "globalQ")]
    pub global_query: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub group_by: Option<String>,
    pub density: Density,
}

impl ViewState {
    /// Restore the invariants after loading from storage.
    pub fn sanitize(&mut self) {
        let sort = std::mem::take(&mut self.sort);
        self.set_sort(sort);
        self.filters.retain(|_, pattern| !pattern.is_empty());
        self.visible_columns.remove(names::TITLE);
    }

    /// Filters whose trimmed pattern is non-empty.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, pattern)| !pattern.trim().is_empty())
            .map(|(field, pattern)| (field.as_str(), pattern.as_str()))
    }

    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters.get(field).map(String::as_str)
    }

    /// Set a per-field filter; an empty pattern removes it.
    pub fn set_filter(&mut self, field: impl Into<String>, pattern: impl Into<String>) {
        let field = field.into();
        let pattern = pattern.into();
        if pattern.is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, pattern);
        }
    }

    pub fn set_global_query(&mut self, query: impl Into<String>) {
        self.global_query = query.into();
    }

    /// Trimmed, lowercased global query, `None` when inactive.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.global_query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    /// Drop every per-field filter and the global query.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.global_query.clear();
    }

    /// Replace the sort sequence, keeping the first key per field.
    pub fn set_sort(&mut self, keys: impl IntoIterator<Item = SortKey>) {
        self.sort.clear();
        for key in keys {
            if !self.sort.iter().any(|existing| existing.field == key.field) {
                self.sort.push(key);
            }
        }
    }

    /// Cycle a field's sort: ascending, descending, removed.
    ///
    /// Without `additive` the field becomes the only sort key; with it the
    /// key is appended or cycled in place inside a multi-key sort.
    pub fn toggle_sort(&mut self, field: &str, additive: bool) {
        let position = self.sort.iter().position(|key| key.field == field);
        let next = match position.map(|index| self.sort[index].direction) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };
        if !additive {
            self.sort = next
                .map(|direction| vec![SortKey::new(field, direction)])
                .unwrap_or_default();
            return;
        }
        match (position, next) {
            (None, Some(direction)) => self.sort.push(SortKey::new(field, direction)),
            (Some(index), Some(direction)) => self.sort[index].direction = direction,
            (Some(index), None) => {
                self.sort.remove(index);
            }
            (None, None) => {}
        }
    }

    pub fn set_group_by(&mut self, field: Option<String>) {
        self.group_by = field.filter(|name| !name.trim().is_empty());
    }

    /// Show or hide a column. Hiding `Title` is refused and returns false.
    pub fn set_column_visible(&mut self, field: impl Into<String>, visible: bool) -> bool {
        let field = field.into();
        if field == names::TITLE {
            return visible;
        }
        self.visible_columns.insert(field, visible);
        true
    }

    /// Effective visibility of a schema field.
    pub fn is_column_visible(&self, field: &Field) -> bool {
        field.is_title()
            || self
                .visible_columns
                .get(&field.name)
                .copied()
                .unwrap_or(field.visible_by_default)
    }

    /// Listed schema fields that are currently visible, in schema order.
    pub fn visible_fields<'a>(&self, schema: &'a Schema) -> Vec<&'a Field> {
        schema
            .listed_fields()
            .filter(|field| self.is_column_visible(field))
            .collect()
    }

    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|name| !name.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn field(name: &str, visible_by_default: bool) -> Field {
        Field {
            name: name.to_string(),
            kind: FieldKind::String,
            frequency: 1,
            visible_by_default,
            hidden_everywhere: false,
        }
    }

    #[test]
    fn toggle_sort_cycles_single_key() {
        let mut view = ViewState::default();
        view.toggle_sort("Year", false);
        assert_eq!(view.sort, vec![SortKey::ascending("Year")]);
        view.toggle_sort("Year", false);
        assert_eq!(view.sort, vec![SortKey::descending("Year")]);
        view.toggle_sort("Year", false);
        assert!(view.sort.is_empty());
    }

    #[test]
    fn toggle_sort_replaces_without_additive() {
        let mut view = ViewState::default();
        view.toggle_sort("Year", false);
        view.toggle_sort("Title", false);
        assert_eq!(view.sort, vec![SortKey::ascending("Title")]);
    }

    #[test]
    fn additive_toggle_keeps_other_keys() {
        let mut view = ViewState::default();
        view.toggle_sort("Year", true);
        view.toggle_sort("Title", true);
        view.toggle_sort("Year", true);
        assert_eq!(
            view.sort,
            vec![SortKey::descending("Year"), SortKey::ascending("Title")]
        );
        view.toggle_sort("Year", true);
        assert_eq!(view.sort, vec![SortKey::ascending("Title")]);
    }

    #[test]
    fn set_sort_keeps_one_key_per_field() {
        let mut view = ViewState::default();
        view.set_sort([
            SortKey::ascending("Year"),
            SortKey::descending("Year"),
            SortKey::ascending("DOI"),
        ]);
        assert_eq!(
            view.sort,
            vec![SortKey::ascending("Year"), SortKey::ascending("DOI")]
        );
    }

    #[test]
    fn title_cannot_be_hidden() {
        let mut view = ViewState::default();
        assert!(!view.set_column_visible("Title", false));
        assert!(view.visible_columns.is_empty());
        view.visible_columns.insert("Title".into(), false);
        assert!(view.is_column_visible(&field("Title", false)));
    }

    #[test]
    fn visibility_falls_back_to_field_default() {
        let mut view = ViewState::default();
        assert!(view.is_column_visible(&field("DOI", true)));
        assert!(!view.is_column_visible(&field("PMID", false)));
        view.set_column_visible("PMID", true);
        assert!(view.is_column_visible(&field("PMID", false)));
    }

    #[test]
    fn stored_blob_merges_over_defaults() {
        let view: ViewState =
            serde_json::from_str(r#"{"globalQuery":"llm","density":"cozy"}"#).unwrap();
        assert_eq!(view.global_query, "llm");
        assert_eq!(view.density, Density::Comfortable);
        assert!(view.sort.is_empty());
        assert!(view.group_by.is_none());
    }

    #[test]
    fn legacy_blob_keys_are_accepted() {
        let view: ViewState = serde_json::from_str(
            r#"{"visibleCols":{"DOI":false},"globalQ":"x","groupBy":"","sort":[{"field":"Year","dir":"desc"}]}"#,
        )
        .unwrap();
        assert_eq!(view.visible_columns.get("DOI"), Some(&false));
        assert_eq!(view.global_query, "x");
        assert!(view.group_by.is_none());
        assert_eq!(view.sort, vec![SortKey::descending("Year")]);
    }

    #[test]
    fn serializes_with_camel_case_layout() {
        let mut view = ViewState::default();
        view.toggle_sort("Year", false);
        view.set_group_by(Some("Region".into()));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sort"][0]["dir"], "asc");
        assert_eq!(json["groupBy"], "Region");
        assert_eq!(json["density"], "compact");
        assert!(json.get("visibleColumns").is_some());
        assert!(json.get("globalQuery").is_some());
    }

    #[test]
    fn parses_sort_and_filter_expressions() {
        assert_eq!(
            "Year:desc".parse::<SortKey>().unwrap(),
            SortKey::descending("Year")
        );
        assert_eq!("Title".parse::<SortKey>().unwrap(), SortKey::ascending("Title"));
        assert!(":asc".parse::<SortKey>().is_err());
        let filter: FilterSpec = "Title=cancer".parse().unwrap();
        assert_eq!(filter.field, "Title");
        assert_eq!(filter.pattern, "cancer");
        assert!("cancer".parse::<FilterSpec>().is_err());
    }

    #[test]
    fn active_filters_skip_blank_patterns() {
        let mut view = ViewState::default();
        view.set_filter("Title", "  ");
        view.set_filter("DOI", "10.1");
        let active: Vec<_> = view.active_filters().collect();
        assert_eq!(active, vec![("DOI", "10.1")]);
        view.set_filter("DOI", "");
        assert!(view.filter("DOI").is_none());
    }
}

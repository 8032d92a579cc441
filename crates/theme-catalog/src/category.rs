//! Category snapshot for fallback rendering.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use theme_core::{load_structured_file, ThemeResult};

use crate::ids::CategoryId;

/// Name and URL of a category on the breadcrumb path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    /// Category name.
    pub name: String,
    /// Category URL (root categories usually have none).
    #[serde(default)]
    pub url: Option<String>,
}

impl CategoryLink {
    pub fn new(name: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            url: url.map(str::to_string),
        }
    }
}

/// Read-only projection of the current category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    /// Category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category description (may contain HTML).
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical category URL.
    pub url: String,
    /// IDs from the tree root down to this category.
    #[serde(default)]
    pub path_ids: Vec<CategoryId>,
    /// Resolved ancestors, keyed by ID. IDs on the path without an entry
    /// (e.g., the invisible tree root) are not shown.
    #[serde(default)]
    pub ancestors: HashMap<CategoryId, CategoryLink>,
}

impl CategorySnapshot {
    /// Create a snapshot with no description or path.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            url: url.into(),
            path_ids: Vec::new(),
            ancestors: HashMap::new(),
        }
    }

    /// Load a snapshot from a TOML or JSON file.
    pub fn load(path: &Path) -> ThemeResult<Self> {
        load_structured_file(path)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the path from a materialized path string (e.g., "1/2/12").
    pub fn with_path(mut self, path: &str) -> Self {
        self.path_ids = CategoryId::parse_path(path);
        self
    }

    /// Register a resolved ancestor.
    pub fn with_ancestor(mut self, id: impl Into<CategoryId>, link: CategoryLink) -> Self {
        self.ancestors.insert(id.into(), link);
        self
    }

    /// Breadcrumb trail in path order.
    ///
    /// Path IDs with no resolved ancestor are skipped, leaving no gap.
    pub fn breadcrumbs(&self) -> Vec<&CategoryLink> {
        self.path_ids
            .iter()
            .filter_map(|id| self.ancestors.get(id))
            .collect()
    }

    /// Depth of the category in the tree (root = 0).
    pub fn depth(&self) -> usize {
        self.path_ids.len().saturating_sub(1)
    }
}

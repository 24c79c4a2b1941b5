//! # Template Catalogs
//!
//! The streaming core does not own asset content. For every
//! [`EntityCategory`] it only needs to know how many templates exist, so it
//! can pick index `i` and record a [`crate::PlacedEntity`]; turning that
//! record into a mesh or prefab is the consumer's business.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityCategory;
use crate::error::{ConfigError, ConfigResult};

/// Ordered template lists per category.
pub trait TemplateCatalog {
    /// Number of templates available for `category`. Zero disables every
    /// generation step that needs the category.
    fn template_count(&self, category: EntityCategory) -> usize;

    /// Display name of a template, if the catalog knows one.
    fn template_name(&self, _category: EntityCategory, _index: usize) -> Option<&str> {
        None
    }
}

/// In-memory catalog of template names, loadable from TOML:
///
/// ```toml
/// tree = ["oak", "pine", "birch"]
/// windmill = ["windmill_classic"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    templates: BTreeMap<EntityCategory, Vec<String>>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with `count` anonymous templates in every category.
    #[must_use]
    pub fn uniform(count: usize) -> Self {
        let mut catalog = Self::new();
        for category in EntityCategory::ALL {
            let names = (0..count).map(|i| format!("{}_{i}", category.name())).collect();
            catalog.templates.insert(category, names);
        }
        catalog
    }

    /// Adds (or replaces) the template list of one category.
    #[must_use]
    pub fn with_templates<I, S>(mut self, category: EntityCategory, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates
            .insert(category, names.into_iter().map(Into::into).collect());
        self
    }

    /// Removes every template of one category.
    #[must_use]
    pub fn without(mut self, category: EntityCategory) -> Self {
        self.templates.remove(&category);
        self
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown categories.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(ConfigError::from)
    }

    /// Categories with no templates at all.
    #[must_use]
    pub fn missing_categories(&self) -> Vec<EntityCategory> {
        EntityCategory::ALL
            .into_iter()
            .filter(|&category| self.template_count(category) == 0)
            .collect()
    }
}

impl TemplateCatalog for StaticCatalog {
    fn template_count(&self, category: EntityCategory) -> usize {
        self.templates.get(&category).map_or(0, Vec::len)
    }

    fn template_name(&self, category: EntityCategory, index: usize) -> Option<&str> {
        self.templates
            .get(&category)?
            .get(index)
            .map(String::as_str)
    }
}

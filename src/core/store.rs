//! The category → scripts store — the single authority for all list data.
//!
//! Every widget in the UI holds only a rendered projection of this store;
//! after any mutation the owner re-renders the projections explicitly.
//! Nothing in this module touches the terminal or the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced by store mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("category name must not be empty")]
    EmptyName,
    #[error("no category named '{0}'")]
    NoSuchCategory(String),
    #[error("script index {index} out of range for category '{category}'")]
    IndexOutOfRange { category: String, index: usize },
}

/// A named, ordered group of script references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub scripts: Vec<PathBuf>,
}

/// Ordered collection of categories.  Order is meaningful — it is both the
/// display order of the category pane and the order written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed categories seeded when no configuration exists yet.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        for name in ["General", "Restart tools", "Admin tools", "AI tools"] {
            store.categories.push(Category {
                name: name.to_string(),
                scripts: Vec::new(),
            });
        }
        store
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Category names in display order.
    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Name of the category at `index` in display order.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(|c| c.name.as_str())
    }

    /// Script paths of `name`, in stored order.  Empty when absent.
    pub fn scripts_of(&self, name: &str) -> &[PathBuf] {
        self.get(name).map(|c| c.scripts.as_slice()).unwrap_or(&[])
    }

    /// First category name in display order, if any.
    pub fn first_name(&self) -> Option<&str> {
        self.categories.first().map(|c| c.name.as_str())
    }

    // ── mutations ───────────────────────────────────────────────

    /// Append an empty category.  Rejects empty and duplicate names without
    /// mutating anything.
    pub fn add_category(&mut self, name: &str) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.get(name).is_some() {
            return Err(StoreError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(Category {
            name: name.to_string(),
            scripts: Vec::new(),
        });
        Ok(())
    }

    pub fn delete_category(&mut self, name: &str) -> Result<(), StoreError> {
        let Some(pos) = self.categories.iter().position(|c| c.name == name) else {
            return Err(StoreError::NoSuchCategory(name.to_string()));
        };
        self.categories.remove(pos);
        Ok(())
    }

    /// Append each path to `name`'s script list.  Paths are stored verbatim —
    /// no existence check beyond what the import prompt already performed.
    pub fn add_scripts<I, P>(&mut self, name: &str, paths: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let category = self
            .get_mut(name)
            .ok_or_else(|| StoreError::NoSuchCategory(name.to_string()))?;
        category.scripts.extend(paths.into_iter().map(Into::into));
        Ok(())
    }

    pub fn remove_script(&mut self, name: &str, index: usize) -> Result<PathBuf, StoreError> {
        let category = self
            .get_mut(name)
            .ok_or_else(|| StoreError::NoSuchCategory(name.to_string()))?;
        if index >= category.scripts.len() {
            return Err(StoreError::IndexOutOfRange {
                category: name.to_string(),
                index,
            });
        }
        Ok(category.scripts.remove(index))
    }

    /// Overwrite `name`'s stored order with the displayed order — the
    /// "pure reorder confirmation" after an intra-list drag.
    pub fn set_script_order<I, P>(&mut self, name: &str, paths: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let category = self
            .get_mut(name)
            .ok_or_else(|| StoreError::NoSuchCategory(name.to_string()))?;
        category.scripts = paths.into_iter().map(Into::into).collect();
        Ok(())
    }

    /// Rebuild the store in the given key order, preserving each category's
    /// existing script list.  Keys that don't match an existing category are
    /// skipped; categories missing from `names` are dropped — the caller
    /// passes the full displayed row list, so in practice this is a pure
    /// permutation.
    pub fn reorder_categories<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reordered = Vec::with_capacity(self.categories.len());
        for name in names {
            if let Some(pos) = self
                .categories
                .iter()
                .position(|c| c.name == name.as_ref())
            {
                reordered.push(self.categories.remove(pos));
            }
        }
        self.categories = reordered;
    }

    /// Move the script at `index` out of `from` and append it to `to`.
    /// `from`'s remaining order is untouched.  Returns the moved path.
    pub fn transfer_script(
        &mut self,
        from: &str,
        index: usize,
        to: &str,
    ) -> Result<PathBuf, StoreError> {
        if self.get(to).is_none() {
            return Err(StoreError::NoSuchCategory(to.to_string()));
        }
        let script = self.remove_script(from, index)?;
        // Target existence checked above.
        self.get_mut(to)
            .map(|c| c.scripts.push(script.clone()));
        Ok(script)
    }
}

/// Row labels for the script pane: paths rendered lossily as display strings.
pub fn script_labels(scripts: &[PathBuf]) -> Vec<String> {
    scripts.iter().map(|p| p.display().to_string()).collect()
}

/// Is this a script the deck knows how to launch?
pub fn is_supported_script(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("bat") || ext.eq_ignore_ascii_case("ps1")
    )
}

// ── serde: persisted as a JSON object, order preserved ────────

impl Serialize for CategoryStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            let paths: Vec<String> = category
                .scripts
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            map.serialize_entry(&category.name, &paths)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = CategoryStore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to script path list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::new();
                while let Some((name, paths)) = access.next_entry::<String, Vec<String>>()? {
                    // Last entry wins on (malformed) duplicate keys.
                    categories.retain(|c: &Category| c.name != name);
                    categories.push(Category {
                        name,
                        scripts: paths.into_iter().map(PathBuf::from).collect(),
                    });
                }
                Ok(CategoryStore { categories })
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &[&str])]) -> CategoryStore {
        let mut store = CategoryStore::new();
        for (name, scripts) in entries {
            store.add_category(name).unwrap();
            store
                .add_scripts(name, scripts.iter().map(PathBuf::from))
                .unwrap();
        }
        store
    }

    #[test]
    fn add_category_rejects_duplicates_without_mutating() {
        let mut store = store_with(&[("General", &["a.bat"])]);
        let before = store.clone();

        let err = store.add_category("General").unwrap_err();
        assert_eq!(err, StoreError::DuplicateCategory("General".into()));
        assert_eq!(store, before);
    }

    #[test]
    fn add_category_rejects_empty_name() {
        let mut store = CategoryStore::new();
        assert_eq!(store.add_category(""), Err(StoreError::EmptyName));
        assert!(store.is_empty());
    }

    #[test]
    fn add_category_appends_empty_list() {
        let mut store = store_with(&[("General", &["a.bat"])]);
        store.add_category("Tools").unwrap();

        assert_eq!(store.names(), vec!["General", "Tools"]);
        assert!(store.scripts_of("Tools").is_empty());
        assert_eq!(store.scripts_of("General"), &[PathBuf::from("a.bat")]);
    }

    #[test]
    fn delete_last_category_leaves_store_empty() {
        let mut store = store_with(&[("General", &["a.bat"])]);
        store.delete_category("General").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.first_name(), None);
    }

    #[test]
    fn delete_missing_category_errors() {
        let mut store = CategoryStore::new();
        assert_eq!(
            store.delete_category("nope"),
            Err(StoreError::NoSuchCategory("nope".into()))
        );
    }

    #[test]
    fn set_script_order_overwrites_stored_order() {
        let mut store = store_with(&[("General", &["a.bat", "b.bat", "c.ps1"])]);
        store
            .set_script_order("General", ["c.ps1", "a.bat", "b.bat"])
            .unwrap();
        assert_eq!(
            store.scripts_of("General"),
            &[
                PathBuf::from("c.ps1"),
                PathBuf::from("a.bat"),
                PathBuf::from("b.bat")
            ]
        );
    }

    #[test]
    fn transfer_appends_to_target_and_keeps_source_order() {
        let mut store = store_with(&[
            ("General", &["a.bat", "b.bat", "c.ps1"]),
            ("Tools", &["t.bat"]),
        ]);

        let moved = store.transfer_script("General", 1, "Tools").unwrap();
        assert_eq!(moved, PathBuf::from("b.bat"));
        assert_eq!(
            store.scripts_of("General"),
            &[PathBuf::from("a.bat"), PathBuf::from("c.ps1")]
        );
        assert_eq!(
            store.scripts_of("Tools"),
            &[PathBuf::from("t.bat"), PathBuf::from("b.bat")]
        );
    }

    #[test]
    fn transfer_only_script_empties_source() {
        let mut store = store_with(&[("General", &["a.bat"]), ("Tools", &[])]);
        store.transfer_script("General", 0, "Tools").unwrap();
        assert!(store.scripts_of("General").is_empty());
        assert_eq!(store.scripts_of("Tools"), &[PathBuf::from("a.bat")]);
    }

    #[test]
    fn transfer_to_missing_target_leaves_source_untouched() {
        let mut store = store_with(&[("General", &["a.bat"])]);
        let err = store.transfer_script("General", 0, "nope").unwrap_err();
        assert_eq!(err, StoreError::NoSuchCategory("nope".into()));
        assert_eq!(store.scripts_of("General"), &[PathBuf::from("a.bat")]);
    }

    #[test]
    fn reorder_categories_preserves_script_lists() {
        let mut store = store_with(&[
            ("General", &["a.bat"]),
            ("Tools", &["t.bat"]),
            ("Admin", &[]),
        ]);

        store.reorder_categories(["Admin", "General", "Tools"]);
        assert_eq!(store.names(), vec!["Admin", "General", "Tools"]);
        assert_eq!(store.scripts_of("General"), &[PathBuf::from("a.bat")]);
        assert_eq!(store.scripts_of("Tools"), &[PathBuf::from("t.bat")]);
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let store = store_with(&[
            ("General", &["a.bat", "b.ps1"]),
            ("AI tools", &[]),
            ("Admin tools", &["x.bat"]),
        ]);

        let json = serde_json::to_string(&store).unwrap();
        let back: CategoryStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
        assert_eq!(back.names(), vec!["General", "AI tools", "Admin tools"]);
    }

    #[test]
    fn supported_scripts_by_extension() {
        assert!(is_supported_script(Path::new("run.bat")));
        assert!(is_supported_script(Path::new("Deploy.PS1")));
        assert!(!is_supported_script(Path::new("run.sh")));
        assert!(!is_supported_script(Path::new("noext")));
    }
}

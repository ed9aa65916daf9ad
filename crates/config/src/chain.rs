//! Class extensions chain resolution.
//!
//! The chain maps an original class namespace to the ordered stack of
//! extension classes applied over it. Insertion order is override precedence:
//! the last appended extension is the outermost layer. The chain is owned by
//! one [`ShopConfiguration`](crate::ShopConfiguration) and mutated only on
//! activation/deactivation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopforge_core::{ConfigError, ConfigResult, ValueObject};

use crate::setting::ClassExtension;

/// Ordered mapping original class → extension classes.
///
/// Invariants:
/// - no duplicate extension per original class (appends are set-like);
/// - no empty extension lists — a class whose last extension is removed is
///   dropped from the map, so empty-list and missing-key serialize
///   identically (the key is absent);
/// - ordering is deterministic and reproducible from the persisted state
///   after any activate/deactivate sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassExtensionsChain {
    chain: BTreeMap<String, Vec<String>>,
}

impl ValueObject for ClassExtensionsChain {}

impl ClassExtensionsChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from a raw map, enforcing the chain invariants.
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> ConfigResult<Self> {
        for (original, extensions) in &map {
            if extensions.is_empty() {
                return Err(ConfigError::validation(format!(
                    "class '{original}' has an empty extension list"
                )));
            }
            let mut seen = std::collections::BTreeSet::new();
            for extension in extensions {
                if !seen.insert(extension.as_str()) {
                    return Err(ConfigError::validation(format!(
                        "class '{original}' lists extension '{extension}' twice"
                    )));
                }
            }
        }
        Ok(Self { chain: map })
    }

    /// Set-like append: a no-op when `extension` is already present for
    /// `original`, otherwise appended as the new outermost layer.
    pub fn append(&mut self, original: &str, extension: &str) {
        let extensions = self.chain.entry(original.to_string()).or_default();
        if !extensions.iter().any(|e| e == extension) {
            extensions.push(extension.to_string());
        }
    }

    /// Remove exactly one `(original, extension)` entry. Drops the key
    /// entirely when the list empties.
    pub fn remove(&mut self, original: &str, extension: &str) {
        if let Some(extensions) = self.chain.get_mut(original) {
            extensions.retain(|e| e != extension);
            if extensions.is_empty() {
                self.chain.remove(original);
            }
        }
    }

    /// Append a module's declared extensions, in declaration order.
    pub fn add_module_extensions(&mut self, extensions: &[ClassExtension]) {
        for ext in extensions {
            self.append(&ext.original, &ext.extension);
        }
    }

    /// Remove a module's declared extensions.
    pub fn remove_module_extensions(&mut self, extensions: &[ClassExtension]) {
        for ext in extensions {
            self.remove(&ext.original, &ext.extension);
        }
    }

    /// The ordered extension stack for `original` (empty when not extended).
    pub fn extensions_of(&self, original: &str) -> &[String] {
        self.chain.get(original).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, original: &str, extension: &str) -> bool {
        self.extensions_of(original).iter().any(|e| e == extension)
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.chain
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn append_is_set_like() {
        let mut chain = ClassExtensionsChain::new();
        chain.append("shop::Article", "a::Article");
        chain.append("shop::Article", "b::Article");
        chain.append("shop::Article", "a::Article");

        assert_eq!(chain.extensions_of("shop::Article"), ["a::Article", "b::Article"]);
    }

    #[test]
    fn last_appended_extension_is_outermost() {
        let mut chain = ClassExtensionsChain::new();
        chain.append("shop::Basket", "inner::Basket");
        chain.append("shop::Basket", "outer::Basket");

        assert_eq!(chain.extensions_of("shop::Basket").last().unwrap(), "outer::Basket");
    }

    #[test]
    fn removing_the_last_extension_drops_the_key() {
        let mut chain = ClassExtensionsChain::new();
        chain.append("shop::Article", "a::Article");
        chain.remove("shop::Article", "a::Article");

        assert!(chain.is_empty());
        assert_eq!(serde_json::to_string(&chain).unwrap(), "{}");
    }

    #[test]
    fn removal_keeps_other_entries_in_order() {
        let mut chain = ClassExtensionsChain::new();
        chain.append("shop::Article", "a::Article");
        chain.append("shop::Article", "b::Article");
        chain.append("shop::Article", "c::Article");
        chain.remove("shop::Article", "b::Article");

        assert_eq!(chain.extensions_of("shop::Article"), ["a::Article", "c::Article"]);
    }

    #[test]
    fn from_map_rejects_duplicates_and_empty_lists() {
        let map = BTreeMap::from([("shop::Article".to_string(), vec![])]);
        assert!(ClassExtensionsChain::from_map(map).is_err());

        let map = BTreeMap::from([(
            "shop::Article".to_string(),
            vec!["a::Article".to_string(), "a::Article".to_string()],
        )]);
        assert!(ClassExtensionsChain::from_map(map).is_err());
    }

    proptest! {
        /// Any interleaving of appends and removes preserves the chain
        /// invariants: no duplicates per class, no empty lists left behind.
        #[test]
        fn invariants_hold_under_arbitrary_edits(ops in prop::collection::vec((0u8..4, 0u8..4, prop::bool::ANY), 0..64)) {
            let mut chain = ClassExtensionsChain::new();
            for (original, extension, add) in ops {
                let original = format!("shop::Class{original}");
                let extension = format!("module::Ext{extension}");
                if add {
                    chain.append(&original, &extension);
                } else {
                    chain.remove(&original, &extension);
                }
            }

            for (original, extensions) in chain.as_map() {
                prop_assert!(!extensions.is_empty(), "empty list left for {original}");
                let mut seen = std::collections::BTreeSet::new();
                for extension in extensions {
                    prop_assert!(seen.insert(extension), "duplicate {extension} for {original}");
                }
            }
        }
    }
}

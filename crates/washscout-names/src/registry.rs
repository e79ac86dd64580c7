//! Set of normalized known-competitor names with a map back to the
//! canonical spelling.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::normalize::normalize;
use crate::reference_list::REFERENCE_OPERATORS;

static BUILTIN: LazyLock<ReferenceRegistry> =
    LazyLock::new(|| ReferenceRegistry::from_names(REFERENCE_OPERATORS.iter().copied()));

/// Read-only after construction; share it behind an `Arc` or `&'static`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    keys: HashSet<String>,
    canonical: HashMap<String, String>,
}

impl ReferenceRegistry {
    /// Builds a registry from raw names. The first name that produces a key
    /// is its canonical spelling; blank names are skipped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        for name in names {
            let original = name.as_ref().trim();
            if original.is_empty() {
                continue;
            }
            let key = normalize(original);
            if key.is_empty() {
                continue;
            }
            registry
                .canonical
                .entry(key.clone())
                .or_insert_with(|| original.to_owned());
            registry.keys.insert(key);
        }
        registry
    }

    /// Process-wide registry over the built-in operator list, built on first use.
    #[must_use]
    pub fn builtin() -> &'static ReferenceRegistry {
        &BUILTIN
    }

    #[must_use]
    pub fn is_member(&self, name: &str) -> bool {
        let key = normalize(name);
        !key.is_empty() && self.keys.contains(&key)
    }

    /// Canonical reference spelling for `name`, if it is a member.
    #[must_use]
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.canonical.get(&normalize(name)).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_name_is_a_member() {
        let registry = ReferenceRegistry::builtin();
        for name in REFERENCE_OPERATORS {
            assert!(registry.is_member(name), "{name:?} should be a member");
        }
    }

    #[test]
    fn builtin_is_built_once() {
        let a: *const ReferenceRegistry = ReferenceRegistry::builtin();
        let b: *const ReferenceRegistry = ReferenceRegistry::builtin();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn variant_spellings_match() {
        let registry = ReferenceRegistry::builtin();
        assert!(registry.is_member("MISTER CAR WASH"));
        assert!(registry.is_member("Mister Carwash"));
        assert!(registry.is_member("Tommy's Express Car Wash"));
        assert!(registry.is_member("Quick Quack Express Car Wash"));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        let registry = ReferenceRegistry::builtin();
        assert!(!registry.is_member("Quick Lube"));
        assert!(!registry.is_member("Downtown Detail & Hand Wash"));
    }

    #[test]
    fn empty_name_never_matches() {
        let registry = ReferenceRegistry::from_names(["", "  ", "Mister Car Wash"]);
        assert!(!registry.is_member(""));
        assert!(!registry.is_member("®"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn first_seen_name_is_canonical() {
        let registry = ReferenceRegistry::from_names([
            "SpeedWash Car Wash",
            "Speedwash",
            "Mister Car Wash",
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.canonical_name("speed wash"),
            Some("SpeedWash Car Wash")
        );
        assert_eq!(
            registry.canonical_name("Mister Carwash"),
            Some("Mister Car Wash")
        );
        assert_eq!(registry.canonical_name("Quick Lube"), None);
    }

    #[test]
    fn default_registry_is_empty() {
        let registry = ReferenceRegistry::default();
        assert!(registry.is_empty());
        assert!(!registry.is_member("Mister Car Wash"));
    }
}

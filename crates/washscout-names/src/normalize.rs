//! Canonical compact keys for business names.
//!
//! The key is what exact-match lookups compare, so two spellings of the same
//! brand ("Tommy's Express®", "Tommy’s Express Car Wash") must collapse to
//! the same string while distinct brands stay distinct.

/// Generic trailing phrases, as they read after punctuation has been dropped
/// ("&" is gone, "and" survives). Ordered longest first.
const GENERIC_SUFFIXES: &[&str] = &[
    "car wash and detail center",
    "car wash and lube center",
    "car wash detail center",
    "full service car wash",
    "car wash lube center",
    "express car wash",
    "xpress car wash",
    "express carwash",
    "xpress carwash",
    "car washes",
    "car wash",
    "carwash",
];

/// Normalizes a raw business name into its compact lookup key.
///
/// 1. Lower-case.
/// 2. Drop everything except ASCII letters, digits and whitespace.
/// 3. Collapse whitespace runs to single spaces and trim.
/// 4. Strip at most one generic suffix, longest first. The suffix must start
///    on a word boundary and leave a non-empty brand in front of it.
/// 5. Remove the remaining spaces.
///
/// Blank input yields `""`, which never matches anything.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();

    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let spaced = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let core = strip_generic_suffix(&spaced);

    core.chars().filter(|c| !c.is_whitespace()).collect()
}

fn strip_generic_suffix(name: &str) -> &str {
    for suffix in GENERIC_SUFFIXES {
        let Some(rest) = name.strip_suffix(suffix) else {
            continue;
        };
        // "speedcarwash" is a brand, not "speed" + suffix.
        let Some(brand) = rest.strip_suffix(' ') else {
            continue;
        };
        let brand = brand.trim_end();
        if brand.is_empty() {
            continue;
        }
        return brand;
    }
    name
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

//! `normalize` and `match` subcommands.

use std::path::Path;
use std::sync::Arc;

use washscout_names::{normalize, ReferenceRegistry, RegistryCache};

pub(crate) fn print_normalized(names: &[String]) {
    for name in names {
        println!("{name}\t{}", normalize(name));
    }
}

pub(crate) async fn load_registry(
    reference_csv: Option<&Path>,
) -> anyhow::Result<Arc<ReferenceRegistry>> {
    match reference_csv {
        Some(path) => Ok(RegistryCache::new().load(path).await?),
        None => Ok(Arc::new(ReferenceRegistry::builtin().clone())),
    }
}

pub(crate) fn match_line(registry: &ReferenceRegistry, name: &str) -> String {
    match registry.canonical_name(name) {
        Some(canonical) => format!("{name}\tmatch\t{canonical}"),
        None => format!("{name}\tno match"),
    }
}

pub(crate) async fn print_matches(
    names: &[String],
    reference_csv: Option<&Path>,
) -> anyhow::Result<()> {
    let registry = load_registry(reference_csv).await?;
    for name in names {
        println!("{}", match_line(&registry, name));
    }
    Ok(())
}

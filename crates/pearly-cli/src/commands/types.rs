// Rust guideline compliant 2026-10-18

//! Implementation of the `pearly types` command.

use crate::output::TypeResolution;
use crate::OutputFormatter;
use anyhow::Result;
use pearly_core::TypeRegistry;

/// Type names listed when none are requested.
pub const BUILTIN_TYPES: &[&str] = &["string", "number", "date", "datetime"];

/// Resolves type names through the registry and prints the result.
///
/// Unknown names resolve to the string converter and are marked as fallbacks.
/// The class path is the one that matched, in whichever namespace; it is
/// `None` for unknown names and converters registered directly.
///
/// # Errors
///
/// Currently infallible; returns `Result` for consistency with other commands.
pub fn execute(
    names: Vec<String>,
    registry: &TypeRegistry,
    formatter: &dyn OutputFormatter,
) -> Result<Vec<TypeResolution>> {
    let names = if names.is_empty() {
        BUILTIN_TYPES.iter().map(|name| (*name).to_string()).collect()
    } else {
        names
    };
    let resolutions: Vec<TypeResolution> = names
        .into_iter()
        .map(|requested| {
            let resolved = registry.get(&requested).name().to_string();
            let class_path = registry.resolved_class(&requested);
            TypeResolution {
                requested,
                resolved,
                class_path,
            }
        })
        .collect();

    println!("{}", formatter.format_types(&resolutions));
    Ok(resolutions)
}

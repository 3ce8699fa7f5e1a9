//! On-demand lookup of a full object definition from its locator.

use alcatalog_symbols::SymbolPackage;
use alcatalog_types::{DeclaredObject, SymbolLocator};
use tracing::debug;

use crate::scanner::has_extension;
use crate::{DiscoveryConfig, DiscoveryError, SourceParser};

/// Re-reads the file a locator points to and returns the object it names.
///
/// Source files are re-parsed; anything else is read as a symbol archive.
/// `Ok(None)` means the file no longer declares that object, which is
/// expected when it changed since the catalog was built.
pub fn resolve(
    locator: &SymbolLocator,
    parser: &dyn SourceParser,
    config: &DiscoveryConfig,
) -> Result<Option<DeclaredObject>, DiscoveryError> {
    let found = if has_extension(&locator.path, &config.source_extension) {
        parser
            .parse(&locator.path)?
            .into_iter()
            .find(|o| o.kind == locator.kind && o.id == locator.index)
    } else {
        let package = SymbolPackage::read(&locator.path)?;
        package.find(locator.kind, locator.index).cloned()
    };

    if found.is_none() {
        debug!(
            path = %locator.path.display(),
            kind = %locator.kind,
            id = locator.index,
            "Locator no longer matches an object"
        );
    }
    Ok(found)
}

//! Option-name resolution cache.
//!
//! Once an option-name [`Value`] has been resolved against a table, the
//! resolution is stashed in the value's cache slot so repeated configures
//! skip the chain walk. The cached entry co-owns the table, so a table
//! cannot disappear while a name still points into it; duplicated values
//! co-own it too.

use larch_value::{Value, ValueCache};

use crate::error::OptionError;
use crate::table::{FindError, OptionRef, OptionTable};

pub(crate) struct OptionNameCache {
    head: OptionTable,
    resolved: OptionRef,
}

impl ValueCache for OptionNameCache {
    fn duplicate(&self) -> Box<dyn ValueCache> {
        Box::new(OptionNameCache {
            head: self.head.clone(),
            resolved: self.resolved.clone(),
        })
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Resolves `name` against `table`, consulting and maintaining the name's
/// cache. A cached resolution only applies when it was made against this
/// same table; failed lookups leave the cache untouched.
pub(crate) fn lookup(table: &OptionTable, name: &Value) -> Result<OptionRef, OptionError> {
    let hit = name
        .with_cache(|cache: &OptionNameCache| {
            OptionTable::ptr_eq(&cache.head, table).then(|| cache.resolved.clone())
        })
        .flatten();
    if let Some(resolved) = hit {
        return Ok(resolved);
    }

    match table.find(name.as_str()) {
        Ok(resolved) => {
            name.attach_cache(Box::new(OptionNameCache {
                head: table.clone(),
                resolved: resolved.clone(),
            }));
            Ok(resolved)
        }
        Err(FindError::Unknown) => Err(OptionError::UnknownOption(name.as_str().to_string())),
        Err(FindError::Ambiguous) => Err(OptionError::AmbiguousOption(name.as_str().to_string())),
    }
}

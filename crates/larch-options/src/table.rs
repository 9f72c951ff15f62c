//! Compiled option tables and the per-context table registry.
//!
//! An [`OptionContext`] compiles each static [`OptionTemplate`] at most once:
//! compiling the same template again hands out another handle to the shared
//! table. Tables are refcounted; a table stays alive as long as any handle
//! (including the handles cached inside option-name [`Value`]s) exists, and
//! unregisters itself from the context when the last one drops.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use larch_value::Value;
use rustc_hash::FxHashMap;

use crate::decl::{DeclKind, OptionDecl, OptionTemplate};

type Registry = RefCell<FxHashMap<usize, Weak<TableInner>>>;

/// Compiles and tracks the option tables of one single-threaded toolkit
/// context. Cheap to clone; clones share the registry.
#[derive(Clone, Default)]
pub struct OptionContext {
    registry: Rc<Registry>,
}

impl OptionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `template` into a table, or returns a new handle to the
    /// table compiled for it earlier. Chained base templates are compiled
    /// (and shared) the same way.
    ///
    /// Panics if a synonym names an option that is missing from its own
    /// template or is itself a synonym; both are template bugs.
    pub fn compile(&self, template: &'static OptionTemplate) -> OptionTable {
        let key = template as *const OptionTemplate as usize;
        if let Some(existing) = self.registry.borrow().get(&key).and_then(Weak::upgrade) {
            return OptionTable(existing);
        }

        let next = template.chain.map(|base| self.compile(base));
        let options = template
            .options
            .iter()
            .map(|decl| compile_option(decl, template.options))
            .collect::<Vec<_>>();
        log::debug!(
            "compiled option table with {} options (chained: {})",
            options.len(),
            next.is_some()
        );
        let inner = Rc::new(TableInner {
            key,
            registry: Rc::downgrade(&self.registry),
            options,
            next,
        });
        self.registry.borrow_mut().insert(key, Rc::downgrade(&inner));
        OptionTable(inner)
    }

    /// Number of tables currently alive in this context.
    pub fn table_count(&self) -> usize {
        self.registry
            .borrow()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

fn compile_option(decl: &'static OptionDecl, siblings: &'static [OptionDecl]) -> CompiledOption {
    let synonym = match decl.kind {
        DeclKind::Synonym(target) => {
            let index = siblings
                .iter()
                .position(|other| other.name == target)
                .unwrap_or_else(|| {
                    panic!(
                        "synonym option \"{}\" refers to unknown option \"{target}\"",
                        decl.name
                    )
                });
            if siblings[index].is_synonym() {
                panic!(
                    "synonym option \"{}\" refers to another synonym \"{target}\"",
                    decl.name
                );
            }
            Some(index)
        }
        _ => None,
    };

    let mono_default = match decl.kind {
        DeclKind::Color { mono_default } | DeclKind::Border { mono_default } => {
            mono_default.map(Value::new)
        }
        _ => None,
    };

    let needs_freeing = match decl.kind {
        DeclKind::String => decl.internal_slot.is_some(),
        DeclKind::Color { .. }
        | DeclKind::Font
        | DeclKind::Bitmap
        | DeclKind::Border { .. }
        | DeclKind::Cursor
        | DeclKind::Custom(_) => true,
        _ => false,
    };

    CompiledOption {
        decl,
        default: decl.default.map(Value::new),
        mono_default,
        synonym,
        needs_freeing,
    }
}

/// One template entry after compilation: the declaration plus the values and
/// resolutions that are computed once per table.
pub(crate) struct CompiledOption {
    pub(crate) decl: &'static OptionDecl,
    pub(crate) default: Option<Value>,
    pub(crate) mono_default: Option<Value>,
    /// Index of the canonical option within the same table, for synonyms.
    pub(crate) synonym: Option<usize>,
    /// Whether the internal form owns resources that must be released when
    /// the option is overwritten or torn down.
    pub(crate) needs_freeing: bool,
}

pub(crate) struct TableInner {
    key: usize,
    registry: Weak<Registry>,
    pub(crate) options: Vec<CompiledOption>,
    pub(crate) next: Option<OptionTable>,
}

impl Drop for TableInner {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(&self.key);
        }
    }
}

/// A shared handle to a compiled option table.
#[derive(Clone)]
pub struct OptionTable(pub(crate) Rc<TableInner>);

/// Liveness snapshot of one table in a chain, for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDebugInfo {
    pub handle_count: usize,
    pub option_count: usize,
    pub first_option: Option<&'static str>,
}

impl OptionTable {
    pub fn ptr_eq(a: &OptionTable, b: &OptionTable) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles to this table, counting cached name
    /// resolutions.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// One snapshot per table in the chain, head first. The walk borrows
    /// rather than clones, so the reported handle counts are the callers'
    /// alone.
    pub fn debug_info(&self) -> Vec<TableDebugInfo> {
        let mut out = Vec::new();
        let mut current = Some(self);
        while let Some(table) = current {
            out.push(TableDebugInfo {
                handle_count: table.handle_count(),
                option_count: table.0.options.len(),
                first_option: table.0.options.first().map(|o| o.decl.name),
            });
            current = table.0.next.as_ref();
        }
        out
    }

    /// Cache-free lookup of the declaration behind `name` (exact or
    /// unambiguous abbreviation), searching the whole chain.
    pub fn find_decl(&self, name: &str) -> Option<&'static OptionDecl> {
        self.find(name).ok().map(|r| r.compiled().decl)
    }

    /// Resolves an option name to its table entry. An exact match anywhere
    /// in the chain wins immediately; otherwise unique strict-prefix
    /// abbreviations are accepted. Abbreviations matching two entries are
    /// still unambiguous when both entries carry the same option name (a
    /// shadowing chain); the entry nearest the head wins.
    pub(crate) fn find(&self, name: &str) -> Result<OptionRef, FindError> {
        let mut best: Option<OptionRef> = None;
        let mut current = Some(self.clone());
        while let Some(table) = current {
            for (index, option) in table.0.options.iter().enumerate() {
                let option_name = option.decl.name;
                if option_name == name {
                    return Ok(OptionRef {
                        table: table.clone(),
                        index,
                    });
                }
                if option_name.len() > name.len() && option_name.starts_with(name) {
                    match &best {
                        None => {
                            best = Some(OptionRef {
                                table: table.clone(),
                                index,
                            })
                        }
                        Some(prev) if prev.compiled().decl.name != option_name => {
                            return Err(FindError::Ambiguous)
                        }
                        Some(_) => {}
                    }
                }
            }
            current = table.0.next.clone();
        }
        best.ok_or(FindError::Unknown)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FindError {
    Unknown,
    Ambiguous,
}

/// A resolved option: which table in the chain, which entry.
#[derive(Clone)]
pub(crate) struct OptionRef {
    pub(crate) table: OptionTable,
    pub(crate) index: usize,
}

impl std::fmt::Debug for OptionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OptionRef")
            .field(&self.compiled().decl.name)
            .finish()
    }
}

impl OptionRef {
    pub(crate) fn compiled(&self) -> &CompiledOption {
        &self.table.0.options[self.index]
    }

    /// Follows a synonym to its canonical entry in the same table.
    pub(crate) fn canonical(&self) -> OptionRef {
        match self.compiled().synonym {
            Some(index) => OptionRef {
                table: self.table.clone(),
                index,
            },
            None => self.clone(),
        }
    }
}

//! The configuration engine: initialize, set, query, describe, and tear
//! down widget records through their compiled option tables.

use std::mem;

use larch_graphics::{Anchor, Justify, Relief};
use larch_platform::{PlatformError, Window};
use larch_value::Value;

use crate::decl::{DeclKind, OptionFlags};
use crate::error::{OptionError, ValueSource};
use crate::kinds::{self, DistanceError, DomainError, TextIndex};
use crate::name_cache;
use crate::record::{Configurable, InternalForm};
use crate::save::{SavedOption, SavedOptions};
use crate::table::{CompiledOption, OptionRef, OptionTable};

/// OR of the `change_mask` bits of every option modified by a
/// [`OptionTable::set_options`] call. Widgets use it to decide what work a
/// reconfigure requires (relayout, redraw, ...).
pub type ChangeMask = u32;

/// One entry of a describe listing.
#[derive(Debug)]
pub enum OptionInfo {
    /// A synonym, reported in short form.
    Synonym {
        name: &'static str,
        canonical: &'static str,
    },
    Direct {
        name: &'static str,
        db_name: Option<&'static str>,
        db_class: Option<&'static str>,
        /// Table default, with the monochrome alternate substituted on
        /// shallow displays.
        default: Option<Value>,
        current: Value,
    },
}

impl OptionTable {
    /// Fills a record with starting values for every option in the chain.
    ///
    /// For each option the highest-priority available source wins: the
    /// window's theme database, then the platform's system defaults, then
    /// the table default (the monochrome alternate on shallow displays).
    /// Options with no source anywhere are left untouched, as are synonyms
    /// and options flagged `DONT_SET_DEFAULT`.
    ///
    /// Base tables are processed before the head table, so a shadowing
    /// option ends up with the head table's value. Errors abort mid-record;
    /// there is no rollback, and the error names the value's source.
    pub fn init_options(
        &self,
        record: &mut dyn Configurable,
        window: Option<&Window>,
    ) -> Result<(), OptionError> {
        if let Some(next) = &self.0.next {
            next.init_options(record, window)?;
        }
        let shallow = window.is_some_and(Window::is_shallow);
        for index in 0..self.0.options.len() {
            let compiled = &self.0.options[index];
            let decl = compiled.decl;
            if decl.is_synonym() || decl.flags.contains(OptionFlags::DONT_SET_DEFAULT) {
                continue;
            }

            let mut source = ValueSource::TableDefault;
            let mut value: Option<Value> = None;
            if let (Some(window), Some(db_name)) = (window, decl.db_name) {
                let db_class = decl.db_class.unwrap_or("");
                if let Some(text) = window.theme_value(db_name, db_class) {
                    value = Some(Value::new(text));
                    source = ValueSource::ThemeDatabase;
                } else if let Some(text) = window.system_default(db_name, db_class) {
                    value = Some(Value::new(text));
                    source = ValueSource::SystemDefault;
                }
            }
            if value.is_none() {
                value = if shallow && compiled.mono_default.is_some() {
                    compiled.mono_default.clone()
                } else {
                    compiled.default.clone()
                };
            }
            let Some(value) = value else { continue };

            let option = OptionRef {
                table: self.clone(),
                index,
            };
            apply_one(&option, record, &value, window, None).map_err(|err| {
                OptionError::Init {
                    option: decl.name,
                    source_kind: source,
                    window: window.map(Window::path_name),
                    source: Box::new(err),
                }
            })?;
        }
        Ok(())
    }

    /// Applies `-name value` pairs to a record, resolving abbreviations and
    /// synonyms. Returns the OR of the modified options' change masks.
    ///
    /// When a `save` log is supplied, each overwritten value is pushed onto
    /// it before being replaced. On error the record keeps every pair
    /// applied so far; with a log the caller chooses between
    /// [`SavedOptions::restore`] and [`SavedOptions::discard`].
    pub fn set_options(
        &self,
        record: &mut dyn Configurable,
        window: Option<&Window>,
        args: &[Value],
        mut save: Option<&mut SavedOptions>,
    ) -> Result<ChangeMask, OptionError> {
        let mut mask: ChangeMask = 0;
        let mut i = 0;
        while i < args.len() {
            let name = &args[i];
            let option = name_cache::lookup(self, name)?.canonical();
            let Some(value) = args.get(i + 1) else {
                return Err(OptionError::MissingValue(name.as_str().to_string()));
            };
            apply_one(&option, record, value, window, save.as_deref_mut()).map_err(|err| {
                OptionError::Processing {
                    option: name.as_str().to_string(),
                    source: Box::new(err),
                }
            })?;
            mask |= option.compiled().decl.type_mask;
            i += 2;
        }
        Ok(mask)
    }

    /// Current value of one option, by (possibly abbreviated) name. Options
    /// without a value slot are formatted from their internal form; absent
    /// values come back as the empty value.
    pub fn get_value(
        &self,
        record: &dyn Configurable,
        name: &Value,
        window: Option<&Window>,
    ) -> Result<Value, OptionError> {
        let option = name_cache::lookup(self, name)?.canonical();
        let compiled = option.compiled();
        if let Some(slot) = compiled.decl.value_slot {
            return Ok(record.value_slot(slot).clone().unwrap_or_else(Value::empty));
        }
        Ok(format_internal(compiled, record, window))
    }

    /// Describes one option (synonyms redirect to their canonical entry) or,
    /// with `name` absent, every option in the chain, base tables first.
    pub fn describe(
        &self,
        record: &dyn Configurable,
        name: Option<&Value>,
        window: Option<&Window>,
    ) -> Result<Vec<OptionInfo>, OptionError> {
        if let Some(name) = name {
            let option = name_cache::lookup(self, name)?.canonical();
            return Ok(vec![info_for(&option, record, window)]);
        }
        let mut chain = Vec::new();
        let mut current = Some(self.clone());
        while let Some(table) = current {
            current = table.0.next.clone();
            chain.push(table);
        }
        let mut out = Vec::new();
        for table in chain.iter().rev() {
            for index in 0..table.0.options.len() {
                let option = OptionRef {
                    table: table.clone(),
                    index,
                };
                out.push(info_for(&option, record, window));
            }
        }
        Ok(out)
    }

    /// Releases everything a record holds through this table: resource
    /// handles go back to the platform, slots become empty. Safe to call
    /// more than once.
    pub fn free_options(&self, record: &mut dyn Configurable, window: Option<&Window>) {
        let mut current = Some(self.clone());
        while let Some(table) = current {
            for compiled in &table.0.options {
                let decl = compiled.decl;
                if decl.is_synonym() {
                    continue;
                }
                if let Some(slot) = decl.value_slot {
                    record.value_slot_mut(slot).take();
                }
                if let Some(slot) = decl.internal_slot {
                    let old = mem::replace(record.internal_slot_mut(slot), InternalForm::Unset);
                    if compiled.needs_freeing {
                        free_internal(compiled, old, window);
                    }
                }
            }
            current = table.0.next.clone();
        }
    }
}

fn info_for(option: &OptionRef, record: &dyn Configurable, window: Option<&Window>) -> OptionInfo {
    let compiled = option.compiled();
    let decl = compiled.decl;
    if let Some(target) = compiled.synonym {
        return OptionInfo::Synonym {
            name: decl.name,
            canonical: option.table.0.options[target].decl.name,
        };
    }
    let shallow = window.is_some_and(Window::is_shallow);
    let default = if shallow && compiled.mono_default.is_some() {
        compiled.mono_default.clone()
    } else {
        compiled.default.clone()
    };
    let current = match decl.value_slot {
        Some(slot) => record.value_slot(slot).clone().unwrap_or_else(Value::empty),
        None => format_internal(compiled, record, window),
    };
    OptionInfo::Direct {
        name: decl.name,
        db_name: decl.db_name,
        db_class: decl.db_class,
        default,
        current,
    }
}

/// Parses `value` for one (already canonical) option and writes the result
/// into the record. The record is only touched after the value parses and
/// any resource it names has been allocated; the displaced old value is
/// either pushed onto `save` or released immediately.
pub(crate) fn apply_one(
    option: &OptionRef,
    record: &mut dyn Configurable,
    value: &Value,
    window: Option<&Window>,
    save: Option<&mut SavedOptions>,
) -> Result<(), OptionError> {
    let compiled = option.compiled();
    let decl = compiled.decl;
    let is_null = decl.null_ok() && value.is_empty();
    let mut stored_value = if is_null { None } else { Some(value.clone()) };

    let new_internal = match decl.kind {
        DeclKind::Boolean => InternalForm::Bool(if is_null {
            None
        } else {
            Some(value.as_bool().ok_or_else(|| {
                parse_error("boolean value", value, decl.null_ok())
            })?)
        }),
        DeclKind::Integer => InternalForm::Int(if is_null {
            None
        } else {
            Some(
                value
                    .as_i64()
                    .ok_or_else(|| parse_error("integer", value, decl.null_ok()))?,
            )
        }),
        DeclKind::Index => InternalForm::Index(if value.is_empty() {
            None
        } else {
            Some(TextIndex::parse(value.as_str()).ok_or_else(|| {
                OptionError::Parse(format!(
                    "bad index \"{value}\": must be integer?[+-]integer?, end?[+-]integer?, or \"\""
                ))
            })?)
        }),
        DeclKind::Double => InternalForm::Double(if is_null {
            None
        } else {
            Some(
                value
                    .as_f64()
                    .ok_or_else(|| parse_error("floating-point number", value, decl.null_ok()))?,
            )
        }),
        DeclKind::String => InternalForm::Str(if is_null {
            None
        } else {
            Some(value.as_str().to_string())
        }),
        DeclKind::StringTable(names) => InternalForm::Enum(if is_null {
            None
        } else {
            let what = decl.name.strip_prefix('-').unwrap_or(decl.name);
            let index = domain_index(value, names, what, decl.null_ok())?;
            stored_value = Some(Value::new(names[index]));
            Some(index)
        }),
        DeclKind::Color { .. } => InternalForm::Color(if is_null {
            None
        } else {
            let window = window.ok_or(OptionError::WindowRequired(decl.name))?;
            Some(
                window
                    .platform()
                    .alloc_color(window.id(), value.as_str())
                    .map_err(|err| allocation_error(decl.name, err))?,
            )
        }),
        DeclKind::Font => InternalForm::Font(if is_null {
            None
        } else {
            let window = window.ok_or(OptionError::WindowRequired(decl.name))?;
            Some(
                window
                    .platform()
                    .alloc_font(window.id(), value.as_str())
                    .map_err(|err| allocation_error(decl.name, err))?,
            )
        }),
        DeclKind::Style => InternalForm::Style(if is_null {
            None
        } else {
            let window = window.ok_or(OptionError::WindowRequired(decl.name))?;
            Some(
                window
                    .platform()
                    .alloc_style(window.id(), value.as_str())
                    .map_err(|err| allocation_error(decl.name, err))?,
            )
        }),
        DeclKind::Bitmap => InternalForm::Bitmap(if is_null {
            None
        } else {
            let window = window.ok_or(OptionError::WindowRequired(decl.name))?;
            Some(
                window
                    .platform()
                    .alloc_bitmap(window.id(), value.as_str())
                    .map_err(|err| allocation_error(decl.name, err))?,
            )
        }),
        DeclKind::Border { .. } => InternalForm::Border(if is_null {
            None
        } else {
            let window = window.ok_or(OptionError::WindowRequired(decl.name))?;
            Some(
                window
                    .platform()
                    .alloc_border(window.id(), value.as_str())
                    .map_err(|err| allocation_error(decl.name, err))?,
            )
        }),
        DeclKind::Relief => InternalForm::Relief(if is_null {
            None
        } else {
            let index = domain_index(value, &Relief::NAMES, "relief", decl.null_ok())?;
            stored_value = Some(Value::new(Relief::NAMES[index]));
            Relief::from_index(index)
        }),
        DeclKind::Cursor => InternalForm::Cursor(if is_null {
            None
        } else {
            let window = window.ok_or(OptionError::WindowRequired(decl.name))?;
            Some(
                window
                    .platform()
                    .alloc_cursor(window.id(), value.as_str())
                    .map_err(|err| allocation_error(decl.name, err))?,
            )
        }),
        DeclKind::Justify => InternalForm::Justify(if is_null {
            None
        } else {
            let index = domain_index(value, &Justify::NAMES, "justification", decl.null_ok())?;
            stored_value = Some(Value::new(Justify::NAMES[index]));
            Justify::from_index(index)
        }),
        DeclKind::Anchor => InternalForm::Anchor(if is_null {
            None
        } else {
            let index = domain_index(value, &Anchor::NAMES, "anchor", decl.null_ok())?;
            stored_value = Some(Value::new(Anchor::NAMES[index]));
            Anchor::from_index(index)
        }),
        DeclKind::Pixels => InternalForm::Pixels(if is_null {
            None
        } else {
            Some(
                kinds::parse_distance(value.as_str(), window).map_err(|err| match err {
                    DistanceError::Malformed => {
                        parse_error("screen distance", value, decl.null_ok())
                    }
                    DistanceError::WindowRequired => OptionError::WindowRequired(decl.name),
                })?,
            )
        }),
        DeclKind::Window => InternalForm::Window(if is_null {
            None
        } else {
            let window = window.ok_or(OptionError::WindowRequired(decl.name))?;
            let target = window.lookup(value.as_str()).ok_or_else(|| {
                allocation_error(
                    decl.name,
                    PlatformError::BadWindowPath(value.as_str().to_string()),
                )
            })?;
            Some(target.id())
        }),
        DeclKind::Synonym(_) => unreachable!("synonyms are resolved before application"),
        DeclKind::Custom(custom) => {
            InternalForm::Custom(Some(custom.parse(window, &mut stored_value)?))
        }
    };

    let old_internal = match decl.internal_slot {
        Some(slot) => mem::replace(record.internal_slot_mut(slot), new_internal),
        None => {
            // Validation-only option: the parse result is released right away.
            free_internal(compiled, new_internal, window);
            InternalForm::Unset
        }
    };
    let old_value = match decl.value_slot {
        Some(slot) => mem::replace(record.value_slot_mut(slot), stored_value),
        None => None,
    };

    if matches!(decl.kind, DeclKind::Cursor) {
        if let (Some(window), Some(slot)) = (window, decl.internal_slot) {
            window.define_cursor(record.internal_slot(slot).as_cursor());
        }
    }

    match save {
        Some(log) => log.push(SavedOption {
            option: option.clone(),
            value: old_value,
            internal: old_internal,
        }),
        None => {
            if compiled.needs_freeing {
                free_internal(compiled, old_internal, window);
            }
        }
    }
    Ok(())
}

fn parse_error(expected: &str, value: &Value, null_ok: bool) -> OptionError {
    if null_ok {
        OptionError::Parse(format!(
            "expected {expected} or \"\" but got \"{value}\""
        ))
    } else {
        OptionError::Parse(format!("expected {expected} but got \"{value}\""))
    }
}

fn allocation_error(option: &'static str, source: PlatformError) -> OptionError {
    OptionError::Allocation { option, source }
}

fn domain_index(
    value: &Value,
    names: &[&str],
    what: &str,
    null_ok: bool,
) -> Result<usize, OptionError> {
    match kinds::match_domain(value.as_str(), names) {
        Ok(index) => Ok(index),
        Err(DomainError::NoMatch | DomainError::Ambiguous) => Err(OptionError::Parse(
            kinds::bad_domain(what, value.as_str(), names, null_ok),
        )),
    }
}

/// Releases the resources an internal form owns. Styles are interned by the
/// platform and never released; strings and plain scalars just drop.
pub(crate) fn free_internal(
    compiled: &CompiledOption,
    form: InternalForm,
    window: Option<&Window>,
) {
    match form {
        InternalForm::Color(Some(handle)) => match window {
            Some(window) => window.platform().free_color(handle),
            None => log::warn!("color handle dropped without a window to free it"),
        },
        InternalForm::Font(Some(handle)) => match window {
            Some(window) => window.platform().free_font(handle),
            None => log::warn!("font handle dropped without a window to free it"),
        },
        InternalForm::Bitmap(Some(handle)) => match window {
            Some(window) => window.platform().free_bitmap(handle),
            None => log::warn!("bitmap handle dropped without a window to free it"),
        },
        InternalForm::Border(Some(handle)) => match window {
            Some(window) => window.platform().free_border(handle),
            None => log::warn!("border handle dropped without a window to free it"),
        },
        InternalForm::Cursor(Some(handle)) => match window {
            Some(window) => window.platform().free_cursor(handle),
            None => log::warn!("cursor handle dropped without a window to free it"),
        },
        InternalForm::Custom(Some(custom_form)) => {
            if let DeclKind::Custom(custom) = compiled.decl.kind {
                custom.free(window, custom_form);
            }
        }
        _ => {}
    }
}

/// Synthesizes a textual value from an internal form, for options without a
/// value slot. Absent values and unset slots come back empty.
pub(crate) fn format_internal(
    compiled: &CompiledOption,
    record: &dyn Configurable,
    window: Option<&Window>,
) -> Value {
    let decl = compiled.decl;
    let Some(slot) = decl.internal_slot else {
        return Value::empty();
    };
    match (decl.kind, record.internal_slot(slot)) {
        (_, InternalForm::Unset) => Value::empty(),
        (_, InternalForm::Bool(Some(b))) => Value::new(if *b { "1" } else { "0" }),
        (_, InternalForm::Int(Some(n))) => Value::new(n.to_string()),
        (_, InternalForm::Index(Some(idx))) => Value::new(idx.format()),
        (_, InternalForm::Double(Some(d))) => Value::new(d.to_string()),
        (_, InternalForm::Str(Some(s))) => Value::new(s.clone()),
        (DeclKind::StringTable(names), InternalForm::Enum(Some(i))) => Value::new(names[*i]),
        (_, InternalForm::Color(Some(handle))) => Value::new(handle.name()),
        (_, InternalForm::Font(Some(handle))) => Value::new(handle.name()),
        (_, InternalForm::Style(Some(handle))) => Value::new(handle.name()),
        (_, InternalForm::Bitmap(Some(handle))) => Value::new(handle.name()),
        (_, InternalForm::Border(Some(handle))) => Value::new(handle.name()),
        (_, InternalForm::Relief(Some(relief))) => Value::new(relief.name()),
        (_, InternalForm::Cursor(Some(handle))) => Value::new(handle.name()),
        (_, InternalForm::Justify(Some(justify))) => Value::new(justify.name()),
        (_, InternalForm::Anchor(Some(anchor))) => Value::new(anchor.name()),
        (_, InternalForm::Pixels(Some(px))) => Value::new(px.to_string()),
        (_, InternalForm::Window(Some(id))) => match window {
            Some(window) => Value::new(window.platform().path_name(*id)),
            None => Value::empty(),
        },
        (DeclKind::Custom(custom), InternalForm::Custom(Some(form))) => {
            custom.format(window, form)
        }
        _ => Value::empty(),
    }
}

//! Configuration-option engine for Larch widgets.
//!
//! Widgets describe their options once, as a static [`OptionTemplate`] of
//! [`OptionDecl`] entries. An [`OptionContext`] compiles templates into
//! shared, refcounted [`OptionTable`]s; the table then drives everything
//! else: filling a widget record with defaults ([`OptionTable::init_options`]),
//! applying `-name value` pairs ([`OptionTable::set_options`]), querying and
//! describing current state, and tearing the record down again.
//!
//! Widget records plug in through the [`Configurable`] trait, which exposes
//! numbered value and internal slots. [`OptionStorage`] is a ready-made
//! vector-backed implementation for widgets that don't need bespoke storage.
//!
//! Batched updates can be recorded in a [`SavedOptions`] log and rolled back
//! with [`SavedOptions::restore`]; the engine itself never rolls back on its
//! own, so a failed batch leaves earlier options applied until the caller
//! decides.

mod decl;
mod engine;
mod error;
mod kinds;
mod name_cache;
mod record;
mod save;
mod table;

pub use decl::{
    CustomForm, CustomOption, DeclKind, InternalSlot, OptionDecl, OptionFlags, OptionTemplate,
    ValueSlot,
};
pub use engine::{ChangeMask, OptionInfo};
pub use error::{OptionError, ValueSource};
pub use kinds::TextIndex;
pub use record::{Configurable, InternalForm, OptionStorage};
pub use save::{SavedOptions, SAVE_CHUNK};
pub use table::{OptionContext, OptionTable, TableDebugInfo};

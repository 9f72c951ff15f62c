//! Static option declarations: the template a widget author writes once.

use std::any::Any;
use std::fmt;

use larch_platform::Window;
use larch_value::Value;

use crate::error::OptionError;

/// Index of a formatted-value slot in a widget record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueSlot(pub usize);

/// Index of an internal-form slot in a widget record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InternalSlot(pub usize);

bitflags::bitflags! {
    /// Per-option behavior flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OptionFlags: u32 {
        /// Empty string is accepted and stored as an absent value.
        const NULL_OK = 1;
        /// Skip this option entirely during record initialization.
        const DONT_SET_DEFAULT = 1 << 1;
    }
}

/// Parsed form of a custom option, owned by the widget record.
pub type CustomForm = Box<dyn Any>;

/// Hook for option kinds the engine doesn't know about.
///
/// `parse` may rewrite the value that gets stored in the record's value slot
/// (e.g. to a canonical spelling) by mutating `value`; setting it to `None`
/// stores an absent value.
///
/// `Sync` is required so custom kinds can live in `static` option templates
/// like every other declaration; the engine itself stays single-threaded.
pub trait CustomOption: Sync {
    /// Kind name used in error messages.
    fn name(&self) -> &'static str;

    fn parse(
        &self,
        window: Option<&Window>,
        value: &mut Option<Value>,
    ) -> Result<CustomForm, OptionError>;

    /// Render the internal form back to a value for queries.
    fn format(&self, window: Option<&Window>, form: &CustomForm) -> Value;

    /// Release resources held by a form. Default: drop.
    fn free(&self, window: Option<&Window>, form: CustomForm) {
        let _ = (window, form);
    }

    /// Called when a saved form is written back during restore. May rebuild
    /// the form if freeing the replacement invalidated shared state.
    fn restore(&self, window: Option<&Window>, saved: CustomForm) -> CustomForm {
        let _ = window;
        saved
    }
}

/// The kind of an option, selecting its parse/format/free behavior.
///
/// `StringTable` carries its domain of legal values; `Color` and `Border`
/// carry an alternate default for windows too shallow to render the real
/// one; `Synonym` names the option it redirects to within the same table.
#[derive(Clone, Copy)]
pub enum DeclKind {
    Boolean,
    Integer,
    Index,
    Double,
    String,
    StringTable(&'static [&'static str]),
    Color { mono_default: Option<&'static str> },
    Font,
    Style,
    Bitmap,
    Border { mono_default: Option<&'static str> },
    Relief,
    Cursor,
    Justify,
    Anchor,
    Pixels,
    Window,
    Synonym(&'static str),
    Custom(&'static dyn CustomOption),
}

impl DeclKind {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            DeclKind::Boolean => "boolean",
            DeclKind::Integer => "integer",
            DeclKind::Index => "index",
            DeclKind::Double => "double",
            DeclKind::String => "string",
            DeclKind::StringTable(_) => "stringTable",
            DeclKind::Color { .. } => "color",
            DeclKind::Font => "font",
            DeclKind::Style => "style",
            DeclKind::Bitmap => "bitmap",
            DeclKind::Border { .. } => "border",
            DeclKind::Relief => "relief",
            DeclKind::Cursor => "cursor",
            DeclKind::Justify => "justify",
            DeclKind::Anchor => "anchor",
            DeclKind::Pixels => "pixels",
            DeclKind::Window => "window",
            DeclKind::Synonym(_) => "synonym",
            DeclKind::Custom(custom) => custom.name(),
        }
    }
}

impl fmt::Debug for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::StringTable(names) => f.debug_tuple("StringTable").field(names).finish(),
            DeclKind::Synonym(target) => f.debug_tuple("Synonym").field(target).finish(),
            other => f.write_str(other.kind_name()),
        }
    }
}

/// One option in a widget's template.
///
/// Built with `OptionDecl::new` plus the `const` builder methods, so whole
/// templates live in statics:
///
/// ```
/// use larch_options::{DeclKind, OptionDecl, OptionTemplate};
///
/// static OPTIONS: [OptionDecl; 1] = [OptionDecl::new("-width", DeclKind::Integer)
///     .database("width", "Width")
///     .default_text("0")
///     .in_value_slot(0)
///     .in_internal_slot(0)];
/// static TEMPLATE: OptionTemplate = OptionTemplate::new(&OPTIONS);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OptionDecl {
    pub name: &'static str,
    pub db_name: Option<&'static str>,
    pub db_class: Option<&'static str>,
    pub default: Option<&'static str>,
    pub value_slot: Option<ValueSlot>,
    pub internal_slot: Option<InternalSlot>,
    pub flags: OptionFlags,
    /// Bits OR'd into the change mask returned by `set_options` when this
    /// option is modified.
    pub type_mask: u32,
    pub kind: DeclKind,
}

impl OptionDecl {
    pub const fn new(name: &'static str, kind: DeclKind) -> Self {
        OptionDecl {
            name,
            db_name: None,
            db_class: None,
            default: None,
            value_slot: None,
            internal_slot: None,
            flags: OptionFlags::empty(),
            type_mask: 0,
            kind,
        }
    }

    /// Option-database name and class used when initializing from a window's
    /// theme or system defaults.
    pub const fn database(mut self, db_name: &'static str, db_class: &'static str) -> Self {
        self.db_name = Some(db_name);
        self.db_class = Some(db_class);
        self
    }

    pub const fn default_text(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn in_value_slot(mut self, slot: usize) -> Self {
        self.value_slot = Some(ValueSlot(slot));
        self
    }

    pub const fn in_internal_slot(mut self, slot: usize) -> Self {
        self.internal_slot = Some(InternalSlot(slot));
        self
    }

    pub const fn with_flags(mut self, flags: OptionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub const fn change_mask(mut self, mask: u32) -> Self {
        self.type_mask = mask;
        self
    }

    pub fn is_synonym(&self) -> bool {
        matches!(self.kind, DeclKind::Synonym(_))
    }

    pub(crate) fn null_ok(&self) -> bool {
        self.flags.contains(OptionFlags::NULL_OK)
    }
}

/// A widget's full option set, optionally chained onto a base template so
/// derived widgets inherit (and may shadow) base options.
#[derive(Clone, Copy, Debug)]
pub struct OptionTemplate {
    pub options: &'static [OptionDecl],
    pub chain: Option<&'static OptionTemplate>,
}

impl OptionTemplate {
    pub const fn new(options: &'static [OptionDecl]) -> Self {
        OptionTemplate {
            options,
            chain: None,
        }
    }

    pub const fn chained(options: &'static [OptionDecl], base: &'static OptionTemplate) -> Self {
        OptionTemplate {
            options,
            chain: Some(base),
        }
    }
}

//! Widget-record storage: typed slots the engine reads and writes.

use std::fmt;

use larch_graphics::{Anchor, Justify, Relief};
use larch_platform::{
    BitmapHandle, BorderHandle, ColorHandle, CursorHandle, FontHandle, StyleHandle, WindowId,
};
use larch_value::Value;

use crate::decl::{CustomForm, InternalSlot, ValueSlot};
use crate::kinds::TextIndex;

/// Parsed representation of one option, stored in a record's internal slot.
///
/// Every variant wraps an `Option`: `None` is the absent value written when a
/// nullable option is set to the empty string. `Unset` means the slot has
/// never been written (or was torn down).
#[derive(Default)]
pub enum InternalForm {
    #[default]
    Unset,
    Bool(Option<bool>),
    Int(Option<i64>),
    Index(Option<TextIndex>),
    Double(Option<f64>),
    Str(Option<String>),
    Enum(Option<usize>),
    Color(Option<ColorHandle>),
    Font(Option<FontHandle>),
    Style(Option<StyleHandle>),
    Bitmap(Option<BitmapHandle>),
    Border(Option<BorderHandle>),
    Relief(Option<Relief>),
    Cursor(Option<CursorHandle>),
    Justify(Option<Justify>),
    Anchor(Option<Anchor>),
    Pixels(Option<i32>),
    Window(Option<WindowId>),
    Custom(Option<CustomForm>),
}

impl InternalForm {
    pub fn is_unset(&self) -> bool {
        matches!(self, InternalForm::Unset)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InternalForm::Bool(v) => *v,
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            InternalForm::Int(v) => *v,
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<TextIndex> {
        match self {
            InternalForm::Index(v) => *v,
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            InternalForm::Double(v) => *v,
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            InternalForm::Str(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn as_enum_index(&self) -> Option<usize> {
        match self {
            InternalForm::Enum(v) => *v,
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&ColorHandle> {
        match self {
            InternalForm::Color(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_font(&self) -> Option<&FontHandle> {
        match self {
            InternalForm::Font(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_style(&self) -> Option<&StyleHandle> {
        match self {
            InternalForm::Style(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_bitmap(&self) -> Option<&BitmapHandle> {
        match self {
            InternalForm::Bitmap(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_border(&self) -> Option<&BorderHandle> {
        match self {
            InternalForm::Border(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_relief(&self) -> Option<Relief> {
        match self {
            InternalForm::Relief(v) => *v,
            _ => None,
        }
    }

    pub fn as_cursor(&self) -> Option<&CursorHandle> {
        match self {
            InternalForm::Cursor(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_justify(&self) -> Option<Justify> {
        match self {
            InternalForm::Justify(v) => *v,
            _ => None,
        }
    }

    pub fn as_anchor(&self) -> Option<Anchor> {
        match self {
            InternalForm::Anchor(v) => *v,
            _ => None,
        }
    }

    pub fn as_pixels(&self) -> Option<i32> {
        match self {
            InternalForm::Pixels(v) => *v,
            _ => None,
        }
    }

    pub fn as_window(&self) -> Option<WindowId> {
        match self {
            InternalForm::Window(v) => *v,
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomForm> {
        match self {
            InternalForm::Custom(v) => v.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for InternalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalForm::Unset => f.write_str("Unset"),
            InternalForm::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            InternalForm::Int(v) => f.debug_tuple("Int").field(v).finish(),
            InternalForm::Index(v) => f.debug_tuple("Index").field(v).finish(),
            InternalForm::Double(v) => f.debug_tuple("Double").field(v).finish(),
            InternalForm::Str(v) => f.debug_tuple("Str").field(v).finish(),
            InternalForm::Enum(v) => f.debug_tuple("Enum").field(v).finish(),
            InternalForm::Color(v) => f.debug_tuple("Color").field(v).finish(),
            InternalForm::Font(v) => f.debug_tuple("Font").field(v).finish(),
            InternalForm::Style(v) => f.debug_tuple("Style").field(v).finish(),
            InternalForm::Bitmap(v) => f.debug_tuple("Bitmap").field(v).finish(),
            InternalForm::Border(v) => f.debug_tuple("Border").field(v).finish(),
            InternalForm::Relief(v) => f.debug_tuple("Relief").field(v).finish(),
            InternalForm::Cursor(v) => f.debug_tuple("Cursor").field(v).finish(),
            InternalForm::Justify(v) => f.debug_tuple("Justify").field(v).finish(),
            InternalForm::Anchor(v) => f.debug_tuple("Anchor").field(v).finish(),
            InternalForm::Pixels(v) => f.debug_tuple("Pixels").field(v).finish(),
            InternalForm::Window(v) => f.debug_tuple("Window").field(v).finish(),
            InternalForm::Custom(v) => f
                .debug_tuple("Custom")
                .field(&v.as_ref().map(|_| "..."))
                .finish(),
        }
    }
}

/// Storage contract between the engine and a widget record.
///
/// Slot numbers come from the widget's option template. Implementations
/// should panic on an out-of-range slot: that is a template bug, not a
/// runtime condition.
pub trait Configurable {
    fn value_slot(&self, slot: ValueSlot) -> &Option<Value>;
    fn value_slot_mut(&mut self, slot: ValueSlot) -> &mut Option<Value>;
    fn internal_slot(&self, slot: InternalSlot) -> &InternalForm;
    fn internal_slot_mut(&mut self, slot: InternalSlot) -> &mut InternalForm;
}

/// Vector-backed [`Configurable`] for widgets without bespoke record types.
#[derive(Debug, Default)]
pub struct OptionStorage {
    values: Vec<Option<Value>>,
    internals: Vec<InternalForm>,
}

impl OptionStorage {
    pub fn new(value_slots: usize, internal_slots: usize) -> Self {
        let mut values = Vec::new();
        values.resize_with(value_slots, || None);
        let mut internals = Vec::new();
        internals.resize_with(internal_slots, InternalForm::default);
        OptionStorage { values, internals }
    }
}

impl Configurable for OptionStorage {
    fn value_slot(&self, slot: ValueSlot) -> &Option<Value> {
        &self.values[slot.0]
    }

    fn value_slot_mut(&mut self, slot: ValueSlot) -> &mut Option<Value> {
        &mut self.values[slot.0]
    }

    fn internal_slot(&self, slot: InternalSlot) -> &InternalForm {
        &self.internals[slot.0]
    }

    fn internal_slot_mut(&mut self, slot: InternalSlot) -> &mut InternalForm {
        &mut self.internals[slot.0]
    }
}

//! The saved-option log: records overwritten values during a batched
//! configure so a failed batch can be rolled back exactly.

use std::mem;

use larch_platform::Window;
use larch_value::Value;
use smallvec::SmallVec;

use crate::decl::DeclKind;
use crate::engine::free_internal;
use crate::record::{Configurable, InternalForm};
use crate::table::OptionRef;

/// Entries held inline before the log spills to the heap. Batches larger
/// than a widget's whole option set are rare.
pub const SAVE_CHUNK: usize = 20;

pub(crate) struct SavedOption {
    pub(crate) option: OptionRef,
    pub(crate) value: Option<Value>,
    pub(crate) internal: InternalForm,
}

/// Undo log for one batched configure. Entries are appended in application
/// order and consumed in reverse, so a batch that set the same option twice
/// restores the true pre-batch value.
///
/// Each entry owns the displaced value and internal form, and keeps its
/// option's table alive. A log must be either restored or discarded; a log
/// dropped with entries still in it discards them (releasing their
/// resources) and logs the oversight.
pub struct SavedOptions {
    window: Option<Window>,
    items: SmallVec<[SavedOption; SAVE_CHUNK]>,
}

impl SavedOptions {
    /// Starts an empty log. The window is captured now so restore and
    /// discard can release resources even after the batch fails.
    pub fn begin(window: Option<&Window>) -> Self {
        SavedOptions {
            window: window.cloned(),
            items: SmallVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn push(&mut self, item: SavedOption) {
        self.items.push(item);
    }

    /// Puts every saved value back, newest first. The values the batch wrote
    /// are released, saved resource handles move back into the record, and a
    /// restored cursor is re-asserted on the window. Leaves the log empty
    /// and reusable.
    pub fn restore(&mut self, record: &mut dyn Configurable) {
        let window = self.window.clone();
        let window = window.as_ref();
        while let Some(item) = self.items.pop() {
            let compiled = item.option.compiled();
            let decl = compiled.decl;

            if let Some(slot) = decl.internal_slot {
                let current = mem::replace(record.internal_slot_mut(slot), InternalForm::Unset);
                if compiled.needs_freeing {
                    free_internal(compiled, current, window);
                }
                let mut saved = item.internal;
                if let DeclKind::Custom(custom) = decl.kind {
                    if let InternalForm::Custom(Some(form)) = saved {
                        saved = InternalForm::Custom(Some(custom.restore(window, form)));
                    }
                }
                *record.internal_slot_mut(slot) = saved;
                if matches!(decl.kind, DeclKind::Cursor) {
                    if let Some(window) = window {
                        window.define_cursor(record.internal_slot(slot).as_cursor());
                    }
                }
            }
            if let Some(slot) = decl.value_slot {
                *record.value_slot_mut(slot) = item.value;
            }
        }
    }

    /// Keeps the batch's effects and releases what the log holds: saved
    /// resource handles go back to the platform, saved values drop. Leaves
    /// the log empty and reusable.
    pub fn discard(&mut self) {
        let window = self.window.clone();
        let window = window.as_ref();
        while let Some(item) = self.items.pop() {
            let compiled = item.option.compiled();
            if compiled.needs_freeing {
                free_internal(compiled, item.internal, window);
            }
        }
    }
}

impl Drop for SavedOptions {
    fn drop(&mut self) {
        if !self.items.is_empty() {
            log::debug!(
                "saved-option log dropped with {} entries; discarding",
                self.items.len()
            );
            self.discard();
        }
    }
}

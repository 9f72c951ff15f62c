//! The narrow boundary between the Larch option engine and a native
//! windowing backend.
//!
//! The engine never talks to a display directly: it sees a [`Window`]
//! capability handle and two traits. [`WindowSystem`] answers the questions
//! the engine asks about windows (depth, path names, theme database lookups,
//! physical scale) and [`ResourceAllocator`] turns textual specs into opaque,
//! move-only resource handles and releases them again. Real backends live
//! elsewhere; tests use the headless backend from `larch-testing`.

mod error;
mod resources;
mod window;

pub use error::PlatformError;
pub use resources::{
    BitmapHandle, BorderHandle, ColorHandle, CursorHandle, FontHandle, ResourceId, ResourceKind,
    StyleHandle,
};
pub use window::{Platform, ResourceAllocator, Window, WindowId, WindowSystem};

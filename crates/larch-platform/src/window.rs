use std::fmt;
use std::rc::Rc;

use crate::{
    BitmapHandle, BorderHandle, ColorHandle, CursorHandle, FontHandle, PlatformError, StyleHandle,
};

/// Backend-assigned identity of one toolkit window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Windowing questions the option engine asks of a backend.
pub trait WindowSystem {
    /// Color depth of the window's display, in bits per pixel. A depth of 1
    /// selects monochrome option defaults.
    fn depth(&self, window: WindowId) -> u32;

    /// The window's hierarchical path name (e.g. `.app.toolbar.save`).
    fn path_name(&self, window: WindowId) -> String;

    /// Resolves a path name to a window within the same application scope as
    /// `anchor`.
    fn lookup_window(&self, anchor: WindowId, path: &str) -> Option<WindowId>;

    /// Theme/option-database lookup by database name and class.
    fn theme_value(&self, window: WindowId, db_name: &str, db_class: &str) -> Option<String>;

    /// Platform-wide default lookup by the same keys.
    fn system_default(&self, window: WindowId, db_name: &str, db_class: &str) -> Option<String>;

    /// Physical scale of the window's display.
    fn pixels_per_mm(&self, window: WindowId) -> f64;

    /// Asserts the window's active mouse cursor (or resets it for `None`).
    fn define_cursor(&self, window: WindowId, cursor: Option<&CursorHandle>);
}

/// Allocation and release of named platform resources. Every allocation is
/// keyed by a window context and can fail with a descriptive error.
pub trait ResourceAllocator {
    fn alloc_color(&self, window: WindowId, spec: &str) -> Result<ColorHandle, PlatformError>;
    fn free_color(&self, handle: ColorHandle);

    fn alloc_font(&self, window: WindowId, spec: &str) -> Result<FontHandle, PlatformError>;
    fn free_font(&self, handle: FontHandle);

    fn alloc_style(&self, window: WindowId, spec: &str) -> Result<StyleHandle, PlatformError>;
    fn free_style(&self, handle: StyleHandle);

    fn alloc_bitmap(&self, window: WindowId, spec: &str) -> Result<BitmapHandle, PlatformError>;
    fn free_bitmap(&self, handle: BitmapHandle);

    fn alloc_border(&self, window: WindowId, spec: &str) -> Result<BorderHandle, PlatformError>;
    fn free_border(&self, handle: BorderHandle);

    fn alloc_cursor(&self, window: WindowId, spec: &str) -> Result<CursorHandle, PlatformError>;
    fn free_cursor(&self, handle: CursorHandle);
}

/// Everything a backend provides, rolled together.
pub trait Platform: WindowSystem + ResourceAllocator {}

impl<T: WindowSystem + ResourceAllocator> Platform for T {}

/// A capability handle for one toolkit window: the window's identity plus
/// shared access to the backend it lives on. Cheap to clone.
#[derive(Clone)]
pub struct Window {
    id: WindowId,
    platform: Rc<dyn Platform>,
}

impl Window {
    pub fn new(platform: Rc<dyn Platform>, id: WindowId) -> Self {
        Window { id, platform }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn platform(&self) -> &Rc<dyn Platform> {
        &self.platform
    }

    pub fn depth(&self) -> u32 {
        self.platform.depth(self.id)
    }

    /// True on displays too shallow for full color, where monochrome
    /// alternate defaults apply.
    pub fn is_shallow(&self) -> bool {
        self.depth() <= 1
    }

    pub fn path_name(&self) -> String {
        self.platform.path_name(self.id)
    }

    /// Resolves `path` to another window on the same backend.
    pub fn lookup(&self, path: &str) -> Option<Window> {
        let id = self.platform.lookup_window(self.id, path)?;
        Some(Window {
            id,
            platform: Rc::clone(&self.platform),
        })
    }

    pub fn theme_value(&self, db_name: &str, db_class: &str) -> Option<String> {
        self.platform.theme_value(self.id, db_name, db_class)
    }

    pub fn system_default(&self, db_name: &str, db_class: &str) -> Option<String> {
        self.platform.system_default(self.id, db_name, db_class)
    }

    pub fn pixels_per_mm(&self) -> f64 {
        self.platform.pixels_per_mm(self.id)
    }

    pub fn define_cursor(&self, cursor: Option<&CursorHandle>) {
        self.platform.define_cursor(self.id, cursor);
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window").field("id", &self.id).finish()
    }
}

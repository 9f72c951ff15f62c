use std::cell::RefCell;
use std::rc::Rc;

use larch_graphics::Color;
use larch_platform::{
    BitmapHandle, BorderHandle, ColorHandle, CursorHandle, FontHandle, PlatformError,
    ResourceAllocator, ResourceId, ResourceKind, StyleHandle, Window, WindowId, WindowSystem,
};
use rustc_hash::{FxHashMap, FxHashSet};

const BITMAPS: [&str; 10] = [
    "error",
    "gray12",
    "gray25",
    "gray50",
    "gray75",
    "hourglass",
    "info",
    "questhead",
    "question",
    "warning",
];

const CURSORS: [&str; 7] = [
    "arrow",
    "crosshair",
    "fleur",
    "hand2",
    "ibeam",
    "watch",
    "xterm",
];

struct WindowState {
    path: String,
    depth: u32,
    cursor: Option<String>,
}

#[derive(Default)]
struct Ledger {
    allocated: u64,
    freed: u64,
    live: FxHashSet<u64>,
}

impl Ledger {
    fn alloc(&mut self, id: u64) {
        self.allocated += 1;
        self.live.insert(id);
    }

    fn free(&mut self, kind: ResourceKind, id: u64) {
        if !self.live.remove(&id) {
            panic!("double free of {kind:?} resource {id}");
        }
        self.freed += 1;
    }
}

#[derive(Default)]
struct State {
    windows: FxHashMap<WindowId, WindowState>,
    by_path: FxHashMap<String, WindowId>,
    theme: FxHashMap<(String, String), String>,
    system: FxHashMap<(String, String), String>,
    styles: FxHashSet<String>,
    next_id: u64,
    ledgers: FxHashMap<ResourceKind, Ledger>,
}

/// An in-memory platform backend with allocation bookkeeping.
pub struct HeadlessPlatform {
    state: RefCell<State>,
    pixels_per_mm: f64,
}

impl HeadlessPlatform {
    pub fn new() -> Rc<Self> {
        let mut state = State::default();
        state.styles.insert("default".to_string());
        Rc::new(HeadlessPlatform {
            state: RefCell::new(state),
            pixels_per_mm: 4.0, // roughly 100 dpi
        })
    }

    /// Creates a window with the given path name and color depth and returns
    /// a capability handle for it.
    pub fn new_window(self: &Rc<Self>, path: &str, depth: u32) -> Window {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = WindowId(state.next_id);
        state.windows.insert(
            id,
            WindowState {
                path: path.to_string(),
                depth,
                cursor: None,
            },
        );
        state.by_path.insert(path.to_string(), id);
        log::debug!("headless: created window {path} as {id:?}");
        Window::new(Rc::clone(self) as Rc<dyn larch_platform::Platform>, id)
    }

    /// Seeds a theme/option-database entry.
    pub fn set_theme_value(&self, db_name: &str, db_class: &str, value: &str) {
        self.state
            .borrow_mut()
            .theme
            .insert((db_name.to_string(), db_class.to_string()), value.to_string());
    }

    /// Seeds a system-default entry.
    pub fn set_system_default(&self, db_name: &str, db_class: &str, value: &str) {
        self.state
            .borrow_mut()
            .system
            .insert((db_name.to_string(), db_class.to_string()), value.to_string());
    }

    /// Makes a style name allocatable.
    pub fn register_style(&self, name: &str) {
        self.state.borrow_mut().styles.insert(name.to_string());
    }

    /// Name of the cursor most recently asserted on `window`.
    pub fn current_cursor(&self, window: WindowId) -> Option<String> {
        self.state.borrow().windows[&window].cursor.clone()
    }

    /// Number of handles of `kind` allocated and not yet freed.
    pub fn live_count(&self, kind: ResourceKind) -> usize {
        self.state
            .borrow()
            .ledgers
            .get(&kind)
            .map_or(0, |l| l.live.len())
    }

    /// Total allocations of `kind` over the backend's lifetime.
    pub fn alloc_count(&self, kind: ResourceKind) -> u64 {
        self.state
            .borrow()
            .ledgers
            .get(&kind)
            .map_or(0, |l| l.allocated)
    }

    fn next_resource(&self, kind: ResourceKind) -> ResourceId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.ledgers.entry(kind).or_default().alloc(id);
        ResourceId(id)
    }

    fn release(&self, kind: ResourceKind, id: ResourceId) {
        let mut state = self.state.borrow_mut();
        state.ledgers.entry(kind).or_default().free(kind, id.0);
    }
}

impl WindowSystem for HeadlessPlatform {
    fn depth(&self, window: WindowId) -> u32 {
        self.state.borrow().windows[&window].depth
    }

    fn path_name(&self, window: WindowId) -> String {
        self.state.borrow().windows[&window].path.clone()
    }

    fn lookup_window(&self, _anchor: WindowId, path: &str) -> Option<WindowId> {
        self.state.borrow().by_path.get(path).copied()
    }

    fn theme_value(&self, _window: WindowId, db_name: &str, db_class: &str) -> Option<String> {
        self.state
            .borrow()
            .theme
            .get(&(db_name.to_string(), db_class.to_string()))
            .cloned()
    }

    fn system_default(&self, _window: WindowId, db_name: &str, db_class: &str) -> Option<String> {
        self.state
            .borrow()
            .system
            .get(&(db_name.to_string(), db_class.to_string()))
            .cloned()
    }

    fn pixels_per_mm(&self, _window: WindowId) -> f64 {
        self.pixels_per_mm
    }

    fn define_cursor(&self, window: WindowId, cursor: Option<&CursorHandle>) {
        let mut state = self.state.borrow_mut();
        let entry = state.windows.get_mut(&window).expect("unknown window");
        entry.cursor = cursor.map(|c| c.name().to_string());
    }
}

impl ResourceAllocator for HeadlessPlatform {
    fn alloc_color(&self, _window: WindowId, spec: &str) -> Result<ColorHandle, PlatformError> {
        let color = Color::parse(spec)
            .ok_or_else(|| PlatformError::UnknownColor(spec.to_string()))?;
        Ok(ColorHandle::new(
            self.next_resource(ResourceKind::Color),
            spec,
            color,
        ))
    }

    fn free_color(&self, handle: ColorHandle) {
        self.release(ResourceKind::Color, handle.id());
    }

    fn alloc_font(&self, _window: WindowId, spec: &str) -> Result<FontHandle, PlatformError> {
        // "family ?size?" — size defaults to 12.
        let mut parts = spec.split_whitespace();
        let family = parts
            .next()
            .ok_or_else(|| PlatformError::UnknownFont(spec.to_string()))?;
        let size = match parts.next() {
            Some(text) => text
                .parse::<f32>()
                .map_err(|_| PlatformError::UnknownFont(spec.to_string()))?,
            None => 12.0,
        };
        Ok(FontHandle::new(
            self.next_resource(ResourceKind::Font),
            spec,
            family.into(),
            size,
        ))
    }

    fn free_font(&self, handle: FontHandle) {
        self.release(ResourceKind::Font, handle.id());
    }

    fn alloc_style(&self, _window: WindowId, spec: &str) -> Result<StyleHandle, PlatformError> {
        if !self.state.borrow().styles.contains(spec) {
            return Err(PlatformError::UnknownStyle(spec.to_string()));
        }
        Ok(StyleHandle::new(
            self.next_resource(ResourceKind::Style),
            spec,
        ))
    }

    fn free_style(&self, handle: StyleHandle) {
        self.release(ResourceKind::Style, handle.id());
    }

    fn alloc_bitmap(&self, _window: WindowId, spec: &str) -> Result<BitmapHandle, PlatformError> {
        if !BITMAPS.contains(&spec) {
            return Err(PlatformError::UnknownBitmap(spec.to_string()));
        }
        Ok(BitmapHandle::new(
            self.next_resource(ResourceKind::Bitmap),
            spec,
        ))
    }

    fn free_bitmap(&self, handle: BitmapHandle) {
        self.release(ResourceKind::Bitmap, handle.id());
    }

    fn alloc_border(&self, _window: WindowId, spec: &str) -> Result<BorderHandle, PlatformError> {
        let color = Color::parse(spec)
            .ok_or_else(|| PlatformError::UnknownColor(spec.to_string()))?;
        Ok(BorderHandle::new(
            self.next_resource(ResourceKind::Border),
            spec,
            color,
        ))
    }

    fn free_border(&self, handle: BorderHandle) {
        self.release(ResourceKind::Border, handle.id());
    }

    fn alloc_cursor(&self, _window: WindowId, spec: &str) -> Result<CursorHandle, PlatformError> {
        if !CURSORS.contains(&spec) {
            return Err(PlatformError::BadCursor(spec.to_string()));
        }
        Ok(CursorHandle::new(
            self.next_resource(ResourceKind::Cursor),
            spec,
        ))
    }

    fn free_cursor(&self, handle: CursorHandle) {
        self.release(ResourceKind::Cursor, handle.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_balances() {
        let platform = HeadlessPlatform::new();
        let win = platform.new_window(".", 24);
        let handle = platform.alloc_color(win.id(), "red").expect("red exists");
        assert_eq!(platform.live_count(ResourceKind::Color), 1);
        platform.free_color(handle);
        assert_eq!(platform.live_count(ResourceKind::Color), 0);
        assert_eq!(platform.alloc_count(ResourceKind::Color), 1);
    }

    #[test]
    fn bad_color_is_descriptive() {
        let platform = HeadlessPlatform::new();
        let win = platform.new_window(".", 24);
        let err = platform.alloc_color(win.id(), "vermillionish").unwrap_err();
        assert_eq!(err.to_string(), "unknown color name \"vermillionish\"");
    }

    #[test]
    fn window_lookup_by_path() {
        let platform = HeadlessPlatform::new();
        let root = platform.new_window(".", 24);
        let child = platform.new_window(".child", 24);
        assert_eq!(
            root.lookup(".child").map(|w| w.id()),
            Some(child.id())
        );
        assert!(root.lookup(".missing").is_none());
    }

    #[test]
    fn cursor_assertion_recorded() {
        let platform = HeadlessPlatform::new();
        let win = platform.new_window(".", 24);
        let cursor = platform.alloc_cursor(win.id(), "watch").expect("known");
        win.define_cursor(Some(&cursor));
        assert_eq!(platform.current_cursor(win.id()), Some("watch".into()));
        win.define_cursor(None);
        assert_eq!(platform.current_cursor(win.id()), None);
        platform.free_cursor(cursor);
    }
}

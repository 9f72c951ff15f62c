//! Opaque handles for platform resources.
//!
//! A handle is owned by exactly one live slot at a time; handles are
//! deliberately not `Clone`. Each carries the canonical name the platform
//! knows it by, which is what the option engine reports when formatting a
//! stored resource back to text.

use larch_graphics::Color;

/// Backend-assigned identity of one allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u64);

/// The categories of platform resources the allocator manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Color,
    Font,
    Style,
    Bitmap,
    Border,
    Cursor,
}

macro_rules! named_handle {
    ($(#[$doc:meta])* $name:ident { $($field:ident: $ty:ty),* }) => {
        $(#[$doc])*
        #[derive(Debug, PartialEq)]
        pub struct $name {
            id: ResourceId,
            name: Box<str>,
            $($field: $ty,)*
        }

        impl $name {
            pub fn new(id: ResourceId, name: impl Into<String>, $($field: $ty),*) -> Self {
                Self { id, name: name.into().into_boxed_str(), $($field),* }
            }

            pub fn id(&self) -> ResourceId {
                self.id
            }

            /// The platform's canonical name for this resource.
            pub fn name(&self) -> &str {
                &self.name
            }

            $(pub fn $field(&self) -> &$ty {
                &self.$field
            })*
        }
    };
}

named_handle!(
    /// An allocated screen color.
    ColorHandle { color: Color }
);

named_handle!(
    /// An allocated font.
    FontHandle { family: Box<str>, size: f32 }
);

named_handle!(
    /// A named widget style.
    StyleHandle {}
);

named_handle!(
    /// A named stipple/icon bitmap.
    BitmapHandle {}
);

named_handle!(
    /// A 3D border drawn from a base color.
    BorderHandle { color: Color }
);

named_handle!(
    /// A named mouse cursor.
    CursorHandle {}
);

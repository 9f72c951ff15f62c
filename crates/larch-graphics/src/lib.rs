//! Pure data types shared across the Larch toolkit: colors, alignment and
//! relief enumerations, and physical screen-distance units. No rendering
//! lives here.

mod alignment;
mod color;
mod relief;
mod unit;

pub use alignment::{Anchor, Justify};
pub use color::Color;
pub use relief::Relief;
pub use unit::ScreenUnit;

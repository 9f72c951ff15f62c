/// 3D border appearance of a widget edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relief {
    Flat,
    Groove,
    Raised,
    Ridge,
    Solid,
    Sunken,
}

impl Relief {
    /// Canonical names, in the order used for index-based lookup.
    pub const NAMES: [&'static str; 6] = ["flat", "groove", "raised", "ridge", "solid", "sunken"];

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    pub fn from_index(index: usize) -> Option<Relief> {
        use Relief::*;
        [Flat, Groove, Raised, Ridge, Solid, Sunken].get(index).copied()
    }
}

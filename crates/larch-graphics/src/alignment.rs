//! Text justification and widget anchoring

/// How multi-line text lines up within its bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
    Center,
}

impl Justify {
    pub const NAMES: [&'static str; 3] = ["left", "right", "center"];

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    pub fn from_index(index: usize) -> Option<Justify> {
        use Justify::*;
        [Left, Right, Center].get(index).copied()
    }
}

/// Compass-point anchoring of content within its allocated space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
    Center,
}

impl Anchor {
    pub const NAMES: [&'static str; 9] =
        ["n", "ne", "e", "se", "s", "sw", "w", "nw", "center"];

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    pub fn from_index(index: usize) -> Option<Anchor> {
        use Anchor::*;
        [N, Ne, E, Se, S, Sw, W, Nw, Center].get(index).copied()
    }
}

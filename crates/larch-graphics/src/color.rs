//! Color representation and text-form parsing

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        )
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    /// Parses a textual color spec: a well-known name, `#rgb`, `#rrggbb`, or
    /// `#rrrrggggbbbb`.
    pub fn parse(spec: &str) -> Option<Color> {
        let spec = spec.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = spec.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
    }

    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
}

fn parse_hex(hex: &str) -> Option<Color> {
    let per_channel = match hex.len() {
        3 => 1,
        6 => 2,
        12 => 4,
        _ => return None,
    };
    let max = (16f32).powi(per_channel as i32) - 1.0;
    let mut channels = [0.0f32; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let digits = &hex[i * per_channel..(i + 1) * per_channel];
        *channel = u32::from_str_radix(digits, 16).ok()? as f32 / max;
    }
    Some(Color(channels[0], channels[1], channels[2], 1.0))
}

const NAMED: [(&str, Color); 22] = [
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("green", Color::from_rgb_u8(0, 128, 0)),
    ("lime", Color::GREEN),
    ("blue", Color::BLUE),
    ("yellow", Color::from_rgb_u8(255, 255, 0)),
    ("cyan", Color::from_rgb_u8(0, 255, 255)),
    ("magenta", Color::from_rgb_u8(255, 0, 255)),
    ("orange", Color::from_rgb_u8(255, 165, 0)),
    ("purple", Color::from_rgb_u8(128, 0, 128)),
    ("brown", Color::from_rgb_u8(165, 42, 42)),
    ("pink", Color::from_rgb_u8(255, 192, 203)),
    ("navy", Color::from_rgb_u8(0, 0, 128)),
    ("gray", Color::from_rgb_u8(128, 128, 128)),
    ("grey", Color::from_rgb_u8(128, 128, 128)),
    ("gray25", Color::from_rgb_u8(64, 64, 64)),
    ("gray50", Color::from_rgb_u8(128, 128, 128)),
    ("gray75", Color::from_rgb_u8(191, 191, 191)),
    ("lightgray", Color::from_rgb_u8(211, 211, 211)),
    ("darkgray", Color::from_rgb_u8(169, 169, 169)),
    ("silver", Color::from_rgb_u8(192, 192, 192)),
];

//! Physical screen-distance units

/// Unit suffix accepted on screen-distance text forms.
///
/// A bare number is in pixels; the suffixed forms are physical distances
/// converted through the display's pixels-per-millimeter ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenUnit {
    Millimeters,
    Centimeters,
    Inches,
    Points,
}

impl ScreenUnit {
    /// The suffix character that selects this unit.
    pub fn from_suffix(suffix: char) -> Option<ScreenUnit> {
        match suffix {
            'm' => Some(ScreenUnit::Millimeters),
            'c' => Some(ScreenUnit::Centimeters),
            'i' => Some(ScreenUnit::Inches),
            'p' => Some(ScreenUnit::Points),
            _ => None,
        }
    }

    /// Millimeters per one unit of this kind. Points are 1/72 inch.
    pub fn millimeters(self) -> f64 {
        match self {
            ScreenUnit::Millimeters => 1.0,
            ScreenUnit::Centimeters => 10.0,
            ScreenUnit::Inches => 25.4,
            ScreenUnit::Points => 25.4 / 72.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScreenUnit;

    #[test]
    fn suffix_mapping() {
        assert_eq!(ScreenUnit::from_suffix('i'), Some(ScreenUnit::Inches));
        assert_eq!(ScreenUnit::from_suffix('x'), None);
    }

    #[test]
    fn point_is_a_seventy_second_of_an_inch() {
        let pt = ScreenUnit::Points.millimeters();
        assert!((pt * 72.0 - 25.4).abs() < 1e-9);
    }
}

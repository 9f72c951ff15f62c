//! Parsing helpers for the per-kind behaviors that need more than a
//! straight `str::parse`: text indices, screen distances, and closed
//! value domains with abbreviation.

use larch_platform::Window;

/// A position in indexable widget content, relative to the start or end.
///
/// Encoded in a single `i32`: values `>= 0` count from the start, `-1` is
/// `end`, values below `-1` are `end-N`, and `i32::MAX` is the
/// one-past-the-end marker `end+1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextIndex(i32);

impl TextIndex {
    pub const END: TextIndex = TextIndex(-1);
    pub const PAST_END: TextIndex = TextIndex(i32::MAX);

    pub fn from_start(offset: i32) -> Option<TextIndex> {
        (offset >= 0).then_some(TextIndex(offset))
    }

    pub fn raw(self) -> i32 {
        self.0
    }

    /// Parse `integer`, `integer+integer`, `integer-integer`, `end`,
    /// `end+integer`, or `end-integer`. Indices that work out negative are
    /// rejected; out-of-range offsets clamp to the nearest representable
    /// index.
    pub fn parse(text: &str) -> Option<TextIndex> {
        let t = text.trim();
        if t.is_empty() {
            return None;
        }
        if let Some(rest) = t.strip_prefix("end") {
            if rest.is_empty() {
                return Some(TextIndex::END);
            }
            let (sign, digits) = match rest.as_bytes()[0] {
                b'+' => (1i64, &rest[1..]),
                b'-' => (-1i64, &rest[1..]),
                _ => return None,
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let offset = sign * digits.parse::<i64>().unwrap_or(i64::MAX);
            return Some(if offset >= 1 {
                TextIndex::PAST_END
            } else if offset == 0 {
                TextIndex::END
            } else {
                // end-N encodes as -1 - N
                let encoded = (-1i64).saturating_add(offset);
                TextIndex(encoded.clamp(i32::MIN as i64, -2) as i32)
            });
        }
        // arithmetic spellings: the operator can't be the leading sign
        if let Some(pos) = t[1..].find(['+', '-']).map(|p| p + 1) {
            let lhs = t[..pos].trim_end().parse::<i64>().ok()?;
            let rhs = t[pos + 1..].trim_start().parse::<i64>().ok()?;
            let n = if t.as_bytes()[pos] == b'+' {
                lhs.saturating_add(rhs)
            } else {
                lhs.saturating_sub(rhs)
            };
            if n < 0 {
                return None;
            }
            return Some(TextIndex(n.min(i32::MAX as i64) as i32));
        }
        let n = t.parse::<i64>().ok()?;
        if n < 0 {
            return None;
        }
        Some(TextIndex(n.min(i32::MAX as i64) as i32))
    }

    pub fn format(self) -> String {
        match self.0 {
            i32::MAX => "end+1".to_string(),
            -1 => "end".to_string(),
            v if v < -1 => format!("end{}", v + 1),
            v => v.to_string(),
        }
    }
}

pub(crate) enum DistanceError {
    Malformed,
    WindowRequired,
}

/// Parse a screen distance into pixels. Bare integers and floats are taken
/// as pixels; the suffixes `m`, `c`, `i`, and `p` select millimeters,
/// centimeters, inches, and printer's points, which need a window to supply
/// the pixel density.
pub(crate) fn parse_distance(
    text: &str,
    window: Option<&Window>,
) -> Result<i32, DistanceError> {
    let t = text.trim();
    if let Ok(n) = t.parse::<i64>() {
        return Ok(n.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    }
    if let Ok(d) = t.parse::<f64>() {
        if d.is_finite() {
            return Ok(round_away(d));
        }
        return Err(DistanceError::Malformed);
    }
    let Some(last) = t.chars().last() else {
        return Err(DistanceError::Malformed);
    };
    let Some(unit) = larch_graphics::ScreenUnit::from_suffix(last) else {
        return Err(DistanceError::Malformed);
    };
    let number = t[..t.len() - last.len_utf8()].trim_end();
    let Ok(d) = number.parse::<f64>() else {
        return Err(DistanceError::Malformed);
    };
    if !d.is_finite() {
        return Err(DistanceError::Malformed);
    }
    let Some(window) = window else {
        return Err(DistanceError::WindowRequired);
    };
    Ok(round_away(d * unit.millimeters() * window.pixels_per_mm()))
}

// Rounds half away from zero, like the rendering layer does for distances.
fn round_away(d: f64) -> i32 {
    if d < 0.0 {
        (d - 0.5) as i32
    } else {
        (d + 0.5) as i32
    }
}

pub(crate) enum DomainError {
    NoMatch,
    Ambiguous,
}

/// Match `value` against a closed domain of names, accepting any unambiguous
/// abbreviation. Exact matches win outright.
pub(crate) fn match_domain(value: &str, names: &[&str]) -> Result<usize, DomainError> {
    let mut found: Option<usize> = None;
    for (i, name) in names.iter().enumerate() {
        if *name == value {
            return Ok(i);
        }
        if name.len() > value.len() && name.starts_with(value) {
            if found.is_some() {
                return Err(DomainError::Ambiguous);
            }
            found = Some(i);
        }
    }
    found.ok_or(DomainError::NoMatch)
}

/// Build the standard bad-domain message:
/// `bad relief "x": must be flat, groove, raised, ridge, solid, or sunken`.
/// When `null_ok` is set, `""` joins the list of alternatives.
pub(crate) fn bad_domain(what: &str, value: &str, names: &[&str], null_ok: bool) -> String {
    let mut alternatives: Vec<&str> = names.to_vec();
    if null_ok {
        alternatives.push("\"\"");
    }
    let list = match alternatives.len() {
        0 => String::new(),
        1 => alternatives[0].to_string(),
        2 => format!("{} or {}", alternatives[0], alternatives[1]),
        n => {
            let mut out = alternatives[..n - 1].join(", ");
            out.push_str(", or ");
            out.push_str(alternatives[n - 1]);
            out
        }
    };
    format!("bad {what} \"{value}\": must be {list}")
}

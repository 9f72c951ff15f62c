use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::cache::{ParsedDouble, ParsedInt};
use crate::list::split_list;
use crate::ValueCache;

/// An immutable, reference-counted string value.
///
/// Cloning a `Value` copies the handle, not the text; the clone shares the
/// text and the cache slot with the original. [`Value::duplicate`] produces a
/// genuinely independent copy whose cache payload has been deep-copied via
/// [`ValueCache::duplicate`].
pub struct Value(Rc<Inner>);

struct Inner {
    text: Box<str>,
    cache: RefCell<Option<Box<dyn ValueCache>>>,
}

impl Value {
    pub fn new(text: impl Into<String>) -> Self {
        Value(Rc::new(Inner {
            text: text.into().into_boxed_str(),
            cache: RefCell::new(None),
        }))
    }

    pub fn empty() -> Self {
        Value::new("")
    }

    pub fn as_str(&self) -> &str {
        &self.0.text
    }

    pub fn is_empty(&self) -> bool {
        self.0.text.is_empty()
    }

    /// Number of live handles to this value. Exposed for diagnostics and
    /// lifetime tests.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Creates an independent copy of this value. The text is copied and the
    /// cache payload, if any, is duplicated onto the new owner.
    pub fn duplicate(&self) -> Value {
        let dup = self.0.cache.borrow().as_ref().map(|c| c.duplicate());
        Value(Rc::new(Inner {
            text: self.0.text.clone(),
            cache: RefCell::new(dup),
        }))
    }

    /// Installs a cache payload, dropping whatever occupied the slot before.
    pub fn attach_cache(&self, cache: Box<dyn ValueCache>) {
        *self.0.cache.borrow_mut() = Some(cache);
    }

    /// Runs `f` against the cached payload if the slot currently holds a `T`.
    pub fn with_cache<T: ValueCache, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.0.cache.borrow();
        let payload = guard.as_ref()?.as_any().downcast_ref::<T>()?;
        Some(f(payload))
    }

    /// Removes and returns the cache payload, leaving the slot empty.
    pub fn take_cache(&self) -> Option<Box<dyn ValueCache>> {
        self.0.cache.borrow_mut().take()
    }

    /// Parses the text as a boolean. Accepts `0`/`1` and unique
    /// case-insensitive prefixes of `true`, `false`, `yes`, `no`, `on`, `off`.
    pub fn as_bool(&self) -> Option<bool> {
        parse_bool(self.as_str())
    }

    /// Parses the text as a signed integer, caching the result.
    pub fn as_i64(&self) -> Option<i64> {
        if let Some(n) = self.with_cache(|c: &ParsedInt| c.0) {
            return Some(n);
        }
        let n = parse_i64(self.as_str())?;
        self.attach_cache(Box::new(ParsedInt(n)));
        Some(n)
    }

    /// Parses the text as a floating-point number, caching the result.
    pub fn as_f64(&self) -> Option<f64> {
        if let Some(d) = self.with_cache(|c: &ParsedDouble| c.0) {
            return Some(d);
        }
        let d: f64 = self.as_str().trim().parse().ok()?;
        self.attach_cache(Box::new(ParsedDouble(d)));
        Some(d)
    }

    /// Decomposes the text into list elements: whitespace separates elements
    /// and braces group them. Returns `None` on unbalanced braces.
    pub fn as_list(&self) -> Option<Vec<String>> {
        split_list(self.as_str())
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Value(Rc::clone(&self.0))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({:?})", self.as_str())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.as_str() == other.as_str()
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::new(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::new(text)
    }
}

fn parse_i64(text: &str) -> Option<i64> {
    let t = text.trim();
    let t = t.strip_prefix('+').unwrap_or(t);
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    t.parse().ok()
}

const BOOL_WORDS: [(&str, bool); 6] = [
    ("true", true),
    ("false", false),
    ("yes", true),
    ("no", false),
    ("on", true),
    ("off", false),
];

fn parse_bool(text: &str) -> Option<bool> {
    let t = text.trim().to_ascii_lowercase();
    if t == "0" {
        return Some(false);
    }
    if t == "1" {
        return Some(true);
    }
    if t.is_empty() {
        return None;
    }
    let mut found: Option<bool> = None;
    for (word, val) in BOOL_WORDS {
        if word.starts_with(&t) {
            match found {
                Some(prev) if prev != val => return None, // ambiguous ("o")
                _ => found = Some(val),
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Marker(u32);

    impl ValueCache for Marker {
        fn duplicate(&self) -> Box<dyn ValueCache> {
            Box::new(Marker(self.0))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn clone_shares_text_and_handle_count() {
        let v = Value::new("hello");
        let w = v.clone();
        assert!(v.ptr_eq(&w));
        assert_eq!(v.handle_count(), 2);
    }

    #[test]
    fn cache_roundtrip_and_eviction() {
        let v = Value::new("12");
        v.attach_cache(Box::new(Marker(7)));
        assert_eq!(v.with_cache(|m: &Marker| m.0), Some(7));

        // A numeric conversion repurposes the slot.
        assert_eq!(v.as_i64(), Some(12));
        assert_eq!(v.with_cache(|m: &Marker| m.0), None);
    }

    #[test]
    fn duplicate_deep_copies_cache() {
        let v = Value::new("x");
        v.attach_cache(Box::new(Marker(3)));
        let d = v.duplicate();
        assert!(!v.ptr_eq(&d));
        assert_eq!(d.with_cache(|m: &Marker| m.0), Some(3));

        // Evicting the original's cache leaves the duplicate intact.
        v.take_cache();
        assert_eq!(d.with_cache(|m: &Marker| m.0), Some(3));
    }

    #[test]
    fn boolean_forms() {
        assert_eq!(Value::new("tr").as_bool(), Some(true));
        assert_eq!(Value::new("NO").as_bool(), Some(false));
        assert_eq!(Value::new("1").as_bool(), Some(true));
        assert_eq!(Value::new("o").as_bool(), None); // on vs off
        assert_eq!(Value::new("maybe").as_bool(), None);
    }

    #[test]
    fn integer_forms() {
        assert_eq!(Value::new(" 42 ").as_i64(), Some(42));
        assert_eq!(Value::new("-7").as_i64(), Some(-7));
        assert_eq!(Value::new("0x10").as_i64(), Some(16));
        assert_eq!(Value::new("4.5").as_i64(), None);
    }

    #[test]
    fn list_decomposition() {
        assert_eq!(
            Value::new("a {b c} d").as_list(),
            Some(vec!["a".into(), "b c".into(), "d".into()])
        );
        assert_eq!(Value::new("{unbalanced").as_list(), None);
    }
}

use std::any::Any;

/// A parsed representation cached inside a [`Value`](crate::Value).
///
/// One payload occupies the Value's single cache slot at a time. Attaching a
/// new payload drops the old one, which is how unrelated conversions
/// invalidate each other. Payloads that co-own other structures (tables,
/// resources) release them from their `Drop` impl.
pub trait ValueCache: Any {
    /// Deep-copies the payload for a duplicated Value. The copy must co-own
    /// whatever the original co-owns, never share mutable state with it.
    fn duplicate(&self) -> Box<dyn ValueCache>;

    fn as_any(&self) -> &dyn Any;
}

/// Cached result of a numeric conversion.
pub(crate) struct ParsedInt(pub(crate) i64);

impl ValueCache for ParsedInt {
    fn duplicate(&self) -> Box<dyn ValueCache> {
        Box::new(ParsedInt(self.0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) struct ParsedDouble(pub(crate) f64);

impl ValueCache for ParsedDouble {
    fn duplicate(&self) -> Box<dyn ValueCache> {
        Box::new(ParsedDouble(self.0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

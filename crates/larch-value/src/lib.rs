//! Reference-counted string values for the Larch toolkit.
//!
//! A [`Value`] is an immutable piece of text shared by handle. Alongside the
//! text it carries one *side-cache* slot holding an arbitrary parsed
//! representation of that text ("shimmering"): converting a Value to a number
//! caches the number, looking an option name up in a table caches the
//! resolution, and attaching a new cache evicts whatever was there before.
//! `Value` is a closed concrete type; cache payloads plug in through the
//! [`ValueCache`] trait rather than by extending the type itself.

mod cache;
mod list;
mod value;

pub use cache::ValueCache;
pub use value::Value;

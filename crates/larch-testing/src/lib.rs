//! Headless platform backend for exercising the Larch option engine.
//!
//! [`HeadlessPlatform`] implements the full `larch-platform` boundary with no
//! display attached: windows are entries in a path-keyed map, the option
//! database is seedable from tests, and every resource allocation goes
//! through a per-kind ledger so tests can assert that allocs and frees
//! balance (double frees panic immediately).

mod headless;

pub use headless::HeadlessPlatform;

//! Item catalog backend library.
//!
//! Layout follows ports and adapters: [`domain`] holds records, rules and
//! ports; [`outbound`] implements the driven ports; [`inbound`] exposes the
//! HTTP surface.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;

//! Request middleware.
//!
//! Request lifecycle concerns that sit outside individual handlers, currently
//! trace identifier propagation.

pub mod trace;

pub use trace::Trace;

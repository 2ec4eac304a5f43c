//! oceanq — constraint-to-query compilation for oceanographic measurements
//!
//! This is the public meta-crate. Downstream users depend on **oceanq**
//! only.
//!
//! It re-exports the stable API from `oceanq-core` and adds
//! [`QuerySession`], the one-stop per-request handle the web, map, and
//! plotting layers drive.

mod session;

#[cfg(test)]
mod tests;

pub use oceanq_core as core;
pub use session::QuerySession;

//
// Prelude
//

pub mod prelude {
    pub use crate::session::QuerySession;
    pub use oceanq_core::prelude::*;
}

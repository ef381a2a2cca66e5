//! # SLB API
//!
//! Remote call layer for the SoftLayer load balancer manager.
//! Every operation is a named method on a named remote service; the
//! [`Transport`] trait is the seam that carries those calls.

pub mod client;
pub mod errors;
pub mod transport;

// Re-export common types for convenience
pub use client::*;
pub use errors::*;
pub use transport::*;

// Re-export core types that API consumers will need
pub use slb_core::{ObjectFilter, ObjectMask, RemoteService};

//! # SLB Core
//!
//! Core domain types for managing SoftLayer local load balancers.
//!
//! This crate contains pure data shaping with no I/O dependencies:
//! - Typed models for load balancers, virtual servers, service groups and services
//! - Object filter and object mask builders
//! - The remote service catalog
//! - Product order payloads
//! - Optional-field edits applied to fetched snapshots
//! - `Nullable`, which keeps explicit nulls when a snapshot is submitted back

pub mod edits;
pub mod errors;
pub mod filter;
pub mod mask;
pub mod models;
pub mod nullable;
pub mod order;
pub mod services;

// Re-export commonly used types
pub use edits::{NewService, NewServiceGroup, ServiceEdit, ServiceGroupEdit};
pub use errors::{CoreError, Result};
pub use filter::{FilterOp, ObjectFilter};
pub use mask::{MaskNode, ObjectMask};
pub use models::{
    BillingItem, CatalogEntry, Datacenter, GroupReference, Hardware, HealthCheck, IpAddress,
    LoadBalancer, PackageItem, Service, ServiceGroup, VirtualServer,
};
pub use nullable::Nullable;
pub use order::{LocationId, PriceRef, ProductOrder};
pub use services::RemoteService;

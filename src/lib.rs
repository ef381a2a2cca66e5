//! # softlayer-lb
//!
//! Manage SoftLayer local load balancers: list and order them, and edit
//! their virtual servers, service groups and services.
//!
//! ```no_run
//! use softlayer_lb::{Config, LoadBalancerManager, ServiceEdit};
//!
//! # async fn run() -> softlayer_lb::Result<()> {
//! let manager = LoadBalancerManager::from_config(&Config::new()?)?;
//! for lb in manager.get_local_lbs().await? {
//!     println!("{:?} {:?}", lb.id, lb.ip_address.get().and_then(|ip| ip.ip_address.get()));
//! }
//!
//! let edit = ServiceEdit {
//!     port: Some(8080),
//!     ..Default::default()
//! };
//! manager.edit_service(12345, 678, &edit).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod manager;

// Re-export main public types
pub use config::Config;
pub use errors::{ConfigError, LbError, Result};
pub use manager::LoadBalancerManager;

// Re-export for callers building requests
pub use slb_api::{CallRequest, RestTransport, Transport};
pub use slb_core::{
    FilterOp, LocationId, NewService, NewServiceGroup, ObjectFilter, ObjectMask, ServiceEdit,
    ServiceGroupEdit,
};

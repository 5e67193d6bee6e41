//! route53-shift core library
//!
//! Record matching and batched mutation for moving DNS traffic between
//! load-balancer endpoints:
//! - Name normalization for DNS name comparison
//! - Paginated record fetching
//! - Change building (repoint alias targets, set weighted-routing weights)
//! - Batch submission with per-batch failure isolation
//! - Run coordination across configured zones
//!
//! The control plane is abstracted behind
//! [`DnsControlPlane`](route53_shift_provider::DnsControlPlane), so everything here
//! runs against any implementation, including in-memory ones in tests.

pub mod config;
pub mod error;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{RunConfig, ZoneConfig};
pub use error::{CoreError, CoreResult};
pub use services::{RunCoordinator, RunOptions};

//! # route53-shift-provider
//!
//! A DNS control-plane abstraction for bulk record migration, with an
//! implementation for AWS Route 53.
//!
//! The [`DnsControlPlane`] trait exposes the two capabilities a migration needs:
//! paging through every record set of a hosted zone, and applying a batch of
//! changes atomically.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use route53_shift_provider::{create_control_plane, AwsCredentials, DnsControlPlane};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = AwsCredentials::from_env().ok_or("AWS credentials not set")?;
//!     let control_plane = create_control_plane(credentials)?;
//!
//!     // Walk every page of the zone
//!     let mut cursor = None;
//!     loop {
//!         let page = control_plane
//!             .list_records("Z0123456789ABC", cursor.as_ref(), 300)
//!             .await?;
//!         for record in &page.records {
//!             println!("{} {} weight={:?}", record.name, record.record_type, record.weight);
//!         }
//!         match page.next {
//!             Some(next) => cursor = Some(next),
//!             None => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//!
//! - [`ProviderError::InvalidCredentials`] / [`ProviderError::PermissionDenied`]: authorization failed
//! - [`ProviderError::ZoneNotFound`]: hosted zone does not exist
//! - [`ProviderError::InvalidChangeBatch`]: the control plane rejected a batch
//! - [`ProviderError::RateLimited`]: throttled (retryable)
//! - [`ProviderError::NetworkError`]: network connectivity issue (retryable)
//!
//! Transient errors on listing are retried with exponential backoff. Change
//! batches are sent exactly once.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory function
pub use factory::create_control_plane;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsControlPlane;

// Re-export types
pub use types::{
    AliasTarget, AwsCredentials, Change, ChangeAction, ChangeInfo, CidrRoutingConfig,
    ControlPlaneLimits, GeoLocation, GeoProximityLocation, RecordCursor, RecordPage, RecordSet,
};

// Re-export concrete control planes
pub use providers::{Route53Provider, Route53ProviderBuilder};

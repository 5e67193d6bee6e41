//! Control-plane factory function.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::Route53Provider;
use crate::traits::DnsControlPlane;
use crate::types::AwsCredentials;

/// Creates a [`DnsControlPlane`] for Route 53 from the given credentials.
///
/// The returned control plane is wrapped in `Arc<dyn DnsControlPlane>` for easy
/// sharing across async tasks. Use [`Route53Provider::builder`] to override the
/// endpoint or retry count.
///
/// # Examples
///
/// ```rust,no_run
/// use route53_shift_provider::{create_control_plane, AwsCredentials};
///
/// let credentials = AwsCredentials::from_env().expect("AWS credentials not set");
/// let control_plane = create_control_plane(credentials).unwrap();
/// assert_eq!(control_plane.id(), "route53");
/// ```
pub fn create_control_plane(credentials: AwsCredentials) -> Result<Arc<dyn DnsControlPlane>> {
    Ok(Arc::new(Route53Provider::builder(credentials).build()?))
}

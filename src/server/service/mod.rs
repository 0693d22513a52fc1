//! Monitoring services.
//!
//! - `probe` - Protocol probes behind the `StatusProbe` trait
//! - `debounce` - Flap debouncing of probe failures
//! - `diff` - Field-level record comparison
//! - `proxy` - Refresh of the two network proxies
//! - `network_status` - The fleet polling cycle
//! - `notification` - Message rendering and fire-and-forget delivery

pub mod debounce;
pub mod diff;
pub mod network_status;
pub mod notification;
pub mod probe;
pub mod proxy;

#[cfg(test)]
pub(crate) mod testing;

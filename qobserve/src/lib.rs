//! Production-friendly observability hooks for chat turns, gateway dispatches, and uploads.
//!
//! ```rust
//! use qobserve::{MetricsObservabilityHooks, SafeSessionHooks, TracingObservabilityHooks};
//!
//! let _hooks = SafeSessionHooks::new((TracingObservabilityHooks, MetricsObservabilityHooks));
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeSessionHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{MetricsObservabilityHooks, SafeSessionHooks, TracingObservabilityHooks};
}

#[cfg(test)]
mod tests;

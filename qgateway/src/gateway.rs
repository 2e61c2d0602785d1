//! Collaborator contracts for the processing gateway and the notebook directory.
//!
//! ```rust
//! use qgateway::{
//!     BackendGateway, GatewayError, GatewayFuture, GatewayRequest, GatewayResponse, Route,
//! };
//!
//! struct EchoGateway;
//!
//! impl BackendGateway for EchoGateway {
//!     fn send<'a>(
//!         &'a self,
//!         request: GatewayRequest,
//!     ) -> GatewayFuture<'a, Result<GatewayResponse, GatewayError>> {
//!         Box::pin(async move {
//!             request.validate()?;
//!             Ok(GatewayResponse::new(request.text.unwrap_or_default(), Route::unrouted()))
//!         })
//!     }
//! }
//!
//! let _gateway: &dyn BackendGateway = &EchoGateway;
//! ```

use qcommon::BoxFuture;

use crate::{GatewayError, GatewayRequest, GatewayResponse, NotebookSections};

pub type GatewayFuture<'a, T> = BoxFuture<'a, T>;

/// Processes one (text, file, mode, destination) unit and reports where it was filed.
///
/// Implementations must report an unreachable gateway as [`GatewayErrorKind::Network`] or
/// [`GatewayErrorKind::Timeout`] and a structured error payload as
/// [`GatewayErrorKind::Rejected`].
///
/// [`GatewayErrorKind::Network`]: crate::GatewayErrorKind::Network
/// [`GatewayErrorKind::Timeout`]: crate::GatewayErrorKind::Timeout
/// [`GatewayErrorKind::Rejected`]: crate::GatewayErrorKind::Rejected
pub trait BackendGateway: Send + Sync {
    fn send<'a>(
        &'a self,
        request: GatewayRequest,
    ) -> GatewayFuture<'a, Result<GatewayResponse, GatewayError>>;
}

/// Lists the notebooks and sections content can be filed into.
pub trait NotebookDirectory: Send + Sync {
    fn list_notebooks<'a>(&'a self)
    -> GatewayFuture<'a, Result<Vec<NotebookSections>, GatewayError>>;
}

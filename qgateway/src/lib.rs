//! Backend gateway contract: the request/response model, error taxonomy, collaborator traits,
//! and payload decoding helpers shared by gateway implementations.

mod error;
mod gateway;
mod model;
mod payload;

pub mod prelude;

pub use error::{GatewayError, GatewayErrorKind};
pub use gateway::{BackendGateway, GatewayFuture, NotebookDirectory};
pub use model::{FileRef, GatewayMode, GatewayRequest, GatewayResponse, NotebookSections, Route};
pub use payload::{decode_notebooks, decode_response, error_from_status, extract_error_message};

//! Common imports for gateway implementations and callers.

pub use crate::{
    BackendGateway, FileRef, GatewayError, GatewayErrorKind, GatewayFuture, GatewayMode,
    GatewayRequest, GatewayResponse, NotebookDirectory, NotebookSections, Route,
};

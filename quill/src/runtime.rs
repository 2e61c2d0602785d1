//! Runtime wiring helpers for chat sessions.

use std::sync::Arc;

use crate::{
    BackendGateway, ChatPolicy, ChatService, DestinationCatalog, GatewayError,
    MetricsObservabilityHooks, NotebookDirectory, SafeSessionHooks, TracingObservabilityHooks,
};

/// A chat session plus the notebook catalog that feeds its destination picker.
#[derive(Clone)]
pub struct SessionBundle {
    pub chat: ChatService,
    pub catalog: Arc<DestinationCatalog>,
}

impl SessionBundle {
    /// Loads the notebook listing; the chat itself is usable without it.
    pub async fn refresh_catalog(&self) -> Result<usize, GatewayError> {
        self.catalog.refresh().await
    }

    /// Sets the destination only when the catalog knows the pair.
    pub fn select_destination(&self, notebook: &str, section: &str) -> bool {
        if !self.catalog.contains(notebook, section) {
            return false;
        }

        self.chat.set_destination(notebook, section);
        true
    }
}

pub fn chat_service(gateway: Arc<dyn BackendGateway>) -> ChatService {
    ChatService::builder(gateway).build()
}

pub fn chat_service_with_policy(
    gateway: Arc<dyn BackendGateway>,
    policy: ChatPolicy,
) -> ChatService {
    ChatService::builder(gateway).policy(policy).build()
}

/// Chat service reporting through `tracing` and `metrics`, shielded from observer panics.
pub fn observed_chat_service(gateway: Arc<dyn BackendGateway>) -> ChatService {
    ChatService::builder(gateway)
        .hooks(Arc::new(SafeSessionHooks::new((
            TracingObservabilityHooks,
            MetricsObservabilityHooks,
        ))))
        .build()
}

pub fn build_session<G>(gateway: Arc<G>) -> SessionBundle
where
    G: BackendGateway + NotebookDirectory + 'static,
{
    build_session_with(gateway.clone(), gateway, ChatPolicy::default())
}

pub fn build_session_with(
    gateway: Arc<dyn BackendGateway>,
    directory: Arc<dyn NotebookDirectory>,
    policy: ChatPolicy,
) -> SessionBundle {
    SessionBundle {
        chat: ChatService::builder(gateway)
            .policy(policy)
            .hooks(Arc::new(SafeSessionHooks::new((
                TracingObservabilityHooks,
                MetricsObservabilityHooks,
            ))))
            .build(),
        catalog: Arc::new(DestinationCatalog::new(directory)),
    }
}

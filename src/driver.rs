//! Executes [`UpdateAction`]s off the UI loop.
//!
//! Every network request runs in its own tokio task and reports back with
//! exactly one [`Message`] on the shared queue. Tasks own a snapshot of
//! their inputs and never touch the application state.

use crate::aws::ClientConnector;
use crate::message::Message;
use crate::update::UpdateAction;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub struct Driver {
    tx: UnboundedSender<Message>,
    connector: Arc<dyn ClientConnector>,
}

impl Driver {
    pub fn new(tx: UnboundedSender<Message>, connector: Arc<dyn ClientConnector>) -> Self {
        Self { tx, connector }
    }

    pub fn dispatch(&self, action: UpdateAction) {
        match action {
            UpdateAction::ConnectClient {
                generation,
                settings,
            } => {
                let tx = self.tx.clone();
                let connector = Arc::clone(&self.connector);
                tokio::spawn(async move {
                    let message = match connector.connect(settings).await {
                        Ok(client) => Message::ClientReady { generation, client },
                        Err(error) => Message::ClientFailed { generation, error },
                    };
                    // The receiver is gone only when the app is shutting down.
                    let _ = tx.send(message);
                });
            }

            UpdateAction::LoadInstances { generation, client } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.list_instances().await;
                    let _ = tx.send(Message::InstancesLoaded { generation, result });
                });
            }

            UpdateAction::CopyToClipboard(text) => {
                let result = arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(text.clone()))
                    .map(|_| text)
                    .map_err(|e| e.to_string());
                let _ = self.tx.send(Message::ClipboardCopied(result));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{ClientHandle, ClientSettings, ResourceClient};
    use crate::error::{ClientInitError, ListError};
    use crate::models::Instance;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    #[derive(Debug)]
    struct StaticClient;

    #[async_trait]
    impl ResourceClient for StaticClient {
        async fn list_instances(&self) -> Result<Vec<Instance>, ListError> {
            Err(ListError::Transport("connection reset".to_string()))
        }

        fn region(&self) -> &str {
            "us-west-2"
        }
    }

    struct Connector {
        fail: bool,
    }

    #[async_trait]
    impl ClientConnector for Connector {
        async fn connect(&self, settings: ClientSettings) -> Result<ClientHandle, ClientInitError> {
            if self.fail {
                Err(ClientInitError::Unavailable {
                    region: settings.region,
                    message: "no credentials".to_string(),
                })
            } else {
                Ok(Arc::new(StaticClient))
            }
        }
    }

    fn settings() -> ClientSettings {
        ClientSettings {
            region: "us-west-2".to_string(),
            profile: None,
        }
    }

    #[tokio::test]
    async fn test_connect_success_posts_client_ready() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let driver = Driver::new(tx, Arc::new(Connector { fail: false }));
        driver.dispatch(UpdateAction::ConnectClient {
            generation: 7,
            settings: settings(),
        });

        match rx.recv().await {
            Some(Message::ClientReady { generation, client }) => {
                assert_eq!(generation, 7);
                assert_eq!(client.region(), "us-west-2");
            }
            other => panic!("expected ClientReady, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_failure_posts_client_failed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let driver = Driver::new(tx, Arc::new(Connector { fail: true }));
        driver.dispatch(UpdateAction::ConnectClient {
            generation: 1,
            settings: settings(),
        });

        match rx.recv().await {
            Some(Message::ClientFailed { generation, error }) => {
                assert_eq!(generation, 1);
                assert!(error.to_string().contains("no credentials"));
            }
            other => panic!("expected ClientFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_posts_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let driver = Driver::new(tx, Arc::new(Connector { fail: false }));
        driver.dispatch(UpdateAction::LoadInstances {
            generation: 3,
            client: Arc::new(StaticClient),
        });

        match rx.recv().await {
            Some(Message::InstancesLoaded { generation, result }) => {
                assert_eq!(generation, 3);
                assert_eq!(
                    result,
                    Err(ListError::Transport("connection reset".to_string()))
                );
            }
            other => panic!("expected InstancesLoaded, got {:?}", other),
        }
    }
}

//! State transitions.
//!
//! [`update`] is the only writer of [`AppState`]. It never performs I/O: work
//! that needs the network or the clipboard is returned as an [`UpdateAction`]
//! for the driver to run, and the outcome comes back as a later [`Message`].

use crate::app::{AppState, LoadStatus};
use crate::aws::{ClientHandle, ClientSettings};
use crate::keyboard::handle_key;
use crate::message::Message;
use crate::models::LogLevel;

/// Side effects requested by a transition.
#[derive(Debug)]
pub enum UpdateAction {
    /// Build a client for these settings, then report `ClientReady`/`ClientFailed`.
    ConnectClient {
        generation: u64,
        settings: ClientSettings,
    },

    /// List instances with an existing client, then report `InstancesLoaded`.
    LoadInstances {
        generation: u64,
        client: ClientHandle,
    },

    CopyToClipboard(String),
}

pub fn update(state: &mut AppState, message: Message) -> Option<UpdateAction> {
    match message {
        Message::Startup => {
            state.log(
                LogLevel::Info,
                format!("EC2 dashboard started in {}", state.config.region),
            );
            request_connect(state)
        }

        Message::Key(key) => handle_key(state, key),

        Message::Resize { width, height } => {
            state.viewport.width = width;
            state.viewport.height = height;
            None
        }

        Message::Quit => {
            state.should_quit = true;
            None
        }

        Message::ClientReady { generation, client } => {
            if is_stale(state, generation, "client") {
                return None;
            }
            let account = client
                .account()
                .map(|a| format!(" (account {})", a))
                .unwrap_or_default();
            state.log(
                LogLevel::Info,
                format!("Connected to {}{}", client.region(), account),
            );
            state.compute.client = Some(client.clone());
            Some(UpdateAction::LoadInstances { generation, client })
        }

        Message::ClientFailed { generation, error } => {
            if is_stale(state, generation, "client failure") {
                return None;
            }
            state.log(LogLevel::Error, format!("Failed to connect: {}", error));
            state.compute.load_status = LoadStatus::Failed(error.into());
            None
        }

        Message::InstancesLoaded { generation, result } => {
            if is_stale(state, generation, "instance list") {
                return None;
            }
            match result {
                Ok(instances) => {
                    state.log(
                        LogLevel::Info,
                        format!(
                            "Loaded {} instances from {}",
                            instances.len(),
                            state.current_region()
                        ),
                    );
                    state.compute.instances = instances;
                    state.compute.load_status = LoadStatus::Ready;
                    state.clamp_selection();
                }
                Err(error) => {
                    state.log(
                        LogLevel::Error,
                        format!("Error loading instances: {}", error),
                    );
                    state.compute.load_status = LoadStatus::Failed(error.into());
                }
            }
            None
        }

        Message::ClipboardCopied(result) => {
            match result {
                Ok(text) => state.log(LogLevel::Info, format!("Copied {} to clipboard", text)),
                Err(e) => state.log(LogLevel::Error, format!("Clipboard error: {}", e)),
            }
            None
        }
    }
}

fn is_stale(state: &AppState, generation: u64, what: &str) -> bool {
    let stale = generation != state.compute.generation;
    if stale {
        tracing::debug!(
            "Dropping stale {} (generation {}, current {})",
            what,
            generation,
            state.compute.generation
        );
    }
    stale
}

/// Starts a fresh connect for the configured region, dropping the old client.
pub(crate) fn request_connect(state: &mut AppState) -> Option<UpdateAction> {
    state.compute.generation += 1;
    state.compute.load_status = LoadStatus::Loading;
    state.compute.client = None;
    state.log(
        LogLevel::Info,
        format!("Connecting to {}...", state.config.region),
    );
    Some(UpdateAction::ConnectClient {
        generation: state.compute.generation,
        settings: state.config.client_settings(),
    })
}

/// Reloads with the current client, or reconnects when there is none.
pub(crate) fn request_refresh(state: &mut AppState) -> Option<UpdateAction> {
    let Some(client) = state.compute.client.clone() else {
        return request_connect(state);
    };
    state.compute.generation += 1;
    state.compute.load_status = LoadStatus::Loading;
    state.log(
        LogLevel::Info,
        format!("Refreshing instances in {}...", client.region()),
    );
    Some(UpdateAction::LoadInstances {
        generation: state.compute.generation,
        client,
    })
}

/// Moves to the next configured region and reconnects. No-op when the
/// current region is not in the list.
pub(crate) fn cycle_region(state: &mut AppState) -> Option<UpdateAction> {
    let Some(next) = state.config.next_region().map(str::to_string) else {
        tracing::debug!(
            "Region {} is not in the region list; not cycling",
            state.config.region
        );
        return None;
    };
    state.config.region = next;
    request_connect(state)
}

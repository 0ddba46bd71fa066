use crate::aws::ClientHandle;
use crate::config::Config;
use crate::error::LoadError;
use crate::filter::filter_instances;
use crate::input::{TextInput, FILTER_CHAR_LIMIT};
use crate::models::*;
use ratatui::widgets::TableState;

/// Entries kept in the activity log panel.
pub const LOG_CAPACITY: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Compute,
    ObjectStorage,
    Kubernetes,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Compute, Screen::ObjectStorage, Screen::Kubernetes];

    pub fn next(self) -> Self {
        match self {
            Screen::Compute => Screen::ObjectStorage,
            Screen::ObjectStorage => Screen::Kubernetes,
            Screen::Kubernetes => Screen::Compute,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Compute => "EC2",
            Screen::ObjectStorage => "S3",
            Screen::Kubernetes => "EKS",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Screen::Compute => 0,
            Screen::ObjectStorage => 1,
            Screen::Kubernetes => 2,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(LoadError),
}

/// Terminal size last reported by the input reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Interactive state of the compute screen. Lives outside [`Screen`] so
/// loads and filters survive switching tabs.
#[derive(Debug)]
pub struct ComputeView {
    pub load_status: LoadStatus,
    /// Last successfully loaded list; kept across failures.
    pub instances: Vec<Instance>,
    pub client: Option<ClientHandle>,
    pub filter_text: String,
    pub filter_editing: bool,
    pub filter_input: TextInput,
    pub table_state: TableState,
    /// Tag of the most recent connect/load request; older completions are stale.
    pub generation: u64,
}

impl ComputeView {
    fn new() -> Self {
        Self {
            load_status: LoadStatus::Loading,
            instances: Vec::new(),
            client: None,
            filter_text: String::new(),
            filter_editing: false,
            filter_input: TextInput::new(FILTER_CHAR_LIMIT),
            table_state: TableState::default(),
            generation: 0,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub compute: ComputeView,
    pub config: Config,
    pub viewport: Viewport,
    pub log: Vec<LogEntry>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            screen: Screen::Compute,
            compute: ComputeView::new(),
            config,
            viewport: Viewport::default(),
            log: Vec::new(),
            should_quit: false,
        }
    }

    pub fn log(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warning => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
        self.log.push(LogEntry::new(level, message));
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    /// Region of the connected client, falling back to the configured one
    /// while (re)connecting.
    pub fn current_region(&self) -> &str {
        self.compute
            .client
            .as_ref()
            .map(|c| c.region())
            .unwrap_or(self.config.region.as_str())
    }

    pub fn is_connected(&self) -> bool {
        self.compute.client.is_some()
    }

    /// Instances passing the committed filter, in load order.
    pub fn visible_instances(&self) -> Vec<&Instance> {
        filter_instances(&self.compute.instances, &self.compute.filter_text)
    }

    pub fn selected_instance(&self) -> Option<&Instance> {
        let index = self.compute.table_state.selected()?;
        self.visible_instances().get(index).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_instances().len();
        if count == 0 {
            return;
        }
        let next = match self.compute.table_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.compute.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let count = self.visible_instances().len();
        if count == 0 {
            return;
        }
        let previous = match self.compute.table_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => (i - 1).min(count - 1),
        };
        self.compute.table_state.select(Some(previous));
    }

    /// Keeps the selection within the visible rows after the list or the
    /// filter changed.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_instances().len();
        let selection = match self.compute.table_state.selected() {
            _ if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => Some(0),
        };
        self.compute.table_state.select(selection);
    }
}

//! Drives the reducer, the driver and the renderer together with fake
//! cloud collaborators.

use async_trait::async_trait;
use aws_dash::app::{AppState, LoadStatus};
use aws_dash::aws::{ClientConnector, ClientHandle, ClientSettings, ResourceClient};
use aws_dash::config::Config;
use aws_dash::driver::Driver;
use aws_dash::error::{ClientInitError, ListError};
use aws_dash::message::{InputKey, Message};
use aws_dash::models::Instance;
use aws_dash::ui;
use aws_dash::update::update;
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

#[derive(Debug)]
struct FleetClient {
    region: String,
}

#[async_trait]
impl ResourceClient for FleetClient {
    async fn list_instances(&self) -> Result<Vec<Instance>, ListError> {
        Ok(vec![
            instance("i-0a1", "running", "Prod"),
            instance("i-0b2", "stopped", "dev"),
        ])
    }

    fn region(&self) -> &str {
        &self.region
    }
}

enum FakeConnector {
    Working,
    Broken,
}

#[async_trait]
impl ClientConnector for FakeConnector {
    async fn connect(&self, settings: ClientSettings) -> Result<ClientHandle, ClientInitError> {
        match self {
            FakeConnector::Working => Ok(Arc::new(FleetClient {
                region: settings.region,
            })),
            FakeConnector::Broken => Err(ClientInitError::Rejected {
                region: settings.region,
                code: "InvalidClientTokenId".to_string(),
                message: "The security token included in the request is invalid".to_string(),
            }),
        }
    }
}

fn instance(id: &str, state: &str, env: &str) -> Instance {
    Instance {
        id: id.to_string(),
        name: Some(format!("{}-host", id)),
        state: state.to_string(),
        instance_type: "t3.large".to_string(),
        public_ip: None,
        private_ip: Some("172.31.0.10".to_string()),
        tags: vec![("Env".to_string(), env.to_string())],
    }
}

fn config() -> Config {
    Config {
        region: "us-east-1".to_string(),
        regions: vec!["us-east-1".to_string(), "us-west-2".to_string()],
        profile: None,
    }
}

/// Feeds one message through the reducer and dispatches any resulting action.
fn step(state: &mut AppState, driver: &Driver, message: Message) {
    if let Some(action) = update(state, message) {
        driver.dispatch(action);
    }
}

async fn settle(state: &mut AppState, driver: &Driver, rx: &mut UnboundedReceiver<Message>) {
    while state.compute.load_status == LoadStatus::Loading {
        let message = rx.recv().await.expect("queue closed while loading");
        step(state, driver, message);
    }
}

fn render(state: &mut AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| ui::draw(f, state)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .chunks(120)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_failing_client_renders_error_view() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let driver = Driver::new(tx, Arc::new(FakeConnector::Broken));
    let mut state = AppState::new(config());

    step(&mut state, &driver, Message::Startup);
    settle(&mut state, &driver, &mut rx).await;

    assert!(matches!(state.compute.load_status, LoadStatus::Failed(_)));
    let screen = render(&mut state);
    assert!(screen.contains("Error: credentials rejected in us-east-1"));
    assert!(screen.contains("InvalidClientTokenId"));
    assert!(!screen.contains("INSTANCE ID"));
}

#[tokio::test]
async fn test_startup_loads_and_filters_instances() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let driver = Driver::new(tx, Arc::new(FakeConnector::Working));
    let mut state = AppState::new(config());

    step(&mut state, &driver, Message::Startup);
    settle(&mut state, &driver, &mut rx).await;

    assert_eq!(state.compute.load_status, LoadStatus::Ready);
    let screen = render(&mut state);
    assert!(screen.contains("i-0a1"));
    assert!(screen.contains("i-0b2"));
    assert!(screen.contains("Total: 2 instances"));

    for key in [InputKey::Char('f')]
        .into_iter()
        .chain("Env=prod".chars().map(InputKey::Char))
        .chain([InputKey::Enter])
    {
        step(&mut state, &driver, Message::Key(key));
    }

    let screen = render(&mut state);
    assert!(screen.contains("(filtered by: Env=prod)"));
    assert!(screen.contains("i-0a1"));
    assert!(!screen.contains("i-0b2"));
}

#[tokio::test]
async fn test_region_change_reloads_in_new_region() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let driver = Driver::new(tx, Arc::new(FakeConnector::Working));
    let mut state = AppState::new(config());

    step(&mut state, &driver, Message::Startup);
    settle(&mut state, &driver, &mut rx).await;

    step(&mut state, &driver, Message::Key(InputKey::Char('c')));
    assert_eq!(state.compute.load_status, LoadStatus::Loading);
    settle(&mut state, &driver, &mut rx).await;

    assert_eq!(state.current_region(), "us-west-2");
    assert!(render(&mut state).contains("Region: us-west-2"));
}

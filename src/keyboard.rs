use crate::app::{AppState, Screen};
use crate::message::InputKey;
use crate::models::LogLevel;
use crate::update::{cycle_region, request_refresh, UpdateAction};

pub fn handle_key(state: &mut AppState, key: InputKey) -> Option<UpdateAction> {
    if state.compute.filter_editing {
        handle_filter_keys(state, key)
    } else {
        handle_navigation_keys(state, key)
    }
}

fn handle_navigation_keys(state: &mut AppState, key: InputKey) -> Option<UpdateAction> {
    let on_compute = state.screen == Screen::Compute;

    match key {
        InputKey::Char('q') => {
            state.should_quit = true;
        }
        InputKey::Char('1') => state.screen = Screen::Compute,
        InputKey::Char('2') => state.screen = Screen::ObjectStorage,
        InputKey::Char('3') => state.screen = Screen::Kubernetes,
        InputKey::Tab => state.screen = state.screen.next(),
        InputKey::Char('r') if on_compute => return request_refresh(state),
        InputKey::Char('c') => return cycle_region(state),
        InputKey::Char('f') if on_compute => {
            let committed = state.compute.filter_text.clone();
            state.compute.filter_input.set_value(&committed);
            state.compute.filter_editing = true;
        }
        InputKey::Down | InputKey::Char('j') if on_compute => state.select_next(),
        InputKey::Up | InputKey::Char('k') if on_compute => state.select_previous(),
        InputKey::Char('y') if on_compute => {
            return match state.selected_instance() {
                Some(instance) => Some(UpdateAction::CopyToClipboard(instance.id.clone())),
                None => {
                    state.log(LogLevel::Warning, "No instance selected".to_string());
                    None
                }
            };
        }
        _ => {}
    }
    None
}

fn handle_filter_keys(state: &mut AppState, key: InputKey) -> Option<UpdateAction> {
    match key {
        InputKey::Enter => {
            state.compute.filter_text = state.compute.filter_input.value().to_string();
            state.compute.filter_editing = false;
            state.compute.table_state.select(None);
            state.clamp_selection();
            let message = if state.compute.filter_text.is_empty() {
                "Filter cleared".to_string()
            } else {
                format!("Filter applied: {}", state.compute.filter_text)
            };
            state.log(LogLevel::Info, message);
        }
        InputKey::Esc => {
            state.compute.filter_input.clear();
            state.compute.filter_editing = false;
        }
        other => state.compute.filter_input.handle_key(other),
    }
    None
}

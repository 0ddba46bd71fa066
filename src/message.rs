//! Events consumed by the state machine.

use crate::aws::ClientHandle;
use crate::error::{ClientInitError, ListError};
use crate::models::Instance;

/// Terminal-independent key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    CharCtrl(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug)]
pub enum Message {
    /// First message of every run; kicks off client construction.
    Startup,

    Key(InputKey),

    Resize { width: u16, height: u16 },

    /// Interrupt (Ctrl+C). Quits from any state.
    Quit,

    ClientReady {
        generation: u64,
        client: ClientHandle,
    },

    ClientFailed {
        generation: u64,
        error: ClientInitError,
    },

    InstancesLoaded {
        generation: u64,
        result: Result<Vec<Instance>, ListError>,
    },

    /// Outcome of a clipboard copy: the copied text or the failure message.
    ClipboardCopied(Result<String, String>),
}

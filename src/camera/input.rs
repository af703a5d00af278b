//! Abstract walkabout commands and the key map that produces them
//!
//! Hosts translate their own key events into `Command`s through a `KeyMap`;
//! the controller never sees raw key codes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Direction of a single walking step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepDirection {
    Forward,
    Backward,
}

impl StepDirection {
    /// +1 for forward, -1 for backward
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            StepDirection::Forward => 1.0,
            StepDirection::Backward => -1.0,
        }
    }
}

/// Discrete input commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Forward,
    Backward,
    /// Raise the view (tilt increases)
    TiltUp,
    /// Lower the view (tilt decreases)
    TiltDown,
    /// Turn left (yaw decreases)
    YawLeft,
    /// Turn right (yaw increases)
    YawRight,
    Screenshot,
    Quit,
}

/// What the host must do after a command has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Screenshot,
    Quit,
}

/// Key codes of the stock bindings
pub mod keys {
    pub const W: i32 = 119;
    pub const S: i32 = 115;
    pub const APOSTROPHE: i32 = 39;
    pub const SLASH: i32 = 47;
    pub const A: i32 = 97;
    pub const D: i32 = 100;
    pub const P: i32 = 112;
    pub const ESCAPE: i32 = 27;
}

/// Mapping from raw key codes to commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    bindings: BTreeMap<i32, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(keys::W, Command::Forward);
        map.bind(keys::S, Command::Backward);
        map.bind(keys::APOSTROPHE, Command::TiltDown);
        map.bind(keys::SLASH, Command::TiltUp);
        map.bind(keys::A, Command::YawLeft);
        map.bind(keys::D, Command::YawRight);
        map.bind(keys::P, Command::Screenshot);
        map.bind(keys::ESCAPE, Command::Quit);
        map
    }
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Bind a key, returning the command it replaced (if any)
    pub fn bind(&mut self, key: i32, command: Command) -> Option<Command> {
        self.bindings.insert(key, command)
    }

    pub fn unbind(&mut self, key: i32) -> Option<Command> {
        self.bindings.remove(&key)
    }

    /// Look up a key; unknown keys yield `None`
    pub fn command_for(&self, key: i32) -> Option<Command> {
        let command = self.bindings.get(&key).copied();
        if command.is_none() {
            log::debug!("Unmapped key {}", key);
        }
        command
    }
}

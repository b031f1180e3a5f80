use shared::utils::is_exit_command;

/// States of the interactive question loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    Terminated,
}

/// What a single line of user input asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Exit,
    Skip,
    Ask(String),
}

impl Turn {
    pub fn parse(line: &str) -> Self {
        if is_exit_command(line) {
            Turn::Exit
        } else if line.trim().is_empty() {
            Turn::Skip
        } else {
            Turn::Ask(line.trim().to_string())
        }
    }
}

impl LoopState {
    /// Next state after `turn`. Only `Exit` leaves `AwaitingInput`.
    pub fn next(self, turn: &Turn) -> Self {
        match (self, turn) {
            (LoopState::Terminated, _) => LoopState::Terminated,
            (LoopState::AwaitingInput, Turn::Exit) => LoopState::Terminated,
            (LoopState::AwaitingInput, _) => LoopState::AwaitingInput,
        }
    }
}

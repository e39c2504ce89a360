//! Track Type Selection
//!
//! Drives the curator through picking a track type from the numbered menu.
//!
//! The selection is a small state machine:
//!
//! ```text
//! Selecting { failures } --valid number + "y"--> Confirmed(type)
//! Selecting { failures } --valid number + other--> Selecting { failures + 1 }
//! Selecting { failures } --unknown number--> Selecting { failures }
//! Selecting { failures > MAX_FAILURES } --> Aborted
//! ```
//!
//! A direct (pre-selected) menu number skips the prompts entirely.

use colored::Colorize;
use log::debug;

use super::registry::{self, TrackType};
use crate::error::{ApolloError, Result};
use crate::prompt::Prompter;

/// Rejected confirmations tolerated before the selection aborts.
pub const MAX_FAILURES: u32 = 3;

const RULE: &str = "###############################################";

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Selecting { failures: u32 },
    Confirmed(TrackType),
    Aborted,
}

/// A confirmed choice and how it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub track_type: TrackType,

    /// False when the type came from a direct menu number
    pub interactive: bool,
}

/// Interactive or pre-selected menu walk.
pub struct TypeSelector {
    direct: Option<usize>,
    state: SelectionState,
}

impl TypeSelector {
    /// Creates a selector; `direct` is a 1-based menu number that skips prompting.
    pub fn new(direct: Option<usize>) -> Self {
        Self {
            direct,
            state: SelectionState::Selecting { failures: 0 },
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Runs a single pass: render the menu, read one choice, update the state.
    pub fn step(&mut self, prompter: &mut dyn Prompter) -> Result<SelectionState> {
        let failures = match self.state {
            SelectionState::Selecting { failures } => failures,
            terminal => return Ok(terminal),
        };

        if failures > MAX_FAILURES {
            self.state = SelectionState::Aborted;
            return Ok(self.state);
        }

        let menu = render_menu(prompter)?;

        if let Some(index) = self.direct {
            let track_type =
                registry::by_menu_number(index).ok_or(ApolloError::InvalidDirectSelection {
                    index,
                    available: menu.len(),
                })?;
            self.state = SelectionState::Confirmed(track_type);
            return Ok(self.state);
        }

        let answer = prompter.ask("Enter the number corresponding to your choice:")?;
        let Some(track_type) = parse_menu_number(&answer).and_then(registry::by_menu_number) else {
            debug!("Ignoring selection '{}'", answer.trim());
            return Ok(self.state);
        };

        let question = format!("You selected: {} - is that correct? (Y/N)", track_type);
        self.state = if prompter.confirm(&question)? {
            SelectionState::Confirmed(track_type)
        } else {
            SelectionState::Selecting {
                failures: failures + 1,
            }
        };

        Ok(self.state)
    }

    /// Steps until the selection is confirmed or aborted.
    pub fn run(&mut self, prompter: &mut dyn Prompter) -> Result<Selection> {
        loop {
            match self.step(prompter)? {
                SelectionState::Selecting { .. } => continue,
                SelectionState::Confirmed(track_type) => {
                    return Ok(Selection {
                        track_type,
                        interactive: self.direct.is_none(),
                    })
                }
                SelectionState::Aborted => return Err(ApolloError::SelectionExhausted),
            }
        }
    }
}

/// Shows the numbered menu and returns it.
fn render_menu(prompter: &mut dyn Prompter) -> Result<Vec<TrackType>> {
    let menu = registry::menu();

    prompter.say(&RULE.bold().to_string())?;
    prompter.say("Choose the track type from the following list:")?;
    for (i, track_type) in menu.iter().enumerate() {
        prompter.say(&format!("\t{}\t{}", i + 1, track_type))?;
    }
    prompter.say(&RULE.bold().to_string())?;

    Ok(menu)
}

fn parse_menu_number(answer: &str) -> Option<usize> {
    answer.trim().parse().ok()
}

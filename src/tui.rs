//! Interactive navigation: credential setup, then project → feature →
//! scenario browsing.
//!
//! `state` holds the reducer, `view` the pure frame renderer, `driver` the
//! loop that performs effects and collects input through a [`Prompter`].

mod driver;
mod prompt;
mod state;
mod view;

pub use driver::Navigator;
pub use prompt::{Answer, DialoguerPrompter, LinePrompter, Prompter, ScriptedPrompter};
pub use state::{
    Effect, Event, PendingInput, Screen, SetupStep, Stage, ViewState, SETUP_TOKEN_INVALID_MESSAGE,
};
pub use view::render;

/// Navigation opens only for a bare `gwirian` (no arguments, flags included)
/// on an interactive stdin. `arg_count` counts the program name.
pub fn navigation_allowed(arg_count: usize, stdin_is_tty: bool) -> bool {
    arg_count == 1 && stdin_is_tty
}

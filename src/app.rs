//! Application module: the display-side state the TUI renders.
//!
//! Track records live in the session's registry; `App` only keeps what the
//! session publishes as notices plus the cursor and a status line.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

//! Layered settings: struct defaults, then `config.toml`, then `POLYMIX__*`
//! environment variables. A small `state.json` beside the config file
//! carries the master volume from one run to the next.

mod load;
mod schema;
mod state;

pub use schema::*;
pub use state::{SavedState, load_state, save_state};

#[cfg(test)]
mod tests;

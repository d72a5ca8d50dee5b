mod analysis;
mod app;
mod audibility;
mod config;
mod library;
mod looping;
mod media;
mod playlist;
mod registry;
mod runtime;
mod session;
mod spectrum;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stderr shares the terminal with the TUI; redirect it (2>polymix.log) when raising RUST_LOG.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    runtime::run()
}

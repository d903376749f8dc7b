use std::time::Duration;

use super::SamplingArgs;

pub fn run(args: &SamplingArgs, frame_ms: u64) {
    let engine = super::make_engine(args);
    let mut app = crate::tui::app::App::new(engine, Duration::from_millis(frame_ms));
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}

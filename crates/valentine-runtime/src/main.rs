//! Valentine terminal front end entry point.

use valentine_core::clock::SystemClock;
use valentine_core::rng::SystemRng;
use valentine_narrative::domain::commands::Action;
use valentine_runtime::audio::LoggingAudio;
use valentine_runtime::config::AppConfig;
use valentine_runtime::error::AppError;
use valentine_runtime::event_loop::{EventLoop, Input};
use valentine_runtime::input::{USAGE, spawn_stdin_reader};
use valentine_runtime::logging::{LogFormat, init_logging};
use valentine_runtime::render::TerminalRenderer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    init_logging(LogFormat::from_env());

    // Read configuration from environment.
    let config = AppConfig::from_env()?;
    tracing::info!(
        display_name = %config.story.display_name,
        width = config.arena.width,
        height = config.arena.height,
        "starting valentine"
    );

    let (event_loop, tx) = EventLoop::new(
        config.story,
        Box::new(SystemClock),
        Box::new(SystemRng::new()),
        Box::new(LoggingAudio::default()),
        TerminalRenderer::new(std::io::stdout()),
    );

    // The terminal has no layout pass, so report the configured arena up front.
    // The loop still owns the receiver here, so this send cannot fail.
    let _ = tx.send(Input::Action(Action::ArenaMeasured(config.arena)));
    tracing::info!("{USAGE}");
    let reader = spawn_stdin_reader(tx);

    event_loop.run().await;
    reader.abort();
    Ok(())
}

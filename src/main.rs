/// Entry point and main loop.

mod config;
mod domain;
mod error;
mod logging;
mod sim;
mod ui;

use std::io::Write;
use std::time::Duration;

use tracing::{info, warn};

use config::NovelConfig;
use error::AppError;
use sim::event::SessionEvent;
use sim::step::{step, Action};
use sim::world::SessionState;
use ui::gamepad::{map_pad, GamepadState};
use ui::input::{map_key, InputState};
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

fn main() {
    let config = match NovelConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            NovelConfig::default()
        }
    };

    match logging::init(&config.logging) {
        Ok(true) => info!(version = env!("CARGO_PKG_VERSION"), "session start"),
        Ok(false) => {}
        Err(e) => eprintln!("Logging disabled: {e}"),
    }
    report_config_warning(&config, &mut std::io::stderr());

    let mut state = SessionState::new();
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new(config.sound_enabled);

    let result = session_loop(&mut state, &mut renderer, &sound, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(()) => info!("session end"),
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            eprintln!("Error: {e}");
        }
    }
}

/// Print a config parse warning before the terminal switches to the
/// alternate screen. Also logged when a log file is configured.
fn report_config_warning(config: &NovelConfig, out: &mut impl Write) -> bool {
    let Some(w) = &config.warning else {
        return false;
    };
    warn!("{w}");
    let _ = writeln!(out, "Warning: {w}");
    true
}

fn session_loop(
    state: &mut SessionState,
    renderer: &mut Renderer,
    sound: &SoundEngine,
    config: &NovelConfig,
) -> Result<(), AppError> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let frame = Duration::from_millis(config.frame_ms);

    loop {
        kb.drain_events()?;
        gp.update();

        // Decode each press against the view it arrived in: an earlier
        // press in the same frame may have switched screens.
        let mut events = Vec::new();
        for key in &kb.presses {
            if let Some(action) = map_key(state.view, key) {
                events.extend(apply(state, action));
            }
        }
        for &input in &gp.presses {
            if let Some(action) = map_pad(state.view, input) {
                events.extend(apply(state, action));
            }
        }
        process_sound_events(sound, &events);

        if state.should_quit {
            break;
        }

        if kb.resized {
            renderer.invalidate();
        }
        renderer.render(state, gp.connected)?;
        std::thread::sleep(frame);
    }

    Ok(())
}

fn apply(state: &mut SessionState, action: Action) -> Vec<SessionEvent> {
    if state.should_quit {
        return Vec::new();
    }
    step(state, action)
}

fn process_sound_events(sfx: &SoundEngine, events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::DigitAccepted { value } => sfx.play_digit(*value),
            SessionEvent::PuzzleSolved => sfx.play_solved(),
            SessionEvent::PuzzleMismatch => sfx.play_mismatch(),
            SessionEvent::FriendshipRaised { .. } => sfx.play_friendship(),
            SessionEvent::PuzzleReset => sfx.play_reset(),
            SessionEvent::InputRejected { .. }
            | SessionEvent::FriendshipMaxed { .. }
            | SessionEvent::UnknownCharacter { .. } => sfx.play_reject(),
            SessionEvent::CursorMoved | SessionEvent::ViewChanged { .. } => sfx.play_nav(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn parse_error_warning_reaches_stderr_without_log_file() {
        let config = NovelConfig::from_toml_str("[sound\nenabled = ", Path::new("/tmp"));
        assert_eq!(config.logging.file, None);

        let mut out = Vec::new();
        assert!(report_config_warning(&config, &mut out));
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Warning: config.toml parse error"), "{text}");
    }

    #[test]
    fn clean_config_prints_nothing() {
        let config = NovelConfig::from_toml_str("", Path::new("/tmp"));
        let mut out = Vec::new();
        assert!(!report_config_warning(&config, &mut out));
        assert!(out.is_empty());
    }
}

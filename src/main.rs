// Numbers Game in the terminal with ratatui.
// Drag an orthogonal path of tiles; a sum that is a multiple of five
// (length >= 2) scores and the tiles regenerate, anything else costs
// points. Flip mode negates single tiles instead.

mod console_interface;
mod core;
mod models;
mod persist;
#[cfg(test)]
mod test;

use std::time::Instant;

use crate::console_interface::{
    ConsoleInput, cleanup_terminal, handle_input, move_cursor, render_game, setup_terminal,
};
use crate::core::{
    Coord, GameChangeType, GameState, GameUpdate, PointerPhase, UserAction, step,
};
use crate::models::GameRenderState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let mut state = GameState::new(&mut rng);
    state.high_score = persist::load_high_score();
    let mut audio_enabled = persist::load_audio_preference();

    let mut cursor = Coord { row: 0, col: 0 };
    let mut last_event: Option<String> = None;

    let mut terminal = setup_terminal()?;
    let mut last_frame = Instant::now();

    loop {
        render_game(
            &mut terminal,
            &GameRenderState {
                game: state.clone(),
                cursor,
                audio_enabled,
                last_event: last_event.clone(),
            },
        )?;

        let action = match handle_input()? {
            Some(ConsoleInput::Quit) => break,
            Some(ConsoleInput::MoveCursor(direction)) => {
                cursor = move_cursor(cursor, direction);
                if state.dragging && !state.flip_mode {
                    Some(UserAction::Pointer {
                        at: Some(cursor),
                        phase: PointerPhase::Move,
                    })
                } else {
                    None
                }
            }
            Some(ConsoleInput::Press) => Some(UserAction::Pointer {
                at: Some(cursor),
                phase: PointerPhase::Down,
            }),
            Some(ConsoleInput::Release) => Some(UserAction::Pointer {
                at: None,
                phase: PointerPhase::Up,
            }),
            Some(ConsoleInput::TogglePause) => Some(UserAction::TogglePause),
            Some(ConsoleInput::ToggleFlipMode) => Some(UserAction::ToggleFlipMode),
            Some(ConsoleInput::Reset) => Some(UserAction::Reset),
            Some(ConsoleInput::ToggleAudio) => {
                audio_enabled = !audio_enabled;
                persist::save_audio_preference(audio_enabled);
                None
            }
            None => None,
        };

        if let Some(action) = action {
            apply(&mut state, action, &mut rng, &mut last_event);
        }

        // The poll timeout doubles as the tick driver.
        let elapsed_ms = last_frame.elapsed().as_millis() as u64;
        last_frame = Instant::now();
        apply(
            &mut state,
            UserAction::Advance { ms: elapsed_ms },
            &mut rng,
            &mut last_event,
        );
    }

    cleanup_terminal()?;
    Ok(())
}

fn apply(
    state: &mut GameState,
    action: UserAction,
    rng: &mut impl rand::Rng,
    last_event: &mut Option<String>,
) {
    let GameUpdate::Changed(change) = step(state, action, rng) else {
        return;
    };
    match change {
        GameChangeType::PathScored {
            points,
            new_high_score,
        } => {
            if new_high_score {
                persist::save_high_score(state.high_score);
            }
            *last_event = Some(format!("+{points} points!"));
        }
        GameChangeType::PathRejected { penalty } => {
            *last_event = Some(format!("-{penalty} points"));
        }
        GameChangeType::GridReset => {
            *last_event = None;
        }
        _ => {}
    }
}

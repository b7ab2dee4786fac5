use crate::core::{
    CLEAR_EFFECT_TIMEOUT_MS, Coord, EffectKind, GameChangeType, GameUpdate, MISTAKE_EFFECT_MS,
    UserAction,
};
use crate::test::test_util::GameTestState;

const ALL_ONES: &str = r#"
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
"#;

#[test]
fn reset_reinitializes_the_session_every_time() {
    let mut game = GameTestState::new(1);
    game.state.high_score = 50;
    game.apply(UserAction::TogglePause);
    game.apply(UserAction::TogglePause);
    game.advance(65_000);
    game.apply(UserAction::ToggleFlipMode);
    assert!(game.state.elapsed_secs > 0);

    for _ in 0..2 {
        game.apply(UserAction::Reset);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.elapsed_secs, 0);
        assert_eq!(game.state.level(), 1);
        assert!(game.state.path.is_empty());
        assert!(!game.state.paused);
        assert!(!game.state.flip_mode);
        assert_eq!(game.state.grid.tile_count(), 36);
        // High score survives a reset.
        assert_eq!(game.state.high_score, 50);
    }
}

#[test]
fn pause_suppresses_input_and_time() {
    let mut game = GameTestState::from_grid(ALL_ONES);
    game.apply(UserAction::TogglePause);

    assert_eq!(game.press(0, 0), GameUpdate::NoChange);
    assert!(game.state.path.is_empty());

    game.advance(5_000);
    assert_eq!(game.state.elapsed_secs, 0);

    game.apply(UserAction::TogglePause);
    game.advance(1_000);
    assert_eq!(game.state.elapsed_secs, 1);
    assert!(matches!(game.press(0, 0), GameUpdate::Changed(_)));
}

#[test]
fn level_advances_every_sixty_seconds() {
    let mut game = GameTestState::from_grid(ALL_ONES);
    game.advance(59_000);
    assert_eq!(game.state.level(), 1);
    game.advance(1_000);
    assert_eq!(game.state.level(), 2);
    game.advance(60_000);
    assert_eq!(game.state.level(), 3);
    assert_eq!(game.state.formatted_time(), "2:00");
}

#[test]
fn flip_negates_one_tile_and_nothing_else() {
    let mut game = GameTestState::from_grid(ALL_ONES);
    game.apply(UserAction::ToggleFlipMode);
    let update = game.press(2, 3);
    assert!(matches!(
        update,
        GameUpdate::Changed(GameChangeType::TileFlipped(_))
    ));
    game.assert_grid_matches(
        r#"
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1  -1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
"#,
    );
    assert_eq!(game.state.score, 0);
    assert!(game.state.path.is_empty());
}

#[test]
fn rapid_double_flip_is_debounced() {
    let mut game = GameTestState::from_grid(ALL_ONES);
    game.apply(UserAction::ToggleFlipMode);

    assert!(matches!(game.press(2, 3), GameUpdate::Changed(_)));
    // The duplicate event of the same tap arrives within 100ms.
    assert_eq!(game.press(2, 3), GameUpdate::NoChange);
    assert_eq!(game.state.grid.get(Coord { row: 2, col: 3 }), Some(-1));

    game.advance(150);
    assert!(matches!(game.press(2, 3), GameUpdate::Changed(_)));
    assert_eq!(game.state.grid.get(Coord { row: 2, col: 3 }), Some(1));
}

#[test]
fn entering_flip_mode_discards_the_current_path() {
    let mut game = GameTestState::from_grid(ALL_ONES);
    game.press(0, 0);
    game.move_to(0, 1);
    assert_eq!(game.state.path.len(), 2);

    game.apply(UserAction::ToggleFlipMode);
    assert!(game.state.path.is_empty());
    assert!(!game.state.dragging);
}

#[test]
fn mistake_window_blocks_all_pointer_input() {
    let mut game = GameTestState::from_grid(
        r#"
  3   4   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
"#,
    );
    game.drag(&[(0, 0), (0, 1)]);
    assert!(game.state.mistake_effect.is_some());

    assert_eq!(game.press(3, 3), GameUpdate::NoChange);
    game.apply(UserAction::ToggleFlipMode);
    assert_eq!(game.press(3, 3), GameUpdate::NoChange);
    game.apply(UserAction::ToggleFlipMode);

    // The renderer reports the effect finished early.
    game.apply(UserAction::EffectComplete(EffectKind::Mistake));
    assert!(game.state.mistake_effect.is_none());
    assert!(matches!(game.press(3, 3), GameUpdate::Changed(_)));
}

#[test]
fn mistake_window_expires_on_its_own() {
    let mut game = GameTestState::from_grid(
        r#"
  3   4   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
"#,
    );
    game.drag(&[(0, 0), (0, 1)]);
    game.advance(MISTAKE_EFFECT_MS);
    assert!(game.state.mistake_effect.is_none());
    assert!(matches!(game.press(3, 3), GameUpdate::Changed(_)));
}

#[test]
fn second_valid_path_cannot_score_while_first_is_presenting() {
    let mut game = GameTestState::from_grid(
        r#"
  3   2   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  5   5   1   1   1   1
"#,
    );
    game.drag(&[(0, 0), (0, 1)]);
    assert_eq!(game.state.score, 4);
    assert!(game.state.clearing_effect.is_some());

    // The bottom pair is untouched by the refill and sums to 10, but the
    // latch downgrades its finalize to a selection clear.
    let update = game.drag(&[(5, 0), (5, 1)]);
    assert_eq!(update, GameUpdate::Changed(GameChangeType::PathChanged));
    assert_eq!(game.state.score, 4);
    assert!(game.state.path.is_empty());

    game.apply(UserAction::EffectComplete(EffectKind::TilesClearing));
    let update = game.drag(&[(5, 0), (5, 1)]);
    assert_eq!(
        update,
        GameUpdate::Changed(GameChangeType::PathScored {
            points: 6,
            new_high_score: true,
        })
    );
    assert_eq!(game.state.score, 10);
}

#[test]
fn clearing_latch_releases_after_the_fallback_timeout() {
    let mut game = GameTestState::from_grid(
        r#"
  3   2   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  5   5   1   1   1   1
"#,
    );
    game.drag(&[(0, 0), (0, 1)]);
    game.advance(CLEAR_EFFECT_TIMEOUT_MS);
    assert!(game.state.clearing_effect.is_none());

    game.drag(&[(5, 0), (5, 1)]);
    assert_eq!(game.state.score, 10);
}

#[test]
fn full_round_from_fresh_grid_to_refilled_grid() {
    let mut game = GameTestState::from_grid(
        r#"
  3   2   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
  1   1   1   1   1   1
"#,
    );
    assert_eq!(game.state.grid.tile_count(), 36);

    game.press(0, 0);
    game.move_to(0, 1);
    assert_eq!(game.state.path.sum(), 5);
    assert_eq!(game.state.path.len(), 2);

    let update = game.release();
    assert_eq!(
        update,
        GameUpdate::Changed(GameChangeType::PathScored {
            points: 4,
            new_high_score: true,
        })
    );
    assert_eq!(game.state.score, 4);
    // Two cells were vacated and, being the only empties, both refilled.
    assert_eq!(game.state.grid.tile_count(), 36);
    assert!(game.state.path.is_empty());
    assert!(!game.state.dragging);
}

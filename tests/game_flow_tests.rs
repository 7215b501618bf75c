//! Headless tests for the word-spelling rules.
//!
//! These tests run [`MinimalPlugins`] and [`SoupGamePlugin`] only, without a
//! window or Rapier, so letters are plain entities and picks are injected as
//! `LetterPicked` messages.
//!
//! Covered scenarios:
//! 1. Spelling the target scores exactly one and moves to a new word.
//! 2. A full-length mismatch clears the selection.
//! 3. Picks during the celebration delay are ignored.
//! 4. Reset zeroes the score; change-word keeps it.
//! 5. The bowl always holds max(word length, letter count) letters.
//! 6. A completed word kicks every letter and starts the flash.
//! 7. Reset or change-word cancels a pending advance.

use alphabet_soup::config::GameConfig;
use alphabet_soup::game::{
    ChangeWordRequested, Flash, LetterPicked, PendingAdvance, ResetRequested, SoupGame,
    SoupGamePlugin,
};
use alphabet_soup::letters::Letter;
use alphabet_soup::selection::Selection;
use bevy::prelude::*;
use bevy_rapier2d::prelude::ExternalImpulse;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn app_with_words(words: &[&str], advance_delay_secs: f32) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig {
        words: words.iter().map(|w| w.to_string()).collect(),
        advance_delay_secs,
        ..Default::default()
    });
    app.add_plugins(SoupGamePlugin);
    app.update(); // run Startup: word bank + first letter set
    app
}

fn letters(app: &mut App) -> Vec<(Entity, char)> {
    let mut query = app.world_mut().query::<(Entity, &Letter)>();
    query.iter(app.world()).map(|(e, l)| (e, l.glyph)).collect()
}

/// Distinct letter entities spelling `word`, in order.
fn entities_spelling(app: &mut App, word: &str) -> Vec<Entity> {
    let mut pool = letters(app);
    word.chars()
        .map(|c| {
            let idx = pool
                .iter()
                .position(|(_, g)| *g == c)
                .unwrap_or_else(|| panic!("no letter '{c}' left in the bowl"));
            pool.swap_remove(idx).0
        })
        .collect()
}

fn pick(app: &mut App, entities: &[Entity]) {
    for entity in entities {
        app.world_mut().write_message(LetterPicked(*entity));
    }
    app.update();
}

fn game(app: &App) -> SoupGame {
    app.world().resource::<SoupGame>().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn spelling_the_target_scores_once_and_advances() {
    let mut app = app_with_words(&["SOPA", "CALDO"], 0.0);
    assert_eq!(game(&app).target, "SOPA");

    let picked = entities_spelling(&mut app, "SOPA");
    pick(&mut app, &picked);
    app.update(); // apply the rebuild

    let state = game(&app);
    assert_eq!(state.score, 1, "one completed word must score exactly one");
    assert_eq!(state.target, "CALDO", "target must advance to the other word");
    assert!(app.world().resource::<Selection>().is_empty());

    let alive: Vec<Entity> = letters(&mut app).into_iter().map(|(e, _)| e).collect();
    assert!(
        picked.iter().all(|e| !alive.contains(e)),
        "old letters must be replaced by the rebuild"
    );
    let glyphs: String = letters(&mut app).into_iter().map(|(_, g)| g).collect();
    for c in "CALDO".chars() {
        assert!(glyphs.contains(c), "new bowl is missing '{c}'");
    }
}

#[test]
fn full_length_mismatch_clears_selection() {
    let mut app = app_with_words(&["SOPA"], 0.0);
    let wrong = entities_spelling(&mut app, "ASOP");

    pick(&mut app, &wrong[..3]);
    assert_eq!(app.world().resource::<Selection>().len(), 3);

    pick(&mut app, &wrong[3..]);
    assert!(app.world().resource::<Selection>().is_empty());
    assert_eq!(game(&app).score, 0);
}

#[test]
fn repeated_pick_of_same_letter_is_ignored() {
    let mut app = app_with_words(&["SOPA"], 0.0);
    let s = entities_spelling(&mut app, "S");
    pick(&mut app, &[s[0], s[0], s[0]]);
    assert_eq!(app.world().resource::<Selection>().len(), 1);
}

#[test]
fn picks_during_celebration_are_ignored() {
    let mut app = app_with_words(&["SOPA", "CALDO"], 60.0);
    let picked = entities_spelling(&mut app, "SOPA");
    pick(&mut app, &picked);
    assert_eq!(game(&app).score, 1);
    assert_eq!(game(&app).target, "SOPA", "advance waits for the delay");

    let extra = letters(&mut app)
        .into_iter()
        .map(|(e, _)| e)
        .find(|e| !picked.contains(e))
        .expect("bowl has filler letters");
    pick(&mut app, &[extra]);
    assert_eq!(app.world().resource::<Selection>().len(), 4);
}

#[test]
fn reset_zeroes_score_and_change_word_keeps_it() {
    let mut app = app_with_words(&["SOPA", "CALDO"], 0.0);
    let picked = entities_spelling(&mut app, "SOPA");
    pick(&mut app, &picked);
    app.update();
    assert_eq!(game(&app).score, 1);

    app.world_mut().write_message(ChangeWordRequested);
    app.update();
    app.update();
    assert_eq!(game(&app).score, 1);
    assert_eq!(game(&app).target, "SOPA");

    app.world_mut().write_message(ResetRequested);
    app.update();
    app.update();
    assert_eq!(game(&app).score, 0);
    assert_eq!(game(&app).target, "SOPA", "reset keeps the current word");
    assert_eq!(letters(&mut app).len(), GameConfig::default().letter_count);
}

#[test]
fn long_word_overflows_letter_count() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig {
        words: vec!["IMPLEMENTACION".into()],
        letter_count: 5,
        ..Default::default()
    });
    app.add_plugins(SoupGamePlugin);
    app.update();

    assert_eq!(letters(&mut app).len(), 14);
}

#[test]
fn completed_word_kicks_every_letter_and_flashes() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig {
        words: vec!["SOPA".into(), "CALDO".into()],
        advance_delay_secs: 60.0,
        flash_secs: 60.0,
        ..Default::default()
    });
    app.add_plugins(SoupGamePlugin);
    app.update();

    let picked = entities_spelling(&mut app, "SOPA");
    pick(&mut app, &picked);

    assert!(app.world().resource::<Flash>().is_active());

    let config = app.world().resource::<GameConfig>().clone();
    let expected = config.celebration_speed * config.letter_mass();
    let mut query = app.world_mut().query_filtered::<&ExternalImpulse, With<Letter>>();
    let kicks: Vec<f32> = query
        .iter(app.world())
        .map(|impulse| impulse.impulse.length())
        .collect();
    assert_eq!(kicks.len(), config.letter_count);
    for kick in kicks {
        assert!(
            (kick - expected).abs() <= expected * 1e-3,
            "impulse {kick} should be {expected}"
        );
    }
}

#[test]
fn change_word_cancels_pending_advance() {
    let mut app = app_with_words(&["SOPA", "CALDO"], 60.0);
    let picked = entities_spelling(&mut app, "SOPA");
    pick(&mut app, &picked);
    assert!(app.world().resource::<PendingAdvance>().is_active());

    app.world_mut().write_message(ChangeWordRequested);
    app.update();
    assert!(!app.world().resource::<PendingAdvance>().is_active());
    assert!(app.world().resource::<Selection>().is_empty());
    assert_eq!(game(&app).target, "CALDO");
    assert_eq!(game(&app).score, 1);

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(game(&app).target, "CALDO", "no second advance after the cancel");
}

#[test]
fn reset_cancels_pending_advance() {
    let mut app = app_with_words(&["SOPA", "CALDO"], 60.0);
    let picked = entities_spelling(&mut app, "SOPA");
    pick(&mut app, &picked);
    assert!(app.world().resource::<PendingAdvance>().is_active());

    app.world_mut().write_message(ResetRequested);
    app.update();
    assert!(!app.world().resource::<PendingAdvance>().is_active());
    assert_eq!(game(&app).score, 0);
    assert_eq!(game(&app).target, "SOPA");

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(game(&app).target, "SOPA", "no advance after the reset");
    assert_eq!(letters(&mut app).len(), GameConfig::default().letter_count);
}

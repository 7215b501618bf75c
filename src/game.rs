//! Game state, messages and the rules loop.
//!
//! ## Systems (registered by `SoupGamePlugin`)
//!
//! | System                       | Schedule | Purpose                                   |
//! |------------------------------|----------|-------------------------------------------|
//! | `setup_game`                 | Startup  | Build word bank, pick first word, spawn letters |
//! | `fluid_force_system`         | Update   | Buoyancy, current and speed cap           |
//! | `letter_pick_system`         | Update   | Append picks to the selection and check the word |
//! | `celebration_system`         | Update   | Scatter letters and start the flash       |
//! | `manual_action_system`       | Update   | Reset / change-word requests              |
//! | `advance_word_system`        | Update   | Move on to the next word after the delay  |
//! | `flash_timer_system`         | Update   | Expire the brightness flash               |
//!
//! Input and HUD plugins only ever talk to this module through messages, so
//! the whole rules loop runs headless in tests.

use crate::config::GameConfig;
use crate::fluid::fluid_force_system;
use crate::letters::{rebuild_letters, spawn_letter_set, Letter};
use crate::selection::{evaluate_selection, Selection, WordMatch};
use crate::words::WordBank;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Current target word and score.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SoupGame {
    /// The word the player must spell.
    pub target: String,
    /// Words found since the last reset.
    pub score: u32,
}

/// Countdown to the next word after a successful spell; `None` when idle.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingAdvance(pub Option<Timer>);

impl PendingAdvance {
    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }
}

/// Brightness flash after a completed word.
#[derive(Resource, Debug, Clone, Default)]
pub struct Flash(pub Option<Timer>);

impl Flash {
    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// Multiplier for broth colours this frame.
    pub fn brightness(&self, config: &GameConfig) -> f32 {
        if self.is_active() {
            config.flash_brightness
        } else {
            1.0
        }
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// The player started dragging a letter.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterPicked(pub Entity);

/// Rebuild the bowl for the current word and zero the score.
#[derive(Message, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetRequested;

/// Switch to a different random word.
#[derive(Message, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeWordRequested;

/// Emitted once per correctly spelled word.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct WordCompleted {
    pub word: String,
    pub score: u32,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Startup ordering: config must be final before the world is built.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoupSetup {
    Config,
    World,
}

/// Everything that decides what happens, nothing that draws it.
pub struct SoupGamePlugin;

impl Plugin for SoupGamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<SoupGame>()
            .init_resource::<Selection>()
            .init_resource::<PendingAdvance>()
            .init_resource::<Flash>()
            .add_message::<LetterPicked>()
            .add_message::<ResetRequested>()
            .add_message::<ChangeWordRequested>()
            .add_message::<WordCompleted>()
            .configure_sets(Startup, (SoupSetup::Config, SoupSetup::World).chain())
            .add_systems(Startup, setup_game.in_set(SoupSetup::World))
            .add_systems(
                Update,
                (
                    fluid_force_system,
                    letter_pick_system,
                    celebration_system,
                    manual_action_system,
                    advance_word_system,
                    flash_timer_system,
                )
                    .chain(),
            );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Build the word bank, pick the opening word and fill the bowl.
///
/// A bad word list in the config falls back to the built-in words.
pub fn setup_game(mut commands: Commands, config: Res<GameConfig>, mut game: ResMut<SoupGame>) {
    let bank = WordBank::from_config(&config).unwrap_or_else(|err| {
        warn!("{err}; falling back to built-in words");
        WordBank::default()
    });

    game.target = bank.first().to_string();
    game.score = 0;

    let mut rng = rand::thread_rng();
    let spawned = spawn_letter_set(&mut commands, &game.target, &config, &mut rng);
    info!(
        "[SETUP] Target '{}' with {} letters in the bowl",
        game.target,
        spawned.len()
    );

    commands.insert_resource(bank);
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Append each newly picked letter to the selection and check the word.
///
/// Picks are ignored while a completed word is waiting to advance.
pub fn letter_pick_system(
    mut picks: MessageReader<LetterPicked>,
    mut completed: MessageWriter<WordCompleted>,
    letters: Query<&Letter>,
    mut selection: ResMut<Selection>,
    mut game: ResMut<SoupGame>,
    mut pending: ResMut<PendingAdvance>,
    config: Res<GameConfig>,
) {
    for LetterPicked(entity) in picks.read() {
        if pending.is_active() || letters.get(*entity).is_err() {
            continue;
        }
        if !selection.push(*entity) {
            continue;
        }

        let formed = selection.formed_word(|e| letters.get(e).ok().map(|l| l.glyph));
        match evaluate_selection(&formed, &game.target) {
            WordMatch::Complete => {
                game.score += 1;
                info!("Spelled '{}' (score {})", formed, game.score);
                completed.write(WordCompleted {
                    word: formed,
                    score: game.score,
                });
                pending.0 = Some(Timer::from_seconds(
                    config.advance_delay_secs,
                    TimerMode::Once,
                ));
            }
            WordMatch::Overlong => {
                info!("'{}' does not spell '{}'; selection cleared", formed, game.target);
                selection.clear();
            }
            WordMatch::Partial => {}
        }
    }
}

/// Kick every letter in a random direction and start the flash.
pub fn celebration_system(
    mut completed: MessageReader<WordCompleted>,
    mut letters: Query<&mut ExternalImpulse, With<Letter>>,
    mut flash: ResMut<Flash>,
    config: Res<GameConfig>,
) {
    if completed.read().last().is_none() {
        return;
    }

    let mut rng = rand::thread_rng();
    let kick = config.celebration_speed * config.letter_mass();
    for mut impulse in letters.iter_mut() {
        let dir = Vec2::from_angle(rng.gen_range(0.0..TAU));
        impulse.impulse += dir * kick;
    }
    flash.0 = Some(Timer::from_seconds(config.flash_secs, TimerMode::Once));
}

/// Handle the Reset and Change-word actions.
#[allow(clippy::too_many_arguments)]
pub fn manual_action_system(
    mut commands: Commands,
    mut resets: MessageReader<ResetRequested>,
    mut changes: MessageReader<ChangeWordRequested>,
    letters: Query<Entity, With<Letter>>,
    bank: Option<Res<WordBank>>,
    mut game: ResMut<SoupGame>,
    mut selection: ResMut<Selection>,
    mut pending: ResMut<PendingAdvance>,
    config: Res<GameConfig>,
) {
    let reset = resets.read().count() > 0;
    let change = changes.read().count() > 0;
    if !reset && !change {
        return;
    }

    let mut rng = rand::thread_rng();
    if change {
        if let Some(bank) = bank.as_deref() {
            game.target = bank.pick_next(&game.target, &mut rng);
        }
        info!("Target changed to '{}'", game.target);
    }
    if reset {
        game.score = 0;
        info!("Game reset");
    }

    selection.clear();
    pending.0 = None;
    rebuild_letters(&mut commands, letters.iter(), &game.target, &config, &mut rng);
}

/// After the celebration delay, clear the selection and move to a new word.
#[allow(clippy::too_many_arguments)]
pub fn advance_word_system(
    mut commands: Commands,
    time: Res<Time>,
    letters: Query<Entity, With<Letter>>,
    bank: Option<Res<WordBank>>,
    mut game: ResMut<SoupGame>,
    mut selection: ResMut<Selection>,
    mut pending: ResMut<PendingAdvance>,
    config: Res<GameConfig>,
) {
    let Some(timer) = pending.0.as_mut() else {
        return;
    };
    timer.tick(time.delta());
    if !timer.is_finished() {
        return;
    }
    pending.0 = None;

    let mut rng = rand::thread_rng();
    if let Some(bank) = bank.as_deref() {
        game.target = bank.pick_next(&game.target, &mut rng);
    }
    selection.clear();
    rebuild_letters(&mut commands, letters.iter(), &game.target, &config, &mut rng);
    info!("Next word: '{}'", game.target);
}

pub fn flash_timer_system(time: Res<Time>, mut flash: ResMut<Flash>) {
    // Only touch the resource mutably while a flash runs; the broth visual
    // redraws on change.
    if !flash.is_active() {
        return;
    }
    let done = flash
        .0
        .as_mut()
        .is_some_and(|timer| timer.tick(time.delta()).is_finished());
    if done {
        flash.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(config: GameConfig) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.add_plugins(SoupGamePlugin);
        app.update();
        app
    }

    #[test]
    fn flash_brightness_only_while_active() {
        let config = GameConfig::default();
        let mut flash = Flash::default();
        assert_eq!(flash.brightness(&config), 1.0);
        flash.0 = Some(Timer::from_seconds(0.2, TimerMode::Once));
        assert_eq!(flash.brightness(&config), config.flash_brightness);
    }

    #[test]
    fn startup_uses_first_configured_word() {
        let app = test_app(GameConfig {
            words: vec!["caldo".into(), "sopa".into()],
            ..Default::default()
        });
        assert_eq!(app.world().resource::<SoupGame>().target, "CALDO");
    }

    #[test]
    fn picks_for_unknown_entities_are_ignored() {
        let mut app = test_app(GameConfig::default());
        let stray = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(LetterPicked(stray));
        app.update();
        assert!(app.world().resource::<Selection>().is_empty());
    }

    #[derive(Resource, Default)]
    struct FlashChanges(u32);

    fn count_flash_changes(flash: Res<Flash>, mut changes: ResMut<FlashChanges>) {
        if flash.is_changed() {
            changes.0 += 1;
        }
    }

    #[test]
    fn idle_flash_is_left_unchanged() {
        let mut app = test_app(GameConfig::default());
        app.init_resource::<FlashChanges>();
        app.add_systems(Update, count_flash_changes.after(flash_timer_system));
        app.update();
        app.world_mut().resource_mut::<FlashChanges>().0 = 0;

        for _ in 0..3 {
            app.update();
        }
        assert_eq!(app.world().resource::<FlashChanges>().0, 0);
    }

    #[test]
    fn flash_expires() {
        let mut app = test_app(GameConfig {
            flash_secs: 0.0,
            ..Default::default()
        });
        app.world_mut().resource_mut::<Flash>().0 =
            Some(Timer::from_seconds(0.0, TimerMode::Once));
        app.update();
        assert!(!app.world().resource::<Flash>().is_active());
    }
}

//! Score / target-word HUD and the Reset and Change-word buttons.
//!
//! ## Systems (registered by `HudPlugin`)
//!
//! | System               | Schedule | Purpose                                  |
//! |----------------------|----------|------------------------------------------|
//! | `setup_hud`          | Startup  | Spawn text nodes and buttons             |
//! | `hud_text_system`    | Update   | Refresh score and target on change       |
//! | `hud_button_system`  | Update   | Turn clicks into game messages           |

use crate::config::GameConfig;
use crate::game::{ChangeWordRequested, ResetRequested, SoupGame, SoupSetup};
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Component markers ─────────────────────────────────────────────────────────

#[derive(Component)]
pub struct HudScoreText;

#[derive(Component)]
pub struct HudTargetText;

/// Tags a HUD button with the action it triggers.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum HudButton {
    Reset,
    ChangeWord,
}

impl HudButton {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::ChangeWord => "CHANGE WORD",
        }
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn button_bg() -> Color {
    Color::srgb(0.40, 0.26, 0.13)
}
fn button_border() -> Color {
    Color::srgb(0.85, 0.65, 0.13)
}
fn button_text() -> Color {
    Color::srgb(1.0, 0.95, 0.80)
}
fn title_color() -> Color {
    Color::srgb(1.0, 0.84, 0.0)
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud.after(SoupSetup::World))
            .add_systems(Update, (hud_button_system, hud_text_system));
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the HUD: target word and score top-left, buttons top-right.
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>, game: Res<SoupGame>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(target_label(&game.target)),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(title_color()),
                HudTargetText,
            ));
            parent.spawn((
                Text::new(score_label(game.score)),
                TextFont {
                    font_size: config.hud_font_size * 0.8,
                    ..default()
                },
                TextColor(button_text()),
                HudScoreText,
            ));
        });

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            right: Val::Px(12.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            hud_button(parent, HudButton::Reset);
            hud_button(parent, HudButton::ChangeWord);
        });
}

fn hud_button(parent: &mut ChildSpawnerCommands<'_>, action: HudButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(160.0),
                height: Val::Px(38.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(button_bg()),
            BorderColor::all(button_border()),
            action,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(action.label()),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(button_text()),
            ));
        });
}

pub fn target_label(target: &str) -> String {
    format!("Word: {target}")
}

pub fn score_label(score: u32) -> String {
    format!("Found: {score}")
}

// ── Update ────────────────────────────────────────────────────────────────────

pub fn hud_text_system(
    game: Res<SoupGame>,
    mut score_text: Query<&mut Text, (With<HudScoreText>, Without<HudTargetText>)>,
    mut target_text: Query<&mut Text, (With<HudTargetText>, Without<HudScoreText>)>,
) {
    if !game.is_changed() {
        return;
    }
    for mut text in score_text.iter_mut() {
        *text = Text::new(score_label(game.score));
    }
    for mut text in target_text.iter_mut() {
        *text = Text::new(target_label(&game.target));
    }
}

/// Tint on hover, fire the matching message on press.
#[allow(clippy::type_complexity)]
pub fn hud_button_system(
    buttons: Query<(&Interaction, &HudButton, &Children), (Changed<Interaction>, With<Button>)>,
    mut btn_text: Query<&mut TextColor>,
    mut resets: MessageWriter<ResetRequested>,
    mut changes: MessageWriter<ChangeWordRequested>,
) {
    for (interaction, action, children) in buttons.iter() {
        let tint = match interaction {
            Interaction::Pressed => {
                match action {
                    HudButton::Reset => {
                        resets.write(ResetRequested);
                    }
                    HudButton::ChangeWord => {
                        changes.write(ChangeWordRequested);
                    }
                }
                Color::WHITE
            }
            Interaction::Hovered => Color::WHITE,
            Interaction::None => button_text(),
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = TextColor(tint);
            }
        }
    }
}

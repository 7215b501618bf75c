//! Ordered letter selection and word-match evaluation.

use crate::words::word_len;
use bevy::prelude::*;

/// Letters the player has picked this attempt, in pick order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    picked: Vec<Entity>,
}

impl Selection {
    /// Append `entity`; returns `false` (and changes nothing) if it was already picked.
    pub fn push(&mut self, entity: Entity) -> bool {
        if self.picked.contains(&entity) {
            return false;
        }
        self.picked.push(entity);
        true
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.picked.contains(&entity)
    }

    /// 1-based pick order of `entity`, as shown on the order badge.
    pub fn order_of(&self, entity: Entity) -> Option<usize> {
        self.picked.iter().position(|e| *e == entity).map(|i| i + 1)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.picked
    }

    /// Concatenate the glyphs of the picked letters; entities `glyph_of`
    /// cannot resolve are skipped.
    pub fn formed_word(&self, mut glyph_of: impl FnMut(Entity) -> Option<char>) -> String {
        self.picked.iter().filter_map(|e| glyph_of(*e)).collect()
    }
}

/// Outcome of comparing the formed word with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMatch {
    /// The selection spells the target exactly.
    Complete,
    /// The selection is as long as the target (or longer) and does not match.
    Overlong,
    /// Still shorter than the target; keep picking.
    Partial,
}

/// Compare `formed` with `target`.  Only length and equality are checked;
/// a wrong prefix is not rejected early.
pub fn evaluate_selection(formed: &str, target: &str) -> WordMatch {
    if formed == target {
        WordMatch::Complete
    } else if word_len(formed) >= word_len(target) {
        WordMatch::Overlong
    } else {
        WordMatch::Partial
    }
}

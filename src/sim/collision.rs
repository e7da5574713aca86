//! Hit detection between the cat and the roaming lights
//!
//! The cat never moves: collision is a plain Euclidean distance check against
//! the play-field center, with a small tolerance so a grazing overlap of the
//! light's soft rim does not count as contact.

use glam::Vec2;

use super::state::Light;
use crate::consts::{CAT_RADIUS, TOUCH_TOLERANCE};

/// True if the light overlaps the cat's collision circle.
///
/// The anchor is the field center - the cat glyph is drawn slightly below it,
/// but contact has always been measured from the center.
#[inline]
pub fn light_touches_cat(light: &Light, anchor: Vec2) -> bool {
    light.pos.distance(anchor) < light.radius + CAT_RADIUS - TOUCH_TOLERANCE
}

use bevy::prelude::*;

use crate::constants::scene::AXES_LENGTH;

/// World axes helper through the origin.
pub fn draw_axes(mut gizmos: Gizmos) {
    gizmos.axes(Transform::IDENTITY, AXES_LENGTH);
}

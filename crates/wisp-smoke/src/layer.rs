//! Per-frame layer resolution for smoke sprites

use crate::collab::StructureMap;
use wisp_core::{Circle, Layer, Vec2};

/// Pick the render layer for a particle at `pos` on `layer`, as seen by a
/// viewer on `viewer`.
///
/// Visible smoke is lifted onto the top layer unless the viewer is on the
/// stairs and the puff sits inside a structure. Ground smoke is always
/// lifted, so it stays visible from the stairs above a cellar roof.
pub fn resolve_layer(layer: Layer, pos: Vec2, viewer: Layer, map: &impl StructureMap) -> Layer {
    let visible = layer.same_layer(viewer) || viewer.is_top();
    let unoccluded = layer == Layer::GROUND
        || !viewer.is_top()
        || !map.inside_structure_mask(&Circle::new(pos, 1.0));

    if visible && unoccluded {
        layer | Layer::TOP
    } else {
        layer
    }
}

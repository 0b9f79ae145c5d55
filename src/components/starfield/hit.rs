use super::types::{Point, RenderEntity};

/// Topmost entity under `pointer`, searching in reverse draw order.
pub fn find_hovered(pointer: Point, visible: &[RenderEntity], padding: f64) -> Option<&RenderEntity> {
	visible
		.iter()
		.rev()
		.find(|e| e.screen.distance(pointer) < e.radius + padding)
}

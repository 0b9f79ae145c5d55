use std::collections::HashMap;
use std::f64::consts::TAU;

use super::types::{Point, RenderEntity};

fn cell(p: Point) -> (i64, i64) {
	(p.x.round() as i64, p.y.round() as i64)
}

/// Spreads entities whose anchors share a grid cell evenly around a ring.
///
/// The ring is centred on the first member's anchor; the slot follows input
/// order. Singletons keep their position. Output order matches input order.
pub fn resolve(mut entities: Vec<RenderEntity>, radius: f64) -> Vec<RenderEntity> {
	let mut cells: Vec<Vec<usize>> = Vec::new();
	let mut index: HashMap<(i64, i64), usize> = HashMap::new();
	for (i, e) in entities.iter().enumerate() {
		let slot = *index.entry(cell(e.anchor)).or_insert_with(|| {
			cells.push(Vec::new());
			cells.len() - 1
		});
		cells[slot].push(i);
	}

	for members in cells.iter().filter(|m| m.len() > 1) {
		let center = entities[members[0]].anchor;
		let n = members.len() as f64;
		for (k, &i) in members.iter().enumerate() {
			let angle = TAU * k as f64 / n;
			entities[i].position = Point::new(
				center.x + radius * angle.cos(),
				center.y + radius * angle.sin(),
			);
		}
	}
	entities
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;
	use std::rc::Rc;

	use proptest::prelude::*;

	use super::*;
	use crate::components::starfield::palette::DEFAULT_COLOR;
	use crate::components::starfield::types::ContentEntity;

	fn at(id: &str, anchor: Point, jitter: f64) -> RenderEntity {
		RenderEntity {
			source: Rc::new(ContentEntity::new(id, 2020)),
			anchor,
			position: Point::new(anchor.x + jitter, anchor.y - jitter),
			screen: anchor,
			visual_size: 6.0,
			radius: 6.0,
			brightness: 1.0,
			primary: DEFAULT_COLOR,
			secondary: DEFAULT_COLOR,
		}
	}

	#[test]
	fn singletons_are_untouched() {
		let input = vec![
			at("a", Point::new(10.0, 10.0), 0.7),
			at("b", Point::new(40.0, 10.0), -0.3),
		];
		let expected: Vec<Point> = input.iter().map(|e| e.position).collect();
		let out = resolve(input, 1.5);
		assert_eq!(out.iter().map(|e| e.position).collect::<Vec<_>>(), expected);
	}

	#[test]
	fn pair_sits_on_opposite_sides() {
		let center = Point::new(30.0, 32.5);
		let out = resolve(vec![at("1", center, 0.2), at("2", center, -1.1)], 1.5);
		assert_eq!(out[0].id(), "1");
		assert!((out[0].position.x - (center.x + 1.5)).abs() < 1e-9);
		assert!((out[0].position.y - center.y).abs() < 1e-9);
		assert!((out[1].position.x - (center.x - 1.5)).abs() < 1e-9);
		assert!((out[1].position.y - center.y).abs() < 1e-9);
		assert!((out[0].position.distance(out[1].position) - 3.0).abs() < 1e-9);
	}

	#[test]
	fn near_anchors_in_one_cell_share_a_ring() {
		let out = resolve(
			vec![
				at("1", Point::new(20.1, 20.2), 0.0),
				at("2", Point::new(19.8, 19.9), 0.0),
			],
			2.0,
		);
		let center = Point::new(20.1, 20.2);
		for e in &out {
			assert!((e.position.distance(center) - 2.0).abs() < 1e-9);
		}
	}

	#[test]
	fn resolving_twice_changes_nothing() {
		let center = Point::new(50.0, 50.0);
		let input = vec![at("1", center, 0.0), at("2", center, 0.0), at("3", center, 0.0)];
		let once = resolve(input, 1.5);
		let once_pos: Vec<Point> = once.iter().map(|e| e.position).collect();
		let twice = resolve(once, 1.5);
		assert_eq!(twice.iter().map(|e| e.position).collect::<Vec<_>>(), once_pos);
	}

	proptest! {
		#[test]
		fn ring_is_even_and_exact(n in 2usize..12, radius in 0.5f64..5.0) {
			let center = Point::new(42.0, 17.0);
			let input: Vec<_> = (0..n).map(|i| at(&i.to_string(), center, 0.0)).collect();
			let out = resolve(input, radius);
			for (i, e) in out.iter().enumerate() {
				prop_assert!((e.position.distance(center) - radius).abs() < 1e-9);
				let angle = (e.position.y - center.y).atan2(e.position.x - center.x).rem_euclid(2.0 * PI);
				let expected = 2.0 * PI * i as f64 / n as f64;
				let diff = (angle - expected).abs();
				prop_assert!(diff < 1e-9 || (2.0 * PI - diff) < 1e-9);
			}
			for i in 0..n {
				for j in (i + 1)..n {
					prop_assert!(out[i].position.distance(out[j].position) > 1e-6);
				}
			}
		}
	}
}

use std::rc::Rc;

use super::types::{ContentEntity, Filters, TimeRange};

/// Keeps entities inside the time range that match the active filters, in input order.
pub fn filter(
	entities: &[Rc<ContentEntity>],
	filters: &Filters,
	range: TimeRange,
	fallback_year: i32,
) -> Vec<Rc<ContentEntity>> {
	entities
		.iter()
		.filter(|e| passes(e, filters, range, fallback_year))
		.cloned()
		.collect()
}

pub fn passes(entity: &ContentEntity, filters: &Filters, range: TimeRange, fallback_year: i32) -> bool {
	range.contains(entity.year_or(fallback_year))
		&& filters
			.group
			.as_deref()
			.is_none_or(|g| entity.group_name() == g)
		&& filters
			.category
			.as_deref()
			.is_none_or(|c| entity.category.as_deref() == Some(c))
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn shared(entities: Vec<ContentEntity>) -> Vec<Rc<ContentEntity>> {
		entities.into_iter().map(Rc::new).collect()
	}

	#[test]
	fn range_bounds_are_inclusive() {
		let range = TimeRange::new(2015, 2035);
		let all = shared(vec![
			ContentEntity::new("a", 2014),
			ContentEntity::new("b", 2015),
			ContentEntity::new("c", 2035),
			ContentEntity::new("d", 2036),
		]);
		let kept: Vec<_> = filter(&all, &Filters::default(), range, 2025)
			.iter()
			.map(|e| e.id.clone())
			.collect();
		assert_eq!(kept, ["b", "c"]);
	}

	#[test]
	fn group_and_category_must_both_match() {
		let all = shared(vec![
			ContentEntity::new("1", 2020).with_group("A").with_category("moment"),
			ContentEntity::new("2", 2020).with_group("A").with_category("culture"),
			ContentEntity::new("3", 2020).with_group("B").with_category("moment"),
		]);
		let filters = Filters {
			category: Some("moment".into()),
			group: Some("A".into()),
		};
		let kept = filter(&all, &filters, TimeRange::default(), 2025);
		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].id, "1");
	}

	#[test]
	fn missing_fields_use_defaults() {
		let all = shared(vec![ContentEntity {
			id: "x".into(),
			..Default::default()
		}]);
		let other = Filters {
			group: Some("other".into()),
			..Default::default()
		};
		assert_eq!(filter(&all, &other, TimeRange::new(2020, 2030), 2025).len(), 1);
		assert!(filter(&all, &other, TimeRange::new(2020, 2024), 2025).is_empty());
		let moment = Filters {
			category: Some("moment".into()),
			..Default::default()
		};
		assert!(filter(&all, &moment, TimeRange::new(2020, 2030), 2025).is_empty());
	}

	fn entity_strategy() -> impl Strategy<Value = ContentEntity> {
		(
			0u32..1000,
			2005i32..2045,
			prop::sample::select(vec!["A", "B", "C"]),
			prop::sample::select(vec!["moment", "culture", "history"]),
		)
			.prop_map(|(id, year, group, category)| {
				ContentEntity::new(id.to_string(), year)
					.with_group(group)
					.with_category(category)
			})
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(64))]

		#[test]
		fn output_is_exactly_the_matching_subsequence(
			entities in prop::collection::vec(entity_strategy(), 0..40),
			start in 2010i32..2030,
			len in 0i32..15,
			group in prop::option::of(prop::sample::select(vec!["A", "B", "Z"])),
			category in prop::option::of(prop::sample::select(vec!["moment", "history"])),
		) {
			let range = TimeRange::new(start, start + len);
			let filters = Filters {
				category: category.map(str::to_owned),
				group: group.map(str::to_owned),
			};
			let all = shared(entities);
			let kept = filter(&all, &filters, range, 2025);

			let expected: Vec<_> = all
				.iter()
				.filter(|e| {
					let year = e.year.unwrap_or(2025);
					year >= range.start
						&& year <= range.end
						&& filters.group.as_ref().is_none_or(|g| e.group.as_ref() == Some(g))
						&& filters.category.as_ref().is_none_or(|c| e.category.as_ref() == Some(c))
				})
				.cloned()
				.collect();
			prop_assert_eq!(kept, expected);
		}
	}
}

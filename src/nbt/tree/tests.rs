use crate::nbt::{Tag, TagKind, TagList, Value, Visit, filter, filter_inplace, find, find_by_name, find_mut, map, size, try_clone, visit};

fn level() -> Tag {
	Tag::named(
		"Level",
		Value::Compound(vec![
			Tag::named("SpawnX", Value::Int(10)),
			Tag::named(
				"Player",
				Value::Compound(vec![
					Tag::named("Health", Value::Short(20)),
					Tag::named(
						"Pos",
						Value::List(TagList::new(vec![
							Tag::unnamed(Value::Double(1.0)),
							Tag::unnamed(Value::Double(64.0)),
							Tag::unnamed(Value::Double(-3.5)),
						])),
					),
				]),
			),
			Tag::named("LevelName", Value::String("world".into())),
			Tag::named("Seed", Value::ByteArray(vec![1, 2, 3])),
		]),
	)
}

fn names(tree: &Tag) -> Vec<String> {
	let mut out = Vec::new();
	visit(tree, |node| {
		out.push(node.name_str().into_owned());
		true
	});
	out
}

#[test]
fn size_counts_containers_and_leaves() {
	let tree = level();
	assert_eq!(size(&tree), 10);
	assert_eq!(size(&Tag::named("x", Value::Int(0))), 1);
	assert_eq!(size(&Tag::named("e", Value::Compound(Vec::new()))), 1);
}

#[test]
fn try_clone_is_deep_and_independent() {
	let tree = level();
	let mut copy = try_clone(&tree).expect("clone succeeds");
	assert_eq!(copy, tree);

	if let Some(Value::ByteArray(bytes)) = copy.get_mut("Seed").map(|tag| &mut tag.value) {
		bytes[0] = 99;
	}
	let Some(Value::ByteArray(original)) = tree.get("Seed").map(|tag| &tag.value) else {
		panic!("seed exists");
	};
	assert_eq!(original, &vec![1, 2, 3]);
	assert_ne!(copy, tree);
}

#[test]
fn visit_is_pre_order_and_short_circuits() {
	let tree = level();
	assert_eq!(names(&tree), ["Level", "SpawnX", "Player", "Health", "Pos", "", "", "", "LevelName", "Seed"]);

	let mut seen = Vec::new();
	let finished = visit(&tree, |node| {
		seen.push(node.name_str().into_owned());
		node.name_str() != "Health"
	});
	assert!(!finished);
	assert_eq!(seen, ["Level", "SpawnX", "Player", "Health"]);
}

#[test]
fn map_mutates_in_pre_order() {
	let mut tree = level();
	let finished = map(&mut tree, |node| {
		if let Value::Double(v) = &mut node.value {
			*v *= 2.0;
		}
		Visit::Continue
	});
	assert!(finished);

	let pos = find_by_name(&tree, "Pos").expect("pos exists");
	let values: Vec<_> = pos.children().iter().map(|item| item.value.clone()).collect();
	assert_eq!(values, [Value::Double(2.0), Value::Double(128.0), Value::Double(-7.0)]);
}

#[test]
fn map_stop_skips_remaining_siblings_and_ancestors() {
	let mut tree = level();
	let mut visited = 0;
	let finished = map(&mut tree, |node| {
		visited += 1;
		if node.name_str() == "Health" {
			return Visit::Stop;
		}
		if let Value::Int(v) = &mut node.value {
			*v = 0;
		}
		Visit::Continue
	});

	assert!(!finished);
	assert_eq!(visited, 4);
	assert_eq!(tree.get("SpawnX").expect("spawn exists").value, Value::Int(0));
}

#[test]
fn map_remove_detaches_subtree_without_visiting_it() {
	let mut tree = level();
	let mut seen = Vec::new();
	let finished = map(&mut tree, |node| {
		seen.push(node.name_str().into_owned());
		if node.name_str() == "Player" { Visit::Remove } else { Visit::Continue }
	});

	assert!(finished);
	assert_eq!(seen, ["Level", "SpawnX", "Player", "LevelName", "Seed"]);
	assert!(tree.get("Player").is_none());
	assert_eq!(size(&tree), 4);
}

#[test]
fn map_remove_at_root_only_skips_descendants() {
	let mut tree = level();
	let mut visited = 0;
	assert!(map(&mut tree, |_| {
		visited += 1;
		Visit::Remove
	}));
	assert_eq!(visited, 1);
	assert_eq!(tree, level());
}

#[test]
fn find_returns_first_pre_order_match() {
	let tree = level();
	let first_double = find(&tree, |node| node.kind() == TagKind::Double).expect("a double exists");
	assert_eq!(first_double.value, Value::Double(1.0));

	assert!(find(&tree, |_| false).is_none());
	assert_eq!(find(&tree, |_| true).expect("root matches"), &tree);
}

#[test]
fn find_stops_at_first_success() {
	let tree = level();
	let mut calls = 0;
	let found = find(&tree, |node| {
		calls += 1;
		node.kind() == TagKind::Short
	});
	assert!(found.is_some());
	assert_eq!(calls, 4);
}

#[test]
fn find_mut_allows_editing_the_match() {
	let mut tree = level();
	let health = find_mut(&mut tree, |node| node.name_str() == "Health").expect("health exists");
	health.value = Value::Short(5);
	assert_eq!(find_by_name(&tree, "Health").expect("still there").value, Value::Short(5));
}

#[test]
fn filter_always_true_is_a_deep_copy() {
	let tree = level();
	let copy = filter(&tree, |_| true).expect("no allocation failure").expect("root kept");
	assert_eq!(copy, tree);
}

#[test]
fn filter_rejected_root_is_absent_not_an_error() {
	let tree = level();
	let out = filter(&tree, |_| false).expect("rejection is not an error");
	assert!(out.is_none());
}

#[test]
fn filter_drops_rejected_subtrees_without_probing_them() {
	let tree = level();
	let mut probed = Vec::new();
	let out = filter(&tree, |node| {
		probed.push(node.name_str().into_owned());
		node.name_str() != "Player"
	})
	.expect("no allocation failure")
	.expect("root kept");

	assert!(!probed.iter().any(|name| name == "Health"), "descendants of a rejected node are not probed");
	assert_eq!(names(&out), ["Level", "SpawnX", "LevelName", "Seed"]);
	assert_eq!(size(&tree), 10, "source is untouched");
}

#[test]
fn filter_keeps_list_kind_when_all_elements_drop() {
	let tree = level();
	let out = filter(&tree, |node| node.kind() != TagKind::Double)
		.expect("no allocation failure")
		.expect("root kept");
	let pos = find_by_name(&out, "Pos").expect("pos kept");
	assert_eq!(pos.value, Value::List(TagList::empty(TagKind::Double)));
}

#[test]
fn filter_inplace_matches_filter() {
	let keep = |node: &Tag| !matches!(node.value, Value::ByteArray(_) | Value::Short(_));
	let copied = filter(&level(), keep).expect("no allocation failure").expect("root kept");
	let pruned = filter_inplace(level(), keep).expect("root kept");
	assert_eq!(pruned, copied);
	assert!(find_by_name(&pruned, "Seed").is_none());
	assert!(find_by_name(&pruned, "Pos").is_some());
}

#[test]
fn filter_inplace_rejected_root_drops_tree() {
	assert!(filter_inplace(level(), |node| node.name_str() != "Level").is_none());
}

#[test]
fn matched_subtree_is_never_larger_than_tree() {
	let tree = level();
	let player = find_by_name(&tree, "Player").expect("player exists");
	assert_eq!(size(player), 6);
	assert!(size(&tree) >= size(player));
}

//! Property tests: completeness, uniqueness, idempotence and traversal
//! determinism over randomly shaped libraries.

use std::collections::HashSet;

use proptest::prelude::*;
use remass::metadata::{DescriptorKind, NodeDescriptor, NodeMeta};
use remass::store::{InMemoryNodeStore, NodeDescriptorStore};
use remass::tree::HierarchyBuilder;

/// Parent choice for node `i`: top level, an earlier node, or a missing id.
#[derive(Debug, Clone)]
enum ParentPick {
    Top,
    Earlier(usize),
    Missing,
}

fn parent_pick() -> impl Strategy<Value = ParentPick> {
    prop_oneof![
        2 => Just(ParentPick::Top),
        6 => any::<usize>().prop_map(ParentPick::Earlier),
        1 => Just(ParentPick::Missing),
    ]
}

/// Nodes only point at lower indices, so there are no cycles. All nodes are
/// collections so every resolved parent can hold children.
fn library(picks: &[ParentPick]) -> Vec<NodeDescriptor> {
    picks
        .iter()
        .enumerate()
        .map(|(i, pick)| {
            let mut meta = NodeMeta::synthetic(&format!("n{i}"), &format!("node {i}"));
            meta.version = 1;
            meta.parent_id = match pick {
                ParentPick::Top => None,
                ParentPick::Earlier(_) if i == 0 => None,
                ParentPick::Earlier(p) => Some(format!("n{}", p % i)),
                ParentPick::Missing => Some(format!("missing-{i}")),
            };
            NodeDescriptor {
                meta,
                kind: DescriptorKind::Collection,
            }
        })
        .collect()
}

/// True when the parent chain of `record` ends at an id that is not stored.
fn descends_from_missing(records: &[NodeDescriptor], record: &NodeDescriptor) -> bool {
    let mut current = record;
    while let Some(parent) = current.parent_id() {
        if parent.starts_with("missing-") {
            return true;
        }
        let index: usize = parent[1..].parse().unwrap();
        current = &records[index];
    }
    false
}

fn store_in_order(records: &[NodeDescriptor], order: &[usize]) -> InMemoryNodeStore {
    let mut store = InMemoryNodeStore::new();
    for &i in order {
        store.insert(records[i].clone()).unwrap();
    }
    store
}

proptest! {
    #[test]
    fn every_node_is_reachable_exactly_once(
        picks in prop::collection::vec(parent_pick(), 0..60),
        seed in any::<u64>(),
    ) {
        let records = library(&picks);
        // reversed and rotated insertion order forces forward references
        let n = records.len();
        let mut order: Vec<usize> = (0..n).rev().collect();
        if n > 0 {
            order.rotate_left((seed as usize) % n);
        }
        let store = store_in_order(&records, &order);
        let tree = HierarchyBuilder::new().build(&store).unwrap();

        let mut seen = HashSet::new();
        for (node, _) in tree.walk() {
            prop_assert!(seen.insert(node.id().to_string()), "duplicate {}", node.id());
        }
        prop_assert_eq!(seen.len(), n + 2);
        for record in &records {
            prop_assert!(seen.contains(record.id()));
        }
    }

    #[test]
    fn children_sit_under_their_resolved_parent(
        picks in prop::collection::vec(parent_pick(), 1..40),
    ) {
        let records = library(&picks);
        let order: Vec<usize> = (0..records.len()).rev().collect();
        let store = store_in_order(&records, &order);
        let tree = HierarchyBuilder::new().build(&store).unwrap();

        for record in &records {
            let path = tree.path_to(record.id()).unwrap();
            let parent = path[path.len() - 2].id();
            match record.parent_id() {
                None => prop_assert_eq!(parent, "root"),
                Some(_) if descends_from_missing(&records, record) => {
                    prop_assert_eq!(parent, "trash");
                    prop_assert!(tree.orphans().iter().any(|o| o == record.id()));
                }
                Some(p) => prop_assert_eq!(parent, p),
            }
        }
    }

    #[test]
    fn builds_and_walks_are_deterministic(
        picks in prop::collection::vec(parent_pick(), 0..40),
    ) {
        let records = library(&picks);
        let order: Vec<usize> = (0..records.len()).collect();
        let store = store_in_order(&records, &order);
        let builder = HierarchyBuilder::new();

        let first = builder.build(&store).unwrap();
        let second = builder.build(&store).unwrap();
        prop_assert_eq!(&first, &second);

        let walk_a: Vec<(String, usize)> =
            first.walk().map(|(n, d)| (n.id().to_string(), d)).collect();
        let walk_b: Vec<(String, usize)> =
            first.walk().map(|(n, d)| (n.id().to_string(), d)).collect();
        prop_assert_eq!(walk_a, walk_b);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON round trips of tree snapshots.

#![cfg(feature = "serde")]

use understory_rtree::{Aabb, Aabb2D, Node, RTree};

type Tree = RTree<(Aabb2D<f64>, String), f64, 2>;

fn grid() -> Vec<(Aabb2D<f64>, String)> {
    let mut items = Vec::new();
    for x in 0..12_u8 {
        for y in 0..12_u8 {
            let (x, y) = (f64::from(x), f64::from(y));
            items.push((Aabb::new([x, y], [x + 0.5, y + 0.5]), format!("{x}:{y}")));
        }
    }
    items
}

#[test]
fn snapshot_survives_json() {
    let mut tree = Tree::with_max_entries(8);
    tree.load(grid());

    let json = serde_json::to_string(&tree.to_snapshot()).unwrap();
    let node: Node<(Aabb2D<f64>, String), f64, 2> = serde_json::from_str(&json).unwrap();
    assert_eq!(&node, tree.root());

    let mut restored = Tree::with_max_entries(8);
    restored.from_snapshot(node);
    let query = Aabb::new([2.0, 2.0], [3.0, 3.0]);
    let mut a: Vec<_> = tree.search(&query).into_iter().map(|i| i.1.clone()).collect();
    let mut b: Vec<_> = restored.search(&query).into_iter().map(|i| i.1.clone()).collect();
    a.sort();
    b.sort();
    assert_eq!(a, b);
    assert_eq!(a.len(), 4);
}

#[test]
fn boxes_serialize_as_corner_arrays() {
    let aabb = Aabb::new([1_i64, 2, 3], [4, 5, 6]);
    let json = serde_json::to_value(aabb).unwrap();
    assert_eq!(json, serde_json::json!({ "min": [1, 2, 3], "max": [4, 5, 6] }));
    let back: Aabb<i64, 3> = serde_json::from_value(json).unwrap();
    assert_eq!(back, aabb);
}

#[test]
fn wrong_arity_is_rejected() {
    let err = serde_json::from_str::<Aabb<i64, 3>>(r#"{ "min": [1, 2], "max": [4, 5, 6] }"#);
    assert!(err.is_err());
}

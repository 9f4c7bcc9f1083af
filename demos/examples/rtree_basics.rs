// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Bulk-load 3D boxes, insert a few more, query, and remove.
//!
//! Run:
//! - `cargo run -p understory_rtree_demos --example rtree_basics`

use understory_rtree::{Aabb3D, RTree};

fn main() {
    // Boxes with a name attached; the default accessor reads the box.
    let mut tree: RTree<(Aabb3D<f64>, String), f64, 3> = RTree::with_max_entries(8);

    let mut items = Vec::new();
    for x in 0..6_u8 {
        for y in 0..6_u8 {
            let (fx, fy) = (f64::from(x) * 10.0, f64::from(y) * 10.0);
            items.push((
                Aabb3D::new([fx, fy, 0.0], [fx + 5.0, fy + 5.0, 5.0]),
                format!("crate-{x}-{y}"),
            ));
        }
    }
    tree.load(items);
    println!("loaded {} items, height {}", tree.len(), tree.height());

    // A tall box spanning the whole stack.
    tree.insert((
        Aabb3D::new([22.0, 22.0, -50.0], [23.0, 23.0, 50.0]),
        "pillar".to_string(),
    ));

    let query = Aabb3D::new([18.0, 18.0, 1.0], [31.0, 31.0, 2.0]);
    let mut names: Vec<&str> = tree
        .search(&query)
        .into_iter()
        .map(|(_, n)| n.as_str())
        .collect();
    names.sort_unstable();
    println!("search {:?} -> {:?}", query, names);
    assert_eq!(
        names,
        ["crate-2-2", "crate-2-3", "crate-3-2", "crate-3-3", "pillar"]
    );

    let empty_space = Aabb3D::new([6.0, 6.0, 0.0], [9.0, 9.0, 5.0]);
    assert!(!tree.collides(&empty_space));

    // Remove by name only; the probe box must still match the stored one.
    let probe = (Aabb3D::new([22.0, 22.0, -50.0], [23.0, 23.0, 50.0]), String::new());
    let removed = tree.take_by(&probe, |_, stored| stored.1 == "pillar");
    println!("removed {:?}", removed.map(|(_, n)| n));
    assert_eq!(tree.len(), 36);

    println!("{tree:?}");
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kurbo rectangles as items.
//!
//! With the `kurbo` feature, `kurbo::Rect` reports its own 2D box, so a tree of
//! rectangles needs no accessor setup.
//!
//! Run:
//! - `cargo run -p understory_rtree_demos --example rtree_kurbo_rects`

use kurbo::{Point, Rect};
use understory_rtree::{Aabb2D, RTree};

fn main() {
    let mut tree: RTree<Rect, f64, 2> = RTree::new();
    for row in 0..20_u8 {
        for col in 0..20_u8 {
            let origin = Point::new(f64::from(col) * 30.0, f64::from(row) * 30.0);
            tree.insert(Rect::from_origin_size(origin, (20.0, 20.0)));
        }
    }
    println!("{} rects, height {}", tree.len(), tree.height());

    // Hit-test a point by searching with a zero-area box.
    let hits = tree.search(&Aabb2D::new([95.0, 65.0], [95.0, 65.0]));
    println!("point (95, 65) hits {:?}", hits);
    assert_eq!(hits, [&Rect::new(90.0, 60.0, 110.0, 80.0)]);

    // Gutters between rects stay empty.
    assert!(!tree.collides(&Aabb2D::new([21.0, 21.0], [29.0, 29.0])));

    tree.remove(&Rect::new(90.0, 60.0, 110.0, 80.0));
    assert!(tree.search(&Aabb2D::new([95.0, 65.0], [95.0, 65.0])).is_empty());
}

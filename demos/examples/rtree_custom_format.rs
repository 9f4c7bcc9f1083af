// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom accessor format.
//!
//! Index a struct whose bounds live under its own field names, and watch the
//! tree's structural events through a `tracing` subscriber.
//!
//! Run:
//! - `RUST_LOG=understory_rtree=trace cargo run -p understory_rtree_demos --example rtree_custom_format`

use tracing_subscriber::EnvFilter;
use understory_rtree::{Aabb, ConfigError, Params, RTree};

#[derive(Clone, Debug, PartialEq)]
struct Particle {
    id: u32,
    lo: [f32; 3],
    hi: [f32; 3],
}

fn particle(id: u32) -> Particle {
    // Spread particles along a helix-ish path.
    let t = id as f32 * 0.1;
    let center = [t.cos() * 50.0, t.sin() * 50.0, t * 2.0];
    Particle {
        id,
        lo: center.map(|c| c - 0.5),
        hi: center.map(|c| c + 0.5),
    }
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = RTree::<Particle, f32, 3, _>::with_accessors(
        Params::new(12),
        &[
            |p| p.lo[0],
            |p| p.hi[0],
            |p| p.lo[1],
            |p| p.hi[1],
            |p| p.lo[2],
            |p| p.hi[2],
        ],
    )?;

    tree.load((0..500).map(particle));
    tree.load((500..503).map(particle));
    tree.load((503..1_000).map(particle));

    let slab = Aabb::new([-60.0, -60.0, 10.0], [60.0, 60.0, 12.0]);
    let mut ids: Vec<u32> = tree.search(&slab).iter().map(|p| p.id).collect();
    ids.sort_unstable();
    println!("{} particles in the slab: {:?}", ids.len(), ids);

    for id in 0..1_000 {
        tree.remove(&particle(id));
    }
    assert!(tree.is_empty());

    // A malformed accessor list is rejected up front.
    let err = RTree::<Particle, f32, 3, _>::with_accessors(Params::default(), &[|p| p.lo[0]])
        .unwrap_err();
    println!("rejected: {err}");
    Ok(())
}

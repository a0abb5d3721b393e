//! Console debug harness for the envelope engine.
//!
//! Runs a small disk scene through the contact graph, the path finder,
//! the robust hull and the outer contour with tracing enabled, so the
//! failure-branch debug events are visible.
//!
//! Usage:
//! ```text
//! cargo run --example debug
//! RUST_LOG=gyre=trace cargo run --example debug
//! ```

use gyre::math::Point2;
use gyre::{
    Chirality, ContactGraph, Disk, DiskSet, EnvelopePathFinder, HullResult, OuterContour,
    RobustDiskHull,
};

fn main() -> gyre::Result<()> {
    // Default: WARN for everything, DEBUG for gyre.
    // Override with the RUST_LOG env var.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("gyre=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut set = DiskSet::new();
    let ids = [
        set.insert(Disk::new(Point2::new(0.60, -3.78), 1.5)?),
        set.insert(Disk::new(Point2::new(-3.88, -1.25), 1.5)?),
        set.insert(Disk::new(Point2::new(-3.65, 3.16), 1.5)?),
        set.insert(Disk::new(Point2::new(4.93, -0.77), 1.5)?),
    ];

    let graph = ContactGraph::build(&set, true, &[]);
    println!(
        "contact graph: {} disks, {} edges",
        graph.disk_count(),
        graph.edges().len()
    );

    let finder = EnvelopePathFinder::new(&graph);
    let cycle = [ids[0], ids[1], ids[2], ids[3], ids[0]];
    let path = finder.find_path(&cycle, None);
    println!(
        "cycle path: {} segments, length {:.3}, chiralities {}",
        path.segments.len(),
        path.total_length,
        path.chiralities
            .iter()
            .map(|c| c.label())
            .collect::<String>()
    );

    // A flipping seam cannot be realized; this exercises the fallback
    // debug event on the way to an automatic solution.
    let pinned = [
        Chirality::Ccw,
        Chirality::Ccw,
        Chirality::Ccw,
        Chirality::Ccw,
        Chirality::Cw,
    ];
    let fallback = finder.find_path(&cycle, Some(&pinned));
    println!("pinned cycle falls back: length {:.3}", fallback.total_length);

    match RobustDiskHull::new(&set).execute() {
        HullResult::Closed(segments) => println!("hull: closed, {} segments", segments.len()),
        HullResult::Degenerate { reason, fallback } => println!(
            "hull: degenerate ({reason}), fallback polygon with {} vertices",
            fallback.len()
        ),
    }

    let contour = OuterContour::new(&set).execute();
    println!("outer contour: {} segments", contour.len());
    Ok(())
}

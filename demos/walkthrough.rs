//! Walkthrough of the polynav operations on a small floor plan.
//!
//! ```text
//! cargo run --example walkthrough
//! RUST_LOG=polynav=trace cargo run --example walkthrough
//! ```

use polynav::debug::TracingSink;
use polynav::operations::{boolean_operation, offset, FlatTip, Offset2D};
use polynav::{NavMesh, Polygon, Result, Vector};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for polynav.
    // Override with RUST_LOG env var (e.g. RUST_LOG=polynav=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("walkthrough=info".parse().unwrap_or_default())
        .add_directive("polynav=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let room = Polygon::from_tuples(&[(0.0, 0.0), (20.0, 0.0), (20.0, 12.0), (0.0, 12.0)]);
    let pillar = Polygon::from_tuples(&[(8.0, 4.0), (12.0, 4.0), (12.0, 8.0), (8.0, 8.0)]);

    // Boolean operations
    for code in ["union", "intersect", "difference"] {
        let result = boolean_operation(&room, &pillar, code)?;
        let area: f64 = result.iter().map(Polygon::signed_area).sum();
        tracing::info!(code, pieces = result.len(), area, "boolean");
    }

    // Keep walkers half a unit away from the pillar.
    let padded = offset(std::slice::from_ref(&pillar), 0.5)?;
    let chamfered = Offset2D::new(std::slice::from_ref(&pillar), 0.5)
        .tip_decorator(&FlatTip)
        .execute()?;
    tracing::info!(
        mitred = padded[0].area(),
        chamfered = chamfered[0].area(),
        "padded pillar"
    );

    // Navigation
    let mesh = NavMesh::builder(&room)
        .holes(&padded)
        .build_with_debug(&mut TracingSink)?;
    tracing::info!(cells = mesh.len(), "navigation mesh");

    let start = Vector::new(1.0, 6.0);
    let goal = Vector::new(19.0, 6.0);
    match mesh.get_path(start, goal) {
        Some(path) => {
            tracing::info!(cells = path.len(), distance = path.distance(), "path");
            tracing::info!(next = %path.next_move_to(start, goal), "first waypoint");
        }
        None => tracing::warn!("no path between {start} and {goal}"),
    }
    Ok(())
}

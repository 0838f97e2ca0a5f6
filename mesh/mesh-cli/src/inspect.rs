//! The `inspect` command.

use std::path::Path;

use anyhow::{Context, Result};
use mesh_subdivide::{SubdivisionMethod, Topology, TopologyStats};

/// Topology summary plus the size of one pass of every scheme.
fn report(stats: &TopologyStats) -> String {
    let mut lines = vec![
        stats.to_string(),
        format!(
            "closed: {}, Euler characteristic: {}",
            stats.is_closed(),
            stats.euler_characteristic()
        ),
        "one pass:".to_string(),
    ];

    for method in SubdivisionMethod::ALL {
        let mut vertices = stats.vertices;
        if method.uses_edge_points() {
            vertices += stats.edges;
        }
        if method.uses_face_points() {
            vertices += stats.faces;
        }
        lines.push(format!(
            "  {:<14} {} vertices, {} faces",
            method.name(),
            vertices,
            stats.faces * method.face_multiplier()
        ));
    }

    lines.join("\n")
}

pub fn run(input: &Path) -> Result<()> {
    let mesh = mesh_io::load_mesh(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let topology = Topology::build(&mesh)
        .with_context(|| format!("Failed to build topology for {}", input.display()))?;

    println!("{}", input.display());
    println!("{}", report(&topology.stats()));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::{single_triangle, unit_cube};

    #[test]
    fn report_lists_every_method() {
        let stats = Topology::build(&unit_cube()).unwrap().stats();
        let text = report(&stats);

        assert!(text.starts_with("8 vertices, 18 edges, 12 faces"));
        assert!(text.contains("closed: true, Euler characteristic: 2"));
        assert!(text.contains("catmull-clark  38 vertices, 72 faces"));
        assert!(text.contains("kobbelt        20 vertices, 36 faces"));
    }

    #[test]
    fn open_mesh_is_reported_open() {
        let stats = Topology::build(&single_triangle()).unwrap().stats();
        assert!(report(&stats).contains("closed: false"));
    }

    #[test]
    fn runs_on_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        mesh_io::save_mesh(&unit_cube(), &path).unwrap();
        run(&path).unwrap();
        assert!(run(&dir.path().join("absent.obj")).is_err());
    }
}

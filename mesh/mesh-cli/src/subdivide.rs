//! The `subdivide` command.

use std::path::Path;

use anyhow::{Context, Result};
use mesh_subdivide::{NullSink, PointSink, SubdivideParams, subdivide_mesh_with_sink};
use tracing::info;

use crate::SubdivideArgs;
use crate::points::JsonPointSink;

/// Read parameters from `--config` (if any), then apply the flags on top.
fn resolve_params(args: &SubdivideArgs) -> Result<SubdivideParams> {
    let mut params = match &args.config {
        Some(path) => load_config(path)?,
        None => SubdivideParams::default(),
    };

    if let Some(method) = args.method {
        params = params.with_method(method);
    }
    if let Some(iterations) = args.iterations {
        params = params.with_iterations(iterations);
    }
    if let Some(max_faces) = args.max_faces {
        params = params.with_max_faces(max_faces);
    }
    Ok(params.with_emit_points(args.points.is_some()))
}

fn load_config(path: &Path) -> Result<SubdivideParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

pub fn run(args: &SubdivideArgs) -> Result<()> {
    let params = resolve_params(args)?;

    let mesh = mesh_io::load_mesh(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    info!(
        "Loaded {}: {} vertices, {} faces",
        args.input.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );

    let mut json_sink = args.points.as_ref().map(JsonPointSink::new);
    let mut null_sink = NullSink;
    let sink: &mut dyn PointSink = match json_sink.as_mut() {
        Some(sink) => sink,
        None => &mut null_sink,
    };

    let result = subdivide_mesh_with_sink(&mesh, &params, sink)
        .with_context(|| format!("Failed to subdivide {}", args.input.display()))?;

    mesh_io::save_mesh(&result.mesh, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    if let Some(sink) = json_sink {
        let path = sink.path().to_path_buf();
        let passes = sink.finish()?;
        info!("Wrote {} pass(es) of points to {}", passes, path.display());
    }

    println!("{result}");
    println!("Wrote {}", args.output.display());
    Ok(())
}

//! Benchmarks for mesh-io operations.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

#![allow(missing_docs, clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{read_obj, read_stl, write_obj, write_stl};
use mesh_types::{IndexedMesh, Vertex};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Wavy `n x n` quad grid, two triangles per cell.
fn create_grid(n: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    for j in 0..=n {
        for i in 0..=n {
            let (x, y) = (f64::from(i) / f64::from(n), f64::from(j) / f64::from(n));
            mesh.vertices
                .push(Vertex::from_coords(x, y, (x * 7.0).sin() * (y * 5.0).cos() * 0.1));
        }
    }
    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            mesh.faces.push([a, a + 1, a + row + 1]);
            mesh.faces.push([a, a + row + 1, a + row]);
        }
    }
    mesh
}

fn encode(mesh: &IndexedMesh, format: &str) -> Vec<u8> {
    let mut out = Vec::new();
    match format {
        "stl_binary" => write_stl(mesh, &mut out, true),
        "stl_ascii" => write_stl(mesh, &mut out, false),
        _ => write_obj(mesh, &mut out),
    }
    .expect("in-memory write");
    out
}

const FORMATS: [&str; 3] = ["stl_binary", "stl_ascii", "obj"];

// =============================================================================
// I/O Benchmarks
// =============================================================================

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("Read");

    for n in [16, 64] {
        let mesh = create_grid(n);
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for format in FORMATS {
            let bytes = encode(&mesh, format);
            group.bench_with_input(BenchmarkId::new(format, n), &bytes, |b, bytes| {
                if format == "obj" {
                    b.iter(|| read_obj(black_box(bytes.as_slice())));
                } else {
                    b.iter(|| read_stl(black_box(bytes)));
                }
            });
        }
    }

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("Write");

    for n in [16, 64] {
        let mesh = create_grid(n);
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for format in FORMATS {
            group.bench_with_input(BenchmarkId::new(format, n), &mesh, |b, mesh| {
                b.iter(|| encode(black_box(mesh), format));
            });
        }
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_read, bench_write);
criterion_main!(benches);

//! Example: Load and inspect a vertex/normal mesh file.
//!
//! Run with: cargo run --example inspect_mesh -- Teapot.txt

use std::env;

use lumen_core::load_mesh;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_mesh <path-to-mesh-file>");
        println!("\nThe file holds comma-separated positions on line 1 and");
        println!("optional comma-separated vertex normals on line 2.");
        return;
    }

    let path = &args[1];
    println!("Loading mesh file: {}", path);

    match load_mesh(path) {
        Ok(mesh) => {
            let bounds = mesh.bounds();
            println!("Triangles: {}", mesh.triangle_count());
            println!("Vertices: {}", mesh.vertex_count());
            println!("Vertex normals: {}", if mesh.has_normals() { "yes" } else { "no" });
            println!("Bounds min: {:?}", bounds.min());
            println!("Bounds max: {:?}", bounds.max());
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

//! Load one matrix of every element type from a document and render them back.
//!
//! Run with: cargo run --example roundtrip [path/to/file.toml]

use std::error::Error;
use voml::{find, parse, to_value, Mat, Point3, Size};

const SAMPLE: &str = r#"
mat_u = { rows = 2, cols = 2, dt = "u", data = [0, 64, 128, 255] }
mat_c = { rows = 1, cols = 3, dt = "c", data = [-1, 0, 1] }
mat_w = { rows = 1, cols = 2, dt = "w", data = [1000, 2000] }
mat_s = { rows = 2, cols = 1, dt = "s", data = [-300, 300] }
mat_i = { rows = 2, cols = 3, dt = "i", data = [1, 2, 3, 4, 5, 6] }
mat_f = { rows = 1, cols = 2, dt = "f", data = [0.5, 1.5] }
mat_d = { rows = 1, cols = 1, dt = "d", data = [3.25] }
image = { width = 640, height = 480, dt = "i" }
origin = { x = 1.5, y = -2.0, z = 0.0, dt = "d" }
"#;

const MATRICES: [&str; 7] = ["mat_u", "mat_c", "mat_w", "mat_s", "mat_i", "mat_f", "mat_d"];

fn main() -> Result<(), Box<dyn Error>> {
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let doc = parse(&text)?;

    let mut out = toml::Table::new();
    for key in MATRICES {
        let mat: Mat = find(&doc, key)?;
        println!("{key} ({:?}, tag '{}'):\n{mat}\n", mat.depth(), mat.depth().tag());
        out.insert(key.to_string(), to_value(&mat)?);
    }

    if let Ok(image) = find::<Size<i32>>(&doc, "image") {
        println!("image: {}x{}", image.width, image.height);
        out.insert("image".to_string(), to_value(&image)?);
    }
    if let Ok(origin) = find::<Point3<f64>>(&doc, "origin") {
        println!("origin: ({}, {}, {})", origin.x, origin.y, origin.z);
        out.insert("origin".to_string(), to_value(&origin)?);
    }

    println!("================================");
    println!("{}", toml::to_string(&out)?);
    Ok(())
}

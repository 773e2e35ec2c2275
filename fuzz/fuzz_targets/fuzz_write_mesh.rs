#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use write3mf::{DocumentInfo, Mesh};

/// Mostly well-shaped rows so the writer is reached, with the odd ragged one
fn row(u: &mut Unstructured<'_>) -> Result<usize> {
    Ok(if u.ratio(1, 16)? { u.int_in_range(0..=5)? } else { 3 })
}

#[derive(Debug)]
struct FuzzRows {
    vertices: Vec<Vec<f64>>,
    faces: Vec<Vec<i64>>,
    colors: Option<Vec<Vec<f64>>>,
}

impl<'a> Arbitrary<'a> for FuzzRows {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let vertex_count = u.int_in_range(0..=64)?;
        let mut vertices = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            let len = row(u)?;
            let mut vertex = Vec::with_capacity(len);
            for _ in 0..len {
                vertex.push(u.arbitrary()?);
            }
            vertices.push(vertex);
        }

        let face_count = u.int_in_range(0..=64)?;
        let mut faces = Vec::with_capacity(face_count);
        for _ in 0..face_count {
            let len = row(u)?;
            let mut face = Vec::with_capacity(len);
            for _ in 0..len {
                face.push(u.int_in_range(-2..=vertex_count as i64 + 2)?);
            }
            faces.push(face);
        }

        let colors = if u.arbitrary()? {
            let count = if u.ratio(1, 8)? { u.int_in_range(0..=64)? } else { vertex_count };
            let mut colors = Vec::with_capacity(count);
            for _ in 0..count {
                let len = row(u)?;
                let mut color = Vec::with_capacity(len);
                for _ in 0..len {
                    color.push(u.arbitrary()?);
                }
                colors.push(color);
            }
            Some(colors)
        } else {
            None
        };

        Ok(FuzzRows {
            vertices,
            faces,
            colors,
        })
    }
}

fuzz_target!(|rows: FuzzRows| {
    // Validation may reject the rows, but nothing may panic and every
    // accepted mesh must serialize
    let Ok(mesh) = Mesh::from_rows(&rows.vertices, &rows.faces, rows.colors.as_deref()) else {
        return;
    };

    let info = DocumentInfo::new().with_creation_date("2024-01-01");
    mesh.to_writer_with(&info, Cursor::new(Vec::new()))
        .expect("accepted mesh must serialize");
});

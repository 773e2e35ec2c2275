//! Core element writing for 3MF model files
//!
//! Writes the mesh object: vertices with fixed two-decimal coordinates and
//! triangles in one of two attribute layouts.

use crate::error::{Error, Result};
use crate::model::{ColorPalette, Mesh, Triangle, Vertex};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::io::Write as IoWrite;

/// Property attributes carried by every triangle of a mesh
///
/// Chosen once per document; all triangles of a mesh use the same layout.
pub(super) enum TriangleProperties<'a> {
    /// `v1 v2 v3` only
    Plain,
    /// `v1 v2 v3 pid p1 p2 p3`, with `p*` resolved through the palette
    PerVertexColor {
        group_id: usize,
        palette: &'a ColorPalette,
    },
}

/// Write an object
pub(super) fn write_object<W: IoWrite>(
    writer: &mut Writer<W>,
    id: usize,
    mesh: &Mesh,
    properties: TriangleProperties<'_>,
) -> Result<()> {
    let mut elem = BytesStart::new("object");
    elem.push_attribute(("id", id.to_string().as_str()));
    elem.push_attribute(("type", "model"));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::xml_write(format!("Failed to write object element: {}", e)))?;

    write_mesh(writer, mesh, properties)?;

    writer
        .write_event(Event::End(BytesEnd::new("object")))
        .map_err(|e| Error::xml_write(format!("Failed to close object element: {}", e)))?;

    Ok(())
}

/// Write a mesh
pub(super) fn write_mesh<W: IoWrite>(
    writer: &mut Writer<W>,
    mesh: &Mesh,
    properties: TriangleProperties<'_>,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("mesh")))
        .map_err(|e| Error::xml_write(format!("Failed to write mesh element: {}", e)))?;

    write_vertices(writer, mesh.vertices())?;

    writer
        .write_event(Event::Start(BytesStart::new("triangles")))
        .map_err(|e| Error::xml_write(format!("Failed to write triangles element: {}", e)))?;

    match properties {
        TriangleProperties::Plain => write_plain_triangles(writer, mesh.triangles())?,
        TriangleProperties::PerVertexColor { group_id, palette } => {
            write_colored_triangles(writer, mesh.triangles(), group_id, palette)?
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("triangles")))
        .map_err(|e| Error::xml_write(format!("Failed to close triangles element: {}", e)))?;

    writer
        .write_event(Event::End(BytesEnd::new("mesh")))
        .map_err(|e| Error::xml_write(format!("Failed to close mesh element: {}", e)))?;

    Ok(())
}

fn write_vertices<W: IoWrite>(writer: &mut Writer<W>, vertices: &[Vertex]) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("vertices")))
        .map_err(|e| Error::xml_write(format!("Failed to write vertices element: {}", e)))?;

    for vertex in vertices {
        let mut v_elem = BytesStart::new("vertex");
        v_elem.push_attribute(("x", format!("{:.2}", vertex.x).as_str()));
        v_elem.push_attribute(("y", format!("{:.2}", vertex.y).as_str()));
        v_elem.push_attribute(("z", format!("{:.2}", vertex.z).as_str()));

        writer
            .write_event(Event::Empty(v_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write vertex: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("vertices")))
        .map_err(|e| Error::xml_write(format!("Failed to close vertices element: {}", e)))?;

    Ok(())
}

fn triangle_element(triangle: &Triangle) -> BytesStart<'static> {
    let mut t_elem = BytesStart::new("triangle");
    t_elem.push_attribute(("v1", triangle.v1.to_string().as_str()));
    t_elem.push_attribute(("v2", triangle.v2.to_string().as_str()));
    t_elem.push_attribute(("v3", triangle.v3.to_string().as_str()));
    t_elem
}

fn write_plain_triangles<W: IoWrite>(writer: &mut Writer<W>, triangles: &[Triangle]) -> Result<()> {
    for triangle in triangles {
        writer
            .write_event(Event::Empty(triangle_element(triangle)))
            .map_err(|e| Error::xml_write(format!("Failed to write triangle: {}", e)))?;
    }
    Ok(())
}

fn write_colored_triangles<W: IoWrite>(
    writer: &mut Writer<W>,
    triangles: &[Triangle],
    group_id: usize,
    palette: &ColorPalette,
) -> Result<()> {
    let group_id = group_id.to_string();
    let slots = palette.slots();

    for triangle in triangles {
        let mut t_elem = triangle_element(triangle);
        t_elem.push_attribute(("pid", group_id.as_str()));
        t_elem.push_attribute(("p1", slots[triangle.v1].to_string().as_str()));
        t_elem.push_attribute(("p2", slots[triangle.v2].to_string().as_str()));
        t_elem.push_attribute(("p3", slots[triangle.v3].to_string().as_str()));

        writer
            .write_event(Event::Empty(t_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write triangle: {}", e)))?;
    }
    Ok(())
}

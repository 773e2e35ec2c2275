//! XML writing for 3MF model files
//!
//! This module renders a validated [`Mesh`] into the `3D/3dmodel.model`
//! document: metadata, an optional color group, one mesh object and one
//! build item referencing it.

mod core;
mod material;

use crate::error::{Error, Result};
use crate::model::{ColorPalette, DocumentInfo, Mesh, MetadataEntry};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write as IoWrite;

use self::core::TriangleProperties;

/// 3MF core namespace
pub const CORE_NAMESPACE: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// 3MF materials and properties namespace
pub const MATERIAL_NAMESPACE: &str =
    "http://schemas.microsoft.com/3dmanufacturing/material/2015/02";

/// Resource id of the mesh object
pub const OBJECT_ID: usize = 1;

/// Resource id of the color group
pub const COLOR_GROUP_ID: usize = 2;

/// Write a mesh as a 3MF model document
///
/// `palette` must be the palette of `mesh`'s own colors; when it is `None`
/// the color group and all triangle property attributes are omitted.
pub fn write_model_xml<W: IoWrite>(
    mesh: &Mesh,
    palette: Option<&ColorPalette>,
    info: &DocumentInfo,
    writer: W,
) -> Result<()> {
    if let Some(palette) = palette {
        if palette.slots().len() != mesh.vertices().len() {
            return Err(Error::Shape(format!(
                "palette maps {} vertices but the mesh has {}",
                palette.slots().len(),
                mesh.vertices().len()
            )));
        }
    }

    let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::xml_write(format!("Failed to write XML declaration: {}", e)))?;

    let mut model_elem = BytesStart::new("model");
    model_elem.push_attribute(("unit", "millimeter"));
    model_elem.push_attribute(("xml:lang", "en-US"));
    model_elem.push_attribute(("xmlns", CORE_NAMESPACE));
    if palette.is_some() {
        model_elem.push_attribute(("xmlns:m", MATERIAL_NAMESPACE));
    }

    xml_writer
        .write_event(Event::Start(model_elem))
        .map_err(|e| Error::xml_write(format!("Failed to write model element: {}", e)))?;

    for entry in info.entries() {
        write_metadata(&mut xml_writer, &entry)?;
    }

    write_resources(&mut xml_writer, mesh, palette)?;
    write_build(&mut xml_writer)?;

    xml_writer
        .write_event(Event::End(BytesEnd::new("model")))
        .map_err(|e| Error::xml_write(format!("Failed to close model element: {}", e)))?;

    Ok(())
}

/// Render a mesh to model document text
pub fn model_xml_string(
    mesh: &Mesh,
    palette: Option<&ColorPalette>,
    info: &DocumentInfo,
) -> Result<String> {
    let mut buffer = Vec::new();
    write_model_xml(mesh, palette, info, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::xml_write(format!("Failed to convert XML to UTF-8: {}", e)))
}

/// Write a metadata entry
fn write_metadata<W: IoWrite>(writer: &mut Writer<W>, entry: &MetadataEntry) -> Result<()> {
    let mut elem = BytesStart::new("metadata");
    elem.push_attribute(("name", entry.name.as_str()));

    if let Some(preserve) = entry.preserve {
        elem.push_attribute(("preserve", if preserve { "1" } else { "0" }));
    }

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::xml_write(format!("Failed to write metadata element: {}", e)))?;

    writer
        .write_event(Event::Text(BytesText::new(&entry.value)))
        .map_err(|e| Error::xml_write(format!("Failed to write metadata value: {}", e)))?;

    writer
        .write_event(Event::End(BytesEnd::new("metadata")))
        .map_err(|e| Error::xml_write(format!("Failed to close metadata element: {}", e)))?;

    Ok(())
}

/// Write resources section
fn write_resources<W: IoWrite>(
    writer: &mut Writer<W>,
    mesh: &Mesh,
    palette: Option<&ColorPalette>,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(|e| Error::xml_write(format!("Failed to write resources element: {}", e)))?;

    let properties = match palette {
        Some(palette) => {
            material::write_color_group(writer, COLOR_GROUP_ID, palette)?;
            TriangleProperties::PerVertexColor {
                group_id: COLOR_GROUP_ID,
                palette,
            }
        }
        None => TriangleProperties::Plain,
    };

    core::write_object(writer, OBJECT_ID, mesh, properties)?;

    writer
        .write_event(Event::End(BytesEnd::new("resources")))
        .map_err(|e| Error::xml_write(format!("Failed to close resources element: {}", e)))?;

    Ok(())
}

/// Write the build section with its single item
fn write_build<W: IoWrite>(writer: &mut Writer<W>) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("build")))
        .map_err(|e| Error::xml_write(format!("Failed to write build element: {}", e)))?;

    let mut item = BytesStart::new("item");
    item.push_attribute(("objectid", OBJECT_ID.to_string().as_str()));
    writer
        .write_event(Event::Empty(item))
        .map_err(|e| Error::xml_write(format!("Failed to write build item: {}", e)))?;

    writer
        .write_event(Event::End(BytesEnd::new("build")))
        .map_err(|e| Error::xml_write(format!("Failed to close build element: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTICES: [[f64; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [10.0, 0.0, 10.0],
        [10.0, 10.0, 0.0],
        [0.0, 10.0, 10.0],
    ];
    const FACES: [[u32; 3]; 4] = [[1, 3, 4], [2, 3, 4], [1, 2, 4], [1, 4, 3]];

    fn info() -> DocumentInfo {
        DocumentInfo::new()
            .with_creation_date("2024-05-01")
            .with_description("Test & <demo>")
    }

    fn render(mesh: &Mesh) -> String {
        let palette = mesh.palette();
        model_xml_string(mesh, palette.as_ref(), &info()).unwrap()
    }

    #[test]
    fn test_write_plain_model() {
        let mesh = Mesh::from_rows(&VERTICES, &FACES, None::<&[[f64; 3]]>).unwrap();
        let xml = render(&mesh);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("unit=\"millimeter\""));
        assert!(xml.contains(&format!("xmlns=\"{}\"", CORE_NAMESPACE)));
        assert!(!xml.contains("xmlns:m"));
        assert!(!xml.contains("colorgroup"));
        assert!(!xml.contains("pid="));
        assert_eq!(xml.matches("<vertex ").count(), 4);
        assert_eq!(xml.matches("<triangle ").count(), 4);
        assert!(xml.contains("<triangle v1=\"0\" v2=\"2\" v3=\"3\"/>"));
        assert!(xml.contains("<object id=\"1\" type=\"model\">"));
        assert!(xml.contains("<item objectid=\"1\"/>"));
    }

    #[test]
    fn test_metadata_written_and_escaped() {
        let mesh = Mesh::from_rows(&VERTICES, &FACES, None::<&[[f64; 3]]>).unwrap();
        let xml = render(&mesh);

        assert!(xml.contains("<metadata name=\"CreationDate\">2024-05-01</metadata>"));
        assert!(xml.contains("<metadata name=\"Description\">Test &amp; &lt;demo&gt;</metadata>"));
        let creation = xml.find("CreationDate").unwrap();
        let description = xml.find("\"Description\"").unwrap();
        let resources = xml.find("<resources>").unwrap();
        assert!(creation < description && description < resources);
    }

    #[test]
    fn test_preserve_flag() {
        let mesh = Mesh::from_rows(&VERTICES, &FACES, None::<&[[f64; 3]]>).unwrap();
        let mut info = info();
        info.extra
            .push(MetadataEntry::new_with_preserve("Designer", "me", true));
        let xml = model_xml_string(&mesh, None, &info).unwrap();
        assert!(xml.contains("<metadata name=\"Designer\" preserve=\"1\">me</metadata>"));
    }

    #[test]
    fn test_vertex_coordinates_have_two_decimals() {
        let vertices = [[1.0, -1.004, 123456.789], [0.126, 2.0 / 3.0, 1e-9], [5.0, 5.0, 5.0]];
        let mesh = Mesh::from_rows(&vertices, &[[1u32, 2, 3]], None::<&[[f64; 3]]>).unwrap();
        let xml = render(&mesh);

        assert!(xml.contains("<vertex x=\"1.00\" y=\"-1.00\" z=\"123456.79\"/>"));
        assert!(xml.contains("<vertex x=\"0.13\" y=\"0.67\" z=\"0.00\"/>"));
        assert!(xml.contains("<vertex x=\"5.00\" y=\"5.00\" z=\"5.00\"/>"));
    }

    #[test]
    fn test_write_colored_model() {
        let colors = [
            [255.0, 0.0, 0.0],
            [0.0, 0.0, 255.0],
            [0.0, 255.0, 0.0],
            [255.0, 255.0, 255.0],
        ];
        let mesh = Mesh::from_rows(&VERTICES, &FACES, Some(&colors[..])).unwrap();
        let xml = render(&mesh);

        assert!(xml.contains(&format!("xmlns:m=\"{}\"", MATERIAL_NAMESPACE)));
        assert!(xml.contains("<m:colorgroup id=\"2\">"));
        assert_eq!(xml.matches("<m:color ").count(), 4);
        // Palette order is 0000FF, 00FF00, FF0000, FFFFFF
        assert!(xml.contains("<m:color color=\"#0000FF\"/>"));
        assert!(xml.contains(
            "<triangle v1=\"0\" v2=\"2\" v3=\"3\" pid=\"2\" p1=\"2\" p2=\"1\" p3=\"3\"/>"
        ));
        assert!(xml.contains(
            "<triangle v1=\"1\" v2=\"2\" v3=\"3\" pid=\"2\" p1=\"0\" p2=\"1\" p3=\"3\"/>"
        ));
        assert_eq!(xml.matches("pid=\"2\"").count(), 4);

        let group = xml.find("<m:colorgroup").unwrap();
        let object = xml.find("<object").unwrap();
        assert!(group < object);
    }

    #[test]
    fn test_foreign_palette_rejected() {
        let mesh = Mesh::from_rows(&VERTICES, &FACES, None::<&[[f64; 3]]>).unwrap();
        let palette = ColorPalette::from_colors(&[[1.0, 0.0, 0.0]]);
        let err = model_xml_string(&mesh, Some(&palette), &info()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Shape);
    }

    #[test]
    fn test_duplicate_colors_collapse() {
        let colors = [[1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
        let mesh = Mesh::from_rows(&VERTICES, &FACES, Some(&colors[..])).unwrap();
        let xml = render(&mesh);

        assert_eq!(xml.matches("<m:color ").count(), 2);
        assert!(xml.contains("<m:color color=\"#FF0000\"/>"));
        assert!(xml.contains(
            "<triangle v1=\"0\" v2=\"2\" v3=\"3\" pid=\"2\" p1=\"1\" p2=\"0\" p3=\"1\"/>"
        ));
    }
}

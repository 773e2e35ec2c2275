//! Material extension writing for 3MF model files
//!
//! Only the color group is emitted; it lives in the `m:` namespace declared
//! on the model element.

use crate::error::{Error, Result};
use crate::model::ColorPalette;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::io::Write as IoWrite;

/// Write a color group resource holding every palette color, in palette order
pub(super) fn write_color_group<W: IoWrite>(
    writer: &mut Writer<W>,
    id: usize,
    palette: &ColorPalette,
) -> Result<()> {
    let mut elem = BytesStart::new("m:colorgroup");
    elem.push_attribute(("id", id.to_string().as_str()));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::xml_write(format!("Failed to write colorgroup element: {}", e)))?;

    for color in palette.colors() {
        let mut color_elem = BytesStart::new("m:color");
        color_elem.push_attribute(("color", color.to_string().as_str()));

        writer
            .write_event(Event::Empty(color_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write color: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("m:colorgroup")))
        .map_err(|e| Error::xml_write(format!("Failed to close colorgroup element: {}", e)))?;

    Ok(())
}

//! Shared helpers for opening written packages and inspecting their model

#![allow(dead_code)]

use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub const VERTICES: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [10.0, 0.0, 10.0],
    [10.0, 10.0, 0.0],
    [0.0, 10.0, 10.0],
];

pub const FACES: [[u32; 3]; 4] = [[1, 3, 4], [2, 3, 4], [1, 2, 4], [1, 4, 3]];

pub const COLORS: [[f64; 3]; 4] = [
    [255.0, 0.0, 0.0],
    [0.0, 0.0, 255.0],
    [0.0, 255.0, 0.0],
    [255.0, 255.0, 255.0],
];

pub fn no_colors() -> Option<&'static [[f64; 3]]> {
    None
}

/// An element name with its raw attribute values
pub type Element = (String, HashMap<String, String>);

/// Contents of a written package
pub struct Package {
    pub entries: Vec<String>,
    pub content_types: String,
    pub rels: String,
    pub model: String,
}

impl Package {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid ZIP archive");
        let mut entries: Vec<String> = archive.file_names().map(String::from).collect();
        entries.sort();

        let mut read = |name: &str| {
            let mut text = String::new();
            archive
                .by_name(name)
                .unwrap_or_else(|_| panic!("missing entry {}", name))
                .read_to_string(&mut text)
                .unwrap();
            text
        };

        let content_types = read("[Content_Types].xml");
        let rels = read("_rels/.rels");
        let model = read("3D/3dmodel.model");

        Self {
            entries,
            content_types,
            rels,
            model,
        }
    }

    pub fn from_file(path: &std::path::Path) -> Self {
        Self::from_bytes(std::fs::read(path).expect("package file exists"))
    }

    pub fn model_elements(&self) -> Vec<Element> {
        elements(&self.model)
    }

    pub fn elements_named(&self, name: &str) -> Vec<HashMap<String, String>> {
        self.model_elements()
            .into_iter()
            .filter(|(n, _)| n == name)
            .map(|(_, attrs)| attrs)
            .collect()
    }
}

/// Parse `xml` to the end, panicking if it is not well-formed
pub fn elements(xml: &str) -> Vec<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut found = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = std::str::from_utf8(e.name().as_ref()).unwrap().to_string();
                let attrs = e
                    .attributes()
                    .map(|attr| {
                        let attr = attr.expect("well-formed attribute");
                        (
                            std::str::from_utf8(attr.key.as_ref()).unwrap().to_string(),
                            std::str::from_utf8(&attr.value).unwrap().to_string(),
                        )
                    })
                    .collect();
                found.push((name, attrs));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("model is not well-formed XML: {}", e),
        }
        buf.clear();
    }

    found
}

/// Parse an attribute as usize
pub fn index(attrs: &HashMap<String, String>, key: &str) -> usize {
    attrs[key]
        .parse()
        .unwrap_or_else(|_| panic!("{} is not an index", key))
}

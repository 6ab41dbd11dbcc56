//! OPC package assembly.
//!
//! Parts are deflated into a ZIP archive as they are added; the
//! `[Content_Types].xml` part is written last, once every part name is known.

use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::constants::{XML_DECLARATION, content_type as ct, namespace};
use crate::common::Result;
use crate::common::xml::escape_xml;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    /// Target, relative to the source part's folder
    pub target: String,
}

/// Relationships of one source part, numbered `rId1`, `rId2`, ...
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its id.
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            id: id.clone(),
            rel_type,
            target: target.into(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Serialize as a `.rels` part.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(XML_DECLARATION);
        write!(xml, r#"<Relationships xmlns="{}">"#, namespace::RELATIONSHIPS)?;
        for rel in &self.rels {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.id,
                rel.rel_type,
                escape_xml(&rel.target)
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// Builder for `[Content_Types].xml`.
#[derive(Debug, Clone)]
struct ContentTypes {
    /// Default content types by extension
    defaults: BTreeMap<&'static str, &'static str>,
    /// Override content types by part name
    overrides: BTreeMap<String, &'static str>,
}

impl ContentTypes {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels", ct::OPC_RELATIONSHIPS);
        defaults.insert("xml", ct::XML);
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn add(&mut self, part_name: &str, content_type: &'static str) {
        let is_default = part_name
            .rsplit_once('.')
            .and_then(|(_, ext)| self.defaults.get(ext))
            .is_some_and(|default| *default == content_type);
        if !is_default {
            self.overrides.insert(format!("/{}", part_name), content_type);
        }
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECLARATION);
        write!(xml, r#"<Types xmlns="{}">"#, namespace::CONTENT_TYPES)?;
        for (ext, content_type) in &self.defaults {
            write!(xml, r#"<Default Extension="{}" ContentType="{}"/>"#, ext, content_type)?;
        }
        for (part_name, content_type) in &self.overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part_name),
                content_type
            )?;
        }
        xml.push_str("</Types>");
        Ok(xml)
    }
}

/// Streams parts into a ZIP archive.
pub struct PackageWriter<W: Write + Seek> {
    archive: ZipWriter<W>,
    options: SimpleFileOptions,
    content_types: ContentTypes,
    part_count: usize,
}

impl<W: Write + Seek> PackageWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            archive: ZipWriter::new(inner),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            content_types: ContentTypes::new(),
            part_count: 0,
        }
    }

    /// Add a part; `part_name` has no leading slash, e.g. `ppt/slides/slide1.xml`.
    pub fn add_part(&mut self, part_name: &str, content_type: &'static str, blob: &[u8]) -> Result<()> {
        self.write_member(part_name, blob)?;
        self.content_types.add(part_name, content_type);
        self.part_count += 1;
        Ok(())
    }

    /// Add the relationships of `source` (`""` for the package itself).
    pub fn add_rels(&mut self, source: &str, rels: &Relationships) -> Result<()> {
        let member = rels_member_name(source);
        self.write_member(&member, rels.to_xml()?.as_bytes())
    }

    /// Number of parts written so far, relationship parts excluded.
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    /// Write `[Content_Types].xml` and close the archive.
    pub fn finish(mut self) -> Result<W> {
        let content_types = self.content_types.to_xml()?;
        self.write_member("[Content_Types].xml", content_types.as_bytes())?;
        Ok(self.archive.finish()?)
    }

    fn write_member(&mut self, name: &str, blob: &[u8]) -> Result<()> {
        self.archive.start_file(name, self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }
}

/// The `.rels` member name for a source part name.
fn rels_member_name(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if source.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", source),
    }
}

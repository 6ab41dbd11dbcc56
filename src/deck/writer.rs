//! Persistence sink producing `.pptx` packages.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use chrono::Utc;
use tracing::info;

use super::Deck;
use super::chart_xml::write_chart;
use super::constants::{content_type as ct, relationship_type as rt};
use super::package::{PackageWriter, Relationships};
use super::parts::{self, LAYOUTS, layout_file_name};
use super::slide_xml::write_slide;
use crate::common::Result;
use crate::slide::Shape;

/// Serializes a composed deck to a named output location.
pub trait DeckSink {
    fn save(&self, deck: &Deck, path: &Path) -> Result<()>;
}

/// Writes a deck as an Office Open XML presentation.
///
/// The package holds one slide master, the two slide layouts, a theme, the
/// slides and one chart part per chart shape.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use chartdeck::deck::{Deck, DeckSink, PptxWriter};
/// use chartdeck::slide::SlideComposer;
///
/// let mut deck = Deck::default();
/// deck.push_slide(SlideComposer::default().compose_title_slide("Report", "Q3"));
/// PptxWriter::new().save(&deck, Path::new("report.pptx"))?;
/// # Ok::<(), chartdeck::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PptxWriter;

impl PptxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the deck to bytes.
    pub fn to_bytes(&self, deck: &Deck) -> Result<Vec<u8>> {
        Ok(self.write_to(Cursor::new(Vec::new()), deck)?.into_inner())
    }

    /// Serialize the deck into a seekable stream and hand the stream back.
    pub fn write_to<W: Write + Seek>(&self, writer: W, deck: &Deck) -> Result<W> {
        let mut package = PackageWriter::new(writer);

        // Package relationships
        let mut pkg_rels = Relationships::new();
        pkg_rels.add(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");
        pkg_rels.add(rt::CORE_PROPERTIES, "docProps/core.xml");
        pkg_rels.add(rt::EXTENDED_PROPERTIES, "docProps/app.xml");
        package.add_rels("", &pkg_rels)?;

        package.add_part(
            "docProps/core.xml",
            ct::OPC_CORE_PROPERTIES,
            parts::core_props_xml(deck, Utc::now())?.as_bytes(),
        )?;
        package.add_part(
            "docProps/app.xml",
            ct::OFC_EXTENDED_PROPERTIES,
            parts::app_props_xml(deck)?.as_bytes(),
        )?;

        // Presentation and its relationships
        let mut pres_rels = Relationships::new();
        let master_rel_id = pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        let slide_rel_ids: Vec<String> = (1..=deck.slide_count())
            .map(|n| pres_rels.add(rt::SLIDE, format!("slides/slide{}.xml", n)))
            .collect();
        pres_rels.add(rt::THEME, "theme/theme1.xml");
        pres_rels.add(rt::PRES_PROPS, "presProps.xml");
        pres_rels.add(rt::VIEW_PROPS, "viewProps.xml");
        pres_rels.add(rt::TABLE_STYLES, "tableStyles.xml");

        package.add_part(
            "ppt/presentation.xml",
            ct::PML_PRESENTATION_MAIN,
            parts::presentation_xml(deck, &master_rel_id, &slide_rel_ids)?.as_bytes(),
        )?;
        package.add_rels("ppt/presentation.xml", &pres_rels)?;

        package.add_part("ppt/presProps.xml", ct::PML_PRES_PROPS, parts::pres_props_xml()?.as_bytes())?;
        package.add_part("ppt/viewProps.xml", ct::PML_VIEW_PROPS, parts::view_props_xml()?.as_bytes())?;
        package.add_part(
            "ppt/tableStyles.xml",
            ct::PML_TABLE_STYLES,
            parts::table_styles_xml()?.as_bytes(),
        )?;
        package.add_part("ppt/theme/theme1.xml", ct::OFC_THEME, parts::theme_xml()?.as_bytes())?;

        // Master and layouts
        let mut master_rels = Relationships::new();
        let layout_rel_ids: Vec<String> = LAYOUTS
            .iter()
            .map(|layout| {
                master_rels.add(rt::SLIDE_LAYOUT, format!("../slideLayouts/{}", layout_file_name(*layout)))
            })
            .collect();
        master_rels.add(rt::THEME, "../theme/theme1.xml");

        package.add_part(
            "ppt/slideMasters/slideMaster1.xml",
            ct::PML_SLIDE_MASTER,
            parts::slide_master_xml(deck, &layout_rel_ids)?.as_bytes(),
        )?;
        package.add_rels("ppt/slideMasters/slideMaster1.xml", &master_rels)?;

        for layout in LAYOUTS {
            let part_name = format!("ppt/slideLayouts/{}", layout_file_name(layout));
            package.add_part(&part_name, ct::PML_SLIDE_LAYOUT, parts::slide_layout_xml(layout)?.as_bytes())?;

            let mut layout_rels = Relationships::new();
            layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
            package.add_rels(&part_name, &layout_rels)?;
        }

        // Slides and their charts; chart parts are numbered across the deck
        let mut chart_number = 0usize;
        for (index, slide) in deck.slides().iter().enumerate() {
            let part_name = format!("ppt/slides/slide{}.xml", index + 1);

            let mut slide_rels = Relationships::new();
            slide_rels.add(
                rt::SLIDE_LAYOUT,
                format!("../slideLayouts/{}", layout_file_name(slide.layout())),
            );

            let mut chart_rel_ids = Vec::new();
            for shape in slide.shapes() {
                if let Shape::Chart(chart) = shape {
                    chart_number += 1;
                    let chart_name = format!("chart{}.xml", chart_number);
                    package.add_part(
                        &format!("ppt/charts/{}", chart_name),
                        ct::DML_CHART,
                        write_chart(chart)?.as_bytes(),
                    )?;
                    chart_rel_ids.push(slide_rels.add(rt::CHART, format!("../charts/{}", chart_name)));
                }
            }

            package.add_part(&part_name, ct::PML_SLIDE, write_slide(slide, &chart_rel_ids)?.as_bytes())?;
            package.add_rels(&part_name, &slide_rels)?;
        }

        package.finish()
    }
}

impl DeckSink for PptxWriter {
    fn save(&self, deck: &Deck, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        let mut file = self.write_to(file, deck)?;
        file.flush()?;
        info!(path = %path.display(), slides = deck.slide_count(), "saved presentation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, ChartModel, Series};
    use crate::slide::SlideComposer;
    use std::io::Read;

    fn sample_deck() -> Deck {
        let composer = SlideComposer::default();
        let model = ChartModel::new(
            ChartKind::Line,
            vec!["Jan 24".into(), "Feb 24".into()],
            vec![Series::new(Some("value".into()), vec![Some(10.0), Some(20.0)])],
        )
        .unwrap();

        let mut deck = Deck::default().with_title("Report");
        deck.push_slide(composer.compose_title_slide("Report", "Sub"));
        deck.push_slide(composer.compose_chart_slide(&model, "Prices"));
        deck
    }

    fn read_member(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut text = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_package_members() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
            "ppt/charts/chart1.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {}", name);
        }
        assert!(archive.by_name("ppt/charts/chart2.xml").is_err());
    }

    #[test]
    fn test_slide_relationships() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let title_rels = read_member(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(title_rels.contains(r#"Target="../slideLayouts/slideLayout1.xml""#));
        assert!(!title_rels.contains("charts"));

        let chart_rels = read_member(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(chart_rels.contains(r#"Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml""#));
        assert!(chart_rels.contains(r#"Id="rId2""#));
        assert!(chart_rels.contains(r#"Target="../charts/chart1.xml""#));

        let slide = read_member(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide.contains(r#"r:id="rId2""#));

        let content_types = read_member(&mut archive, "[Content_Types].xml");
        assert!(content_types.contains(r#"<Override PartName="/ppt/charts/chart1.xml""#));
        assert!(content_types.contains(r#"<Override PartName="/ppt/slides/slide2.xml""#));
    }

    #[test]
    fn test_save_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        PptxWriter::new().save(&sample_deck(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deck.pptx");
        assert!(matches!(
            PptxWriter::new().save(&sample_deck(), &path),
            Err(crate::Error::Io(_))
        ));
    }
}

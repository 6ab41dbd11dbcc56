//! Presentation-level parts: presentation, master, layouts, theme and
//! document properties.

use std::fmt::Write as FmtWrite;

use chrono::{DateTime, Utc};

use super::Deck;
use super::constants::{XML_DECLARATION, namespace};
use super::slide_xml::write_group_properties;
use crate::common::Result;
use crate::common::xml::escape_xml;
use crate::slide::theme::{FONT_FACE, PALETTE};
use crate::slide::{Placeholder, SlideLayout};

/// First id of the slide master and its layouts.
const MASTER_ID: u64 = 2_147_483_648;
/// First slide id.
const FIRST_SLIDE_ID: usize = 256;

/// Layouts written to every package, in part order.
pub const LAYOUTS: [SlideLayout; 2] = [SlideLayout::Title, SlideLayout::TitleOnly];

/// Part name of a layout, e.g. `slideLayout1.xml`.
pub fn layout_file_name(layout: SlideLayout) -> String {
    let index = LAYOUTS.iter().position(|l| *l == layout).unwrap_or(0);
    format!("slideLayout{}.xml", index + 1)
}

/// `ppt/presentation.xml`. `slide_rel_ids` holds one id per slide.
pub fn presentation_xml(deck: &Deck, master_rel_id: &str, slide_rel_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(2048);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        namespace::A,
        namespace::R,
        namespace::P
    )?;

    xml.push_str("<p:sldMasterIdLst>");
    write!(xml, r#"<p:sldMasterId id="{}" r:id="{}"/>"#, MASTER_ID, master_rel_id)?;
    xml.push_str("</p:sldMasterIdLst>");

    if !slide_rel_ids.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (index, rel_id) in slide_rel_ids.iter().enumerate() {
            write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, FIRST_SLIDE_ID + index, rel_id)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        deck.width().emus(),
        deck.height().emus()
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("<p:defaultTextStyle>");
    xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
    xml.push_str("</p:defaultTextStyle>");
    xml.push_str("</p:presentation>");

    Ok(xml)
}

/// `ppt/slideMasters/slideMaster1.xml`. `layout_rel_ids` follows [`LAYOUTS`].
pub fn slide_master_xml(deck: &Deck, layout_rel_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    let width = deck.width().emus();
    let height = deck.height().emus();

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        namespace::A,
        namespace::R,
        namespace::P
    )?;
    xml.push_str("<p:cSld>");
    xml.push_str(r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    write_group_properties(&mut xml);

    // Title across the top sixth, body below it
    let margin = width / 16;
    write_master_placeholder(&mut xml, 2, "Title Placeholder 1", "title", None, [
        margin,
        height / 16,
        width - 2 * margin,
        height / 6,
    ])?;
    write_master_placeholder(&mut xml, 3, "Text Placeholder 2", "body", Some(1), [
        margin,
        height / 4,
        width - 2 * margin,
        height * 5 / 8,
    ])?;
    xml.push_str("</p:spTree></p:cSld>");

    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" "#,
        r#"accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" "#,
        r#"accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#
    ));

    xml.push_str("<p:sldLayoutIdLst>");
    for (index, rel_id) in layout_rel_ids.iter().enumerate() {
        write!(
            xml,
            r#"<p:sldLayoutId id="{}" r:id="{}"/>"#,
            MASTER_ID + 1 + index as u64,
            rel_id
        )?;
    }
    xml.push_str("</p:sldLayoutIdLst>");

    xml.push_str("<p:txStyles>");
    xml.push_str(r#"<p:titleStyle><a:lvl1pPr algn="ctr"><a:defRPr sz="4400" kern="1200">"#);
    xml.push_str(r#"<a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/>"#);
    xml.push_str("</a:defRPr></a:lvl1pPr></p:titleStyle>");
    xml.push_str(r#"<p:bodyStyle><a:lvl1pPr marL="0" indent="0"><a:buNone/><a:defRPr sz="2400" kern="1200">"#);
    xml.push_str(r#"<a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/>"#);
    xml.push_str("</a:defRPr></a:lvl1pPr></p:bodyStyle>");
    xml.push_str(r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>"#);
    xml.push_str("</p:txStyles>");

    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

fn write_master_placeholder(
    xml: &mut String,
    id: u32,
    name: &str,
    ph_type: &str,
    idx: Option<u32>,
    [x, y, cx, cy]: [i64; 4],
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, id, name)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>"#);
    write!(xml, r#"<p:ph type="{}""#, ph_type)?;
    if let Some(idx) = idx {
        write!(xml, r#" idx="{}""#, idx)?;
    }
    xml.push_str("/></p:nvPr></p:nvSpPr>");
    write!(
        xml,
        r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        x, y, cx, cy
    )?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>");
    Ok(())
}

/// `ppt/slideLayouts/slideLayoutN.xml`.
pub fn slide_layout_xml(layout: SlideLayout) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    let layout_type = match layout {
        SlideLayout::Title => "title",
        SlideLayout::TitleOnly => "titleOnly",
    };

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="{}" preserve="1">"#,
        namespace::A,
        namespace::R,
        namespace::P,
        layout_type
    )?;
    write!(xml, r#"<p:cSld name="{}"><p:spTree>"#, layout.name())?;
    write_group_properties(&mut xml);

    let placeholders: &[(Placeholder, &str)] = match layout {
        SlideLayout::Title => &[
            (Placeholder::CenteredTitle, "Title 1"),
            (Placeholder::Subtitle, "Subtitle 2"),
        ],
        SlideLayout::TitleOnly => &[(Placeholder::Title, "Title 1")],
    };
    for (offset, (placeholder, name)) in placeholders.iter().enumerate() {
        xml.push_str("<p:sp><p:nvSpPr>");
        write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, offset + 2, name)?;
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>"#);
        write!(xml, r#"<p:ph type="{}""#, placeholder.xml_type())?;
        if let Some(idx) = placeholder.xml_index() {
            write!(xml, r#" idx="{}""#, idx)?;
        }
        xml.push_str("/></p:nvPr></p:nvSpPr>");
        xml.push_str("<p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>");
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    Ok(xml)
}

/// `ppt/theme/theme1.xml`: Office color scheme with the report palette as
/// the first accents, and the report font for headings and body.
pub fn theme_xml() -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<a:theme xmlns:a="{}" name="Report">"#, namespace::A)?;
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="Report">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    xml.push_str(r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#);
    xml.push_str(r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#);
    write!(xml, r#"<a:accent1><a:srgbClr val="{}"/></a:accent1>"#, PALETTE[0].to_hex())?;
    write!(xml, r#"<a:accent2><a:srgbClr val="{}"/></a:accent2>"#, PALETTE[1].to_hex())?;
    xml.push_str(r#"<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>"#);
    xml.push_str(r#"<a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#);
    xml.push_str(r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>"#);
    xml.push_str(r#"<a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#);
    xml.push_str(r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#);
    xml.push_str(r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#);
    xml.push_str("</a:clrScheme>");

    let font = escape_xml(FONT_FACE);
    xml.push_str(r#"<a:fontScheme name="Report">"#);
    for scheme in ["majorFont", "minorFont"] {
        write!(
            xml,
            r#"<a:{scheme}><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:{scheme}>"#
        )?;
    }
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Report">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        write!(
            xml,
            r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln>"#,
            width
        )?;
    }
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements>");
    xml.push_str("<a:objectDefaults/><a:extraClrSchemeLst/>");
    xml.push_str("</a:theme>");
    Ok(xml)
}

/// `ppt/presProps.xml`.
pub fn pres_props_xml() -> Result<String> {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
        namespace::A,
        namespace::R,
        namespace::P
    )?;
    Ok(xml)
}

/// `ppt/viewProps.xml`.
pub fn view_props_xml() -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:viewPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        namespace::A,
        namespace::R,
        namespace::P
    )?;
    xml.push_str(r#"<p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr>"#);
    xml.push_str(r#"<p:gridSpacing cx="76200" cy="76200"/>"#);
    xml.push_str("</p:viewPr>");
    Ok(xml)
}

/// `ppt/tableStyles.xml`.
pub fn table_styles_xml() -> Result<String> {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<a:tblStyleLst xmlns:a="{}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
        namespace::A
    )?;
    Ok(xml)
}

/// `docProps/core.xml`.
pub fn core_props_xml(deck: &Deck, timestamp: DateTime<Utc>) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    let stamp = timestamp.format("%Y-%m-%dT%H:%M:%SZ");

    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = deck.title() {
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
    }
    write!(xml, "<dc:creator>{}</dc:creator>", env!("CARGO_PKG_NAME"))?;
    write!(xml, "<cp:lastModifiedBy>{}</cp:lastModifiedBy>", env!("CARGO_PKG_NAME"))?;
    xml.push_str("<cp:revision>1</cp:revision>");
    write!(xml, r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#, stamp)?;
    write!(xml, r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#, stamp)?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// `docProps/app.xml`.
pub fn app_props_xml(deck: &Deck) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    write!(xml, "<Application>{}</Application>", env!("CARGO_PKG_NAME"))?;
    xml.push_str("<PresentationFormat>Custom</PresentationFormat>");
    write!(xml, "<Slides>{}</Slides>", deck.slide_count())?;
    write!(xml, "<AppVersion>{}</AppVersion>", env!("CARGO_PKG_VERSION"))?;
    xml.push_str("</Properties>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_presentation_xml() {
        let deck = Deck::default();
        let xml = presentation_xml(&deck, "rId1", &["rId2".into(), "rId3".into()]).unwrap();
        assert!(xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12188952" cy="6858000"/>"#));
    }

    #[test]
    fn test_layout_xml() {
        let title = slide_layout_xml(SlideLayout::Title).unwrap();
        assert!(title.contains(r#"type="title""#));
        assert!(title.contains(r#"<p:ph type="subTitle" idx="1"/>"#));

        let title_only = slide_layout_xml(SlideLayout::TitleOnly).unwrap();
        assert!(title_only.contains(r#"<p:cSld name="Title Only">"#));
        assert!(!title_only.contains("subTitle"));

        assert_eq!(layout_file_name(SlideLayout::TitleOnly), "slideLayout2.xml");
    }

    #[test]
    fn test_master_lists_layouts() {
        let xml = slide_master_xml(&Deck::default(), &["rId1".into(), "rId2".into()]).unwrap();
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483650" r:id="rId2"/>"#));
    }

    #[test]
    fn test_theme_uses_report_font_and_palette() {
        let xml = theme_xml().unwrap();
        assert!(xml.contains(r#"<a:majorFont><a:latin typeface="Century Gothic"/>"#));
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="2E75B6"/></a:accent1>"#));
        assert!(table_styles_xml().unwrap().contains("{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"));
    }

    #[test]
    fn test_core_props_timestamp() {
        let deck = Deck::default().with_title("Report & Co");
        let stamp = Utc.with_ymd_and_hms(2024, 10, 1, 8, 30, 0).unwrap();
        let xml = core_props_xml(&deck, stamp).unwrap();
        assert!(xml.contains("<dc:title>Report &amp; Co</dc:title>"));
        assert!(xml.contains(">2024-10-01T08:30:00Z</dcterms:created>"));
    }
}

//! Tests for slide composition

use super::*;
use crate::chart::{ChartKind, ChartModel, DataLabelPosition, Evolution, Series, build_line_chart_data};
use crate::common::{Length, RGBColor};
use crate::table::{CellValue, Column, Table};

fn sample_table(value_columns: usize) -> Table {
    let mut columns = vec![Column::new(
        "month",
        vec![CellValue::from("2024-01"), CellValue::from("2024-02")],
    )];
    for i in 0..value_columns {
        let base = 10.0 * (i + 1) as f64;
        columns.push(Column::new(
            format!("value{i}"),
            vec![CellValue::Float(base), CellValue::Float(base * 2.0)],
        ));
    }
    Table::from_columns(columns)
}

fn line_model(value_columns: usize) -> ChartModel {
    let table = sample_table(value_columns);
    let names: Vec<String> = (0..value_columns).map(|i| format!("value{i}")).collect();
    build_line_chart_data(&table, "month", &names).unwrap()
}

#[test]
fn test_title_slide() {
    let composer = SlideComposer::default();
    let slide = composer.compose_title_slide("Automated Report", "Generated with Rust");

    assert_eq!(slide.layout(), SlideLayout::Title);
    let title = slide.title().unwrap();
    assert_eq!(title.text(), "Automated Report");
    assert_eq!(title.placeholder, Some(Placeholder::CenteredTitle));

    let run = &title.paragraphs[0].runs[0];
    assert_eq!(run.format.font.as_deref(), Some(theme::FONT_FACE));
    assert_eq!(run.format.size, Some(40.0));
    assert_eq!(run.format.bold, Some(true));
    assert_eq!(run.format.color, Some(RGBColor::BLACK));

    let subtitle = slide.subtitle().unwrap();
    assert_eq!(subtitle.text(), "Generated with Rust");
    assert_eq!(subtitle.paragraphs[0].runs[0].format.size, Some(24.0));
    assert_eq!(subtitle.paragraphs[0].runs[0].format.bold, Some(false));
    assert_eq!(subtitle.rect, composer.layout().cover_subtitle());

    assert!(slide.chart().is_none());
    assert!(slide.cards().is_empty());
}

#[test]
fn test_chart_slide_end_to_end() {
    let model = line_model(1);
    let slide = SlideComposer::default().compose_chart_slide(&model, "T");

    assert_eq!(slide.layout(), SlideLayout::TitleOnly);
    assert_eq!(slide.title().unwrap().text(), "T");

    let chart = slide.chart().unwrap();
    assert_eq!(chart.categories, vec!["Jan 24", "Feb 24"]);
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].name.as_deref(), Some("value0"));

    let cards = slide.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].value, "+100%");
    assert_eq!(cards[0].label, "value0");
    assert_eq!(cards[0].color, theme::PALETTE[0]);
    assert_eq!(cards[0].evolution, Evolution::new(Some(10.0), Some(100.0)));

    // Title, chart and one card box
    assert_eq!(slide.shapes().len(), 3);
    let card_box = slide.text_boxes().find(|t| t.name == "Card 1").unwrap();
    assert_eq!(card_box.text(), "+100%\nvalue0");
    assert_eq!(card_box.paragraphs[0].runs[0].format.size, Some(26.0));
    assert_eq!(card_box.paragraphs[0].runs[0].format.bold, Some(true));
    assert_eq!(card_box.paragraphs[1].runs[0].format.size, Some(14.0));
    assert_eq!(card_box.paragraphs[1].runs[0].format.color, Some(theme::PALETTE[0]));
}

#[test]
fn test_line_chart_styling() {
    let slide = SlideComposer::default().compose_chart_slide(&line_model(2), "Prices");
    let chart = slide.chart().unwrap();

    assert!(!chart.has_title);
    assert!(!chart.has_legend);
    assert!(!chart.plot_data_labels);
    assert!(!chart.value_axis.visible);
    assert!(!chart.value_axis.major_gridlines);
    assert!(chart.category_axis.visible);
    assert_eq!(chart.category_axis.tick_labels.size, Some(12.0));
    assert!(chart.category_axis.line.is_invisible());
    assert_eq!(chart.category_axis.line.width, Some(Length::ZERO));
    assert!(chart.category_axis.line.no_fill);

    for (i, series) in chart.series.iter().enumerate() {
        assert_eq!(series.color, theme::palette_color(i));
        assert_eq!(series.line_width, Some(Length::from_pt(2.5)));
        assert!(series.smooth);

        let marker = series.marker.as_ref().unwrap();
        assert_eq!(marker.size, 6);
        assert_eq!(marker.fill, Some(series.color));
        assert_eq!(marker.outline_width, Some(Length::ZERO));
        assert!(marker.outline_hidden);

        let labels = series.data_labels.as_ref().unwrap();
        assert!(labels.show_value);
        assert_eq!(labels.position, Some(DataLabelPosition::Top));
        assert_eq!(labels.format.color, Some(series.color));
        assert_eq!(labels.format.size, Some(10.0));
    }

    assert!(slide.skipped_properties().is_empty());
}

#[test]
fn test_three_series_get_two_cards() {
    let slide = SlideComposer::default().compose_chart_slide(&line_model(3), "T");
    let chart = slide.chart().unwrap();

    assert_eq!(chart.series.len(), 3);
    assert_eq!(slide.cards().len(), 2);
    for card in slide.cards() {
        assert_eq!(card.color, chart.series[card.index].color);
    }
    assert!(slide.text_boxes().all(|t| t.name != "Card 3"));
}

#[test]
fn test_card_boxes_follow_layout() {
    let composer = SlideComposer::default();
    let slide = composer.compose_chart_slide(&line_model(2), "T");

    let second = slide.text_boxes().find(|t| t.name == "Card 2").unwrap();
    assert_eq!(second.rect, composer.layout().card(1));
    assert_eq!(slide.chart().unwrap().rect, composer.layout().chart());
}

#[test]
fn test_bar_chart_skips_line_styling() {
    let series = vec![Series::new(Some("units".into()), vec![Some(4.0), Some(5.0)])];
    let model = ChartModel::new(ChartKind::Bar, vec!["a".into(), "b".into()], series).unwrap();
    let slide = SlideComposer::default().compose_chart_slide(&model, "Units");

    let chart = slide.chart().unwrap();
    assert!(!chart.series[0].smooth);
    assert!(chart.series[0].marker.is_none());
    assert_eq!(chart.series[0].data_labels.as_ref().unwrap().position, None);
    assert!(chart.category_axis.line.is_invisible());

    let skipped: Vec<_> = slide.skipped_properties().iter().map(|s| s.property).collect();
    assert!(skipped.contains(&OptionalProperty::Smoothing { series: 0 }));
    assert!(skipped.contains(&OptionalProperty::DataLabelPosition {
        series: 0,
        position: DataLabelPosition::Top,
    }));

    // Bar models carry no evolution; the card recomputes it
    assert_eq!(slide.cards()[0].value, "+25%");
    assert_eq!(slide.cards()[0].label, "units");
}

#[test]
fn test_axis_line_fallback() {
    let composer = SlideComposer::default()
        .with_capabilities(Capabilities::all() - Capabilities::AXIS_LINE_WIDTH);
    let slide = composer.compose_chart_slide(&line_model(1), "T");

    let line = &slide.chart().unwrap().category_axis.line;
    assert!(line.hidden);
    assert_eq!(line.width, None);
    assert!(line.is_invisible());
    assert!(slide.chart().unwrap().category_axis.visible);

    assert_eq!(slide.skipped_properties().len(), 1);
    assert_eq!(
        slide.skipped_properties()[0].property,
        OptionalProperty::AxisLineWidth { width: Length::ZERO }
    );
}

#[test]
fn test_unnamed_series_labels() {
    let series = vec![
        Series::new(None, vec![Some(1.0), Some(2.0)]),
        Series::new(Some(String::new()), vec![Some(2.0), Some(1.0)]),
    ];
    let model = ChartModel::new(ChartKind::Line, vec!["a".into(), "b".into()], series).unwrap();
    let slide = SlideComposer::default().compose_chart_slide(&model, "T");

    let labels: Vec<_> = slide.cards().iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Series 1", "Series 2"]);
    assert_eq!(slide.cards()[1].value, "-50%");
}

#[test]
fn test_cards_without_slide() {
    let composer = SlideComposer::default();
    let model = line_model(2);
    let cards = composer.cards(&model);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards, composer.compose_chart_slide(&model, "T").cards());
}

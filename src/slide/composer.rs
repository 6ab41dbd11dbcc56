//! Slide composition.
//!
//! [`SlideComposer`] turns a title pair or a [`ChartModel`] into a [`Slide`]:
//! positioned text boxes, a styled [`ChartFrame`] and summary cards. Optional
//! chart styling goes through the [`StyleApplier`](super::StyleApplier) probe, so a chart visual
//! that lacks a feature keeps its defaults instead of failing the slide.

use super::applier::{BestEffort, Capabilities, OptionalProperty, SkippedProperty};
use super::card::{Card, build_cards};
use super::chart_frame::{ChartFrame, ChartSeries, DataLabels, Marker};
use super::layout::LayoutConfig;
use super::shape::{Alignment, Paragraph, Placeholder, Shape, TextBox, TextFormat};
use super::theme::{self, FONT_FACE};
use crate::chart::{ChartKind, ChartModel, DataLabelPosition, MarkerStyle};
use crate::common::Length;

/// Slide layout template a slide is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// Title and subtitle placeholders
    Title,
    /// Only a title placeholder
    TitleOnly,
}

impl SlideLayout {
    /// Layout name shown by presentation editors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Title => "Title Slide",
            Self::TitleOnly => "Title Only",
        }
    }
}

/// A composed slide, ready to be added to a deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    layout: SlideLayout,
    shapes: Vec<Shape>,
    cards: Vec<Card>,
    skipped: Vec<SkippedProperty>,
}

impl Slide {
    pub fn new(layout: SlideLayout) -> Self {
        Self {
            layout,
            shapes: Vec::new(),
            cards: Vec::new(),
            skipped: Vec::new(),
        }
    }

    #[inline]
    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Shapes in z-order.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// The text box filling the slide's title placeholder.
    pub fn title(&self) -> Option<&TextBox> {
        self.text_boxes().find(|t| {
            matches!(
                t.placeholder,
                Some(Placeholder::Title | Placeholder::CenteredTitle)
            )
        })
    }

    /// The text box filling the subtitle placeholder.
    pub fn subtitle(&self) -> Option<&TextBox> {
        self.text_boxes()
            .find(|t| t.placeholder == Some(Placeholder::Subtitle))
    }

    pub fn text_boxes(&self) -> impl Iterator<Item = &TextBox> {
        self.shapes.iter().filter_map(Shape::as_text)
    }

    /// The first chart on the slide.
    pub fn chart(&self) -> Option<&ChartFrame> {
        self.shapes.iter().find_map(Shape::as_chart)
    }

    /// Summary cards, in series order.
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Optional style properties the chart visual refused.
    #[inline]
    pub fn skipped_properties(&self) -> &[SkippedProperty] {
        &self.skipped
    }
}

/// Composes title and chart slides on a fixed layout.
#[derive(Debug, Clone, Default)]
pub struct SlideComposer {
    layout: LayoutConfig,
    capabilities: Option<Capabilities>,
}

impl SlideComposer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            capabilities: None,
        }
    }

    /// Restrict optional styling to `capabilities`, on top of what each
    /// chart kind supports.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    #[inline]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Cover slide with a centered title and subtitle.
    pub fn compose_title_slide(&self, title: &str, subtitle: &str) -> Slide {
        let mut slide = Slide::new(SlideLayout::Title);

        let title_format = TextFormat::new(FONT_FACE, theme::COVER_TITLE_SIZE_PT)
            .bold(true)
            .color(theme::TITLE_COLOR);
        slide.push_shape(Shape::Text(
            TextBox::new("Title 1", self.layout.cover_title())
                .in_placeholder(Placeholder::CenteredTitle)
                .with_paragraph(Paragraph::single(title, title_format).aligned(Alignment::Center)),
        ));

        let subtitle_format = TextFormat::new(FONT_FACE, theme::COVER_SUBTITLE_SIZE_PT)
            .bold(false)
            .color(theme::TITLE_COLOR);
        slide.push_shape(Shape::Text(
            TextBox::new("Subtitle 2", self.layout.cover_subtitle())
                .in_placeholder(Placeholder::Subtitle)
                .with_paragraph(
                    Paragraph::single(subtitle, subtitle_format).aligned(Alignment::Center),
                ),
        ));

        slide
    }

    /// Chart slide: title, styled chart on the left and up to two summary
    /// cards stacked on the right.
    pub fn compose_chart_slide(&self, model: &ChartModel, title: &str) -> Slide {
        let mut slide = Slide::new(SlideLayout::TitleOnly);

        let title_format = TextFormat::new(FONT_FACE, theme::CHART_TITLE_SIZE_PT)
            .bold(true)
            .color(theme::TITLE_COLOR);
        slide.push_shape(Shape::Text(
            TextBox::new("Title 1", self.layout.chart_title())
                .in_placeholder(Placeholder::Title)
                .with_paragraph(Paragraph::single(title, title_format).aligned(Alignment::Center)),
        ));

        let (frame, skipped) = self.chart_frame(model);
        let cards = build_cards(model, Some(&frame));
        slide.push_shape(Shape::Chart(Box::new(frame)));

        for card in &cards {
            slide.push_shape(Shape::Text(self.card_box(card)));
        }

        tracing::debug!(
            series = model.series_count(),
            cards = cards.len(),
            skipped = skipped.len(),
            "composed chart slide"
        );

        slide.cards = cards;
        slide.skipped = skipped;
        slide
    }

    /// Summary cards for `model`, without composing a slide.
    pub fn cards(&self, model: &ChartModel) -> Vec<Card> {
        build_cards(model, None)
    }

    fn chart_frame(&self, model: &ChartModel) -> (ChartFrame, Vec<SkippedProperty>) {
        let kind = model.kind();
        let series = model
            .series()
            .iter()
            .enumerate()
            .map(|(index, s)| {
                let color = theme::palette_color(index);
                ChartSeries {
                    name: s.name.clone(),
                    values: s.values.clone(),
                    color,
                    line_width: Some(Length::from_pt(theme::SERIES_LINE_WIDTH_PT)),
                    smooth: false,
                    marker: (kind == ChartKind::Line).then(|| Marker {
                        style: MarkerStyle::Circle,
                        size: theme::MARKER_SIZE,
                        fill: Some(color),
                        outline_width: None,
                        outline_hidden: false,
                    }),
                    data_labels: Some(DataLabels {
                        show_value: true,
                        position: None,
                        format: TextFormat::new(FONT_FACE, theme::DATA_LABEL_SIZE_PT).color(color),
                    }),
                }
            })
            .collect();

        let capabilities = match self.capabilities {
            Some(limit) => Capabilities::for_kind(kind) & limit,
            None => Capabilities::for_kind(kind),
        };
        let mut frame = ChartFrame::new(
            self.layout.chart(),
            kind,
            model.categories().to_vec(),
            series,
            capabilities,
        );

        frame.has_title = false;
        frame.has_legend = false;
        frame.plot_data_labels = false;
        frame.value_axis.major_gridlines = false;
        frame.value_axis.visible = false;
        frame.category_axis.tick_labels = TextFormat::new(FONT_FACE, theme::CATEGORY_LABEL_SIZE_PT);

        let series_count = frame.series.len();
        let mut styler = BestEffort::new(&mut frame);
        for series in 0..series_count {
            styler.apply(OptionalProperty::Smoothing { series });
            let width = Length::from_pt(theme::MARKER_OUTLINE_WIDTH_PT);
            if styler.apply(OptionalProperty::MarkerOutlineWidth { series, width }) {
                styler.apply(OptionalProperty::MarkerOutlineFill { series });
            }
            styler.apply(OptionalProperty::DataLabelPosition {
                series,
                position: DataLabelPosition::Top,
            });
        }

        if styler.apply(OptionalProperty::AxisLineWidth { width: Length::ZERO }) {
            styler.apply(OptionalProperty::AxisLineFill);
        } else {
            styler.apply(OptionalProperty::AxisLineHidden);
        }

        let skipped = styler.into_skipped();
        debug_assert!(frame.category_axis.line.is_invisible());
        (frame, skipped)
    }

    fn card_box(&self, card: &Card) -> TextBox {
        let value_format = TextFormat::new(FONT_FACE, theme::CARD_VALUE_SIZE_PT)
            .bold(true)
            .color(card.color);
        let label_format = TextFormat::new(FONT_FACE, theme::CARD_LABEL_SIZE_PT)
            .bold(false)
            .color(card.color);

        TextBox::new(format!("Card {}", card.index + 1), self.layout.card(card.index))
            .with_paragraph(Paragraph::single(card.value.clone(), value_format))
            .with_paragraph(Paragraph::single(card.label.clone(), label_format))
    }
}

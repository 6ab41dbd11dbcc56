//! Chart data models.
//!
//! A [`ChartModel`] pairs category labels with an ordered list of value
//! [`Series`]. Series order is significant: it decides chart colors and the
//! position of each summary card.

use serde::Serialize;

use super::types::ChartKind;
use crate::common::{Error, Result};

/// Change of a series from its first to its last non-missing value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Evolution {
    /// `last - first`, undefined when the series has no values
    pub delta: Option<f64>,
    /// `delta / first * 100`, undefined when `first` is zero or missing
    pub percent: Option<f64>,
}

impl Evolution {
    /// Both fields undefined.
    pub const UNDEFINED: Self = Self {
        delta: None,
        percent: None,
    };

    /// Create an evolution from explicit parts.
    #[inline]
    pub const fn new(delta: Option<f64>, percent: Option<f64>) -> Self {
        Self { delta, percent }
    }

    /// Compute the evolution of already-filtered numbers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chartdeck::chart::Evolution;
    ///
    /// let evo = Evolution::from_numbers([100.0, 150.0]);
    /// assert_eq!(evo, Evolution::new(Some(50.0), Some(50.0)));
    ///
    /// let evo = Evolution::from_numbers([0.0, 10.0]);
    /// assert_eq!(evo, Evolution::new(Some(10.0), None));
    /// ```
    pub fn from_numbers<I: IntoIterator<Item = f64>>(numbers: I) -> Self {
        let mut numbers = numbers.into_iter();
        let Some(start) = numbers.next() else {
            return Self::UNDEFINED;
        };
        let end = numbers.last().unwrap_or(start);

        let delta = end - start;
        let percent = if start != 0.0 {
            Some(delta / start * 100.0)
        } else {
            None
        };

        Self::new(Some(delta), percent)
    }

    /// Compute the evolution of a value sequence, skipping missing entries.
    #[inline]
    pub fn from_values(values: &[Option<f64>]) -> Self {
        Self::from_numbers(values.iter().flatten().copied())
    }

    /// Whether neither field is defined.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.delta.is_none() && self.percent.is_none()
    }
}

/// One value column of the source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Column header, if known
    pub name: Option<String>,
    /// One entry per category; `None` marks a missing value
    pub values: Vec<Option<f64>>,
    /// Precomputed evolution; `None` when it was never computed
    pub evolution: Option<Evolution>,
}

impl Series {
    /// Create a series without a precomputed evolution.
    pub fn new(name: Option<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name,
            values,
            evolution: None,
        }
    }

    /// Attach a precomputed evolution.
    #[inline]
    pub fn with_evolution(mut self, evolution: Evolution) -> Self {
        self.evolution = Some(evolution);
        self
    }

    /// The series name when it is present and non-empty.
    #[inline]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Chart-ready data passed from the builder to the slide composer.
///
/// Immutable once built: all fields are private and only exposed by shared
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    kind: ChartKind,
    categories: Vec<String>,
    series: Vec<Series>,
    series_names: Option<Vec<String>>,
}

impl ChartModel {
    /// Create a model, checking that every series has one value per category.
    pub fn new(kind: ChartKind, categories: Vec<String>, series: Vec<Series>) -> Result<Self> {
        if let Some((idx, bad)) = series
            .iter()
            .enumerate()
            .find(|(_, s)| s.values.len() != categories.len())
        {
            return Err(Error::InvalidInput(format!(
                "series {} has {} values but there are {} categories",
                idx,
                bad.values.len(),
                categories.len()
            )));
        }

        Ok(Self {
            kind,
            categories,
            series,
            series_names: None,
        })
    }

    /// Attach a model-level list of series names.
    pub fn with_series_names(mut self, names: Vec<String>) -> Self {
        self.series_names = Some(names);
        self
    }

    /// The chart visual this model targets.
    #[inline]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Category labels, one per table row.
    #[inline]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Series in source order.
    #[inline]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Model-level series names, when the builder recorded them.
    #[inline]
    pub fn series_names(&self) -> Option<&[String]> {
        self.series_names.as_deref()
    }

    /// Number of series.
    #[inline]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evolution_skips_missing() {
        let evo = Evolution::from_values(&[Some(100.0), None, Some(150.0)]);
        assert_eq!(evo, Evolution::new(Some(50.0), Some(50.0)));
    }

    #[test]
    fn test_evolution_zero_start() {
        let evo = Evolution::from_values(&[Some(0.0), Some(10.0)]);
        assert_eq!(evo, Evolution::new(Some(10.0), None));
    }

    #[test]
    fn test_evolution_all_missing() {
        let evo = Evolution::from_values(&[None, None]);
        assert!(evo.is_undefined());
        assert!(Evolution::from_values(&[]).is_undefined());
    }

    #[test]
    fn test_evolution_single_value() {
        let evo = Evolution::from_values(&[None, Some(8.0)]);
        assert_eq!(evo, Evolution::new(Some(0.0), Some(0.0)));
    }

    #[test]
    fn test_evolution_decline() {
        let evo = Evolution::from_numbers([200.0, 150.0]);
        assert_eq!(evo, Evolution::new(Some(-50.0), Some(-25.0)));
    }

    #[test]
    fn test_model_rejects_length_mismatch() {
        let series = vec![Series::new(Some("a".to_string()), vec![Some(1.0)])];
        let result = ChartModel::new(ChartKind::Line, vec!["x".into(), "y".into()], series);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Series::new(Some(String::new()), vec![]).display_name(), None);
        assert_eq!(Series::new(Some("v".into()), vec![]).display_name(), Some("v"));
        assert_eq!(Series::new(None, vec![]).display_name(), None);
    }
}

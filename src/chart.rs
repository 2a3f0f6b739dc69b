//! Emotional distribution and the donut chart configuration built from it.
//!
//! A distribution is four numbers positionally aligned with
//! [`Mood::ALL`].  Input is validated before a configuration object is
//! built; bad input is reported as a [`ChartError`] rather than handed on
//! to whatever draws the chart.

use serde::Serialize;
use thiserror::Error;

use crate::mood::Mood;

/// Errors raised while validating distribution input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Distribution needs exactly {expected} values, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Distribution value for {mood} is not a finite number")]
    NonFinite { mood: &'static str },

    #[error("Distribution value for {mood} is negative: {value}")]
    Negative { mood: &'static str, value: f64 },

    #[error("Cannot parse distribution value {0:?}")]
    Parse(String),
}

/// A validated four-segment distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    values: [f64; 4],
}

impl Distribution {
    /// Validate raw values into a distribution.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, ChartError> {
        let values: [f64; 4] = values.try_into().map_err(|_| ChartError::Length {
            expected: Mood::ALL.len(),
            actual: values.len(),
        })?;

        for (mood, value) in Mood::ALL.iter().zip(values) {
            if !value.is_finite() {
                return Err(ChartError::NonFinite { mood: mood.label() });
            }
            if value < 0.0 {
                return Err(ChartError::Negative {
                    mood: mood.label(),
                    value,
                });
            }
        }

        Ok(Self { values })
    }

    /// Build a distribution from per-mood article counts.
    pub fn from_counts(counts: [usize; 4]) -> Self {
        Self {
            values: counts.map(|c| c as f64),
        }
    }

    /// Parse a comma separated list such as `"10,20,30,40"`.
    pub fn parse(input: &str) -> Result<Self, ChartError> {
        let values = input
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| ChartError::Parse(part.to_string()))
            })
            .collect::<Result<Vec<f64>, ChartError>>()?;
        Self::try_from_slice(&values)
    }

    pub fn values(&self) -> [f64; 4] {
        self.values
    }

    pub fn value(&self, mood: Mood) -> f64 {
        self.values[mood.index()]
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Share of the total for `mood` in `0.0..=1.0`, or `None` when the
    /// total is zero.
    pub fn share(&self, mood: Mood) -> Option<f64> {
        let total = self.total();
        if total > 0.0 {
            Some(self.value(mood) / total)
        } else {
            None
        }
    }

    /// Which segment covers the point `fraction` of the way round the ring.
    ///
    /// `fraction` is clamped to `0.0..1.0`.  Returns `None` for an empty
    /// distribution.
    pub fn segment_at(&self, fraction: f64) -> Option<Mood> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        let target = fraction.clamp(0.0, 1.0) * total;
        let mut acc = 0.0;
        for mood in Mood::ALL {
            acc += self.value(mood);
            if target < acc {
                return Some(mood);
            }
        }
        // fraction == 1.0 lands on the last non-empty segment
        Mood::ALL.iter().rev().copied().find(|m| self.value(*m) > 0.0)
    }

    /// Map this distribution onto the chart configuration object.
    pub fn to_config(&self) -> ChartConfig {
        ChartConfig {
            labels: Mood::ALL.iter().map(|m| m.label().to_string()).collect(),
            datasets: vec![Dataset {
                data: self.values.to_vec(),
                background_color: Mood::ALL.iter().map(|m| m.colour().to_string()).collect(),
            }],
        }
    }
}

/// Configuration object handed to a donut chart renderer.
///
/// Field names follow the Chart.js data layout so the JSON form can be
/// given to a web chart unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

/// Validate `values` and build the chart configuration in one step.
pub fn chart_config(values: &[f64]) -> Result<ChartConfig, ChartError> {
    Distribution::try_from_slice(values).map(|d| d.to_config())
}

/// Running per-mood article counts, filled in as fetches complete.
///
/// Each count remembers the fetch generation it came from; a count from an
/// older generation never replaces a newer one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    counts: [Option<(u64, usize)>; 4],
}

impl Tally {
    /// Record the size of the article list fetched for `mood` by fetch
    /// `generation`.  Returns `false` if a newer count is already held.
    pub fn record(&mut self, mood: Mood, generation: u64, count: usize) -> bool {
        let slot = &mut self.counts[mood.index()];
        if matches!(slot, Some((held, _)) if *held > generation) {
            return false;
        }
        *slot = Some((generation, count));
        true
    }

    pub fn count(&self, mood: Mood) -> Option<usize> {
        self.counts[mood.index()].map(|(_, count)| count)
    }

    /// Whether every mood has been fetched at least once.
    pub fn is_complete(&self) -> bool {
        self.counts.iter().all(Option::is_some)
    }

    /// Distribution of known counts; unfetched moods count as zero.
    pub fn distribution(&self) -> Distribution {
        Distribution::from_counts(self.counts.map(|c| c.map_or(0, |(_, count)| count)))
    }
}

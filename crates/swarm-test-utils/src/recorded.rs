//! Captured metrics for assertions.
//!
//! Wraps a `metrics_util::debugging::Snapshot` into plain names, label maps
//! and values so tests can look up a series by its exact labels.

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use std::collections::BTreeMap;

/// Value of one recorded series.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedValue {
    Counter(u64),
    Gauge(f64),
    Histogram(Vec<f64>),
}

/// One recorded series: metric name, labels and value.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMetric {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub value: RecordedValue,
}

/// All series captured by a snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecordedMetrics {
    series: Vec<RecordedMetric>,
}

impl RecordedMetrics {
    /// Take a snapshot from `snapshotter`.
    ///
    /// Histogram samples are drained by the snapshot; take one snapshot per
    /// assertion phase.
    #[must_use]
    pub fn from_snapshotter(snapshotter: &Snapshotter) -> Self {
        let series = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(composite, _unit, _description, value)| {
                let key = composite.key();
                RecordedMetric {
                    name: key.name().to_string(),
                    labels: key
                        .labels()
                        .map(|l| (l.key().to_string(), l.value().to_string()))
                        .collect(),
                    value: match value {
                        DebugValue::Counter(v) => RecordedValue::Counter(v),
                        DebugValue::Gauge(v) => RecordedValue::Gauge(v.0),
                        DebugValue::Histogram(values) => {
                            RecordedValue::Histogram(values.into_iter().map(|v| v.0).collect())
                        }
                    },
                }
            })
            .collect();
        Self { series }
    }

    /// Every captured series.
    #[must_use]
    pub fn series(&self) -> &[RecordedMetric] {
        &self.series
    }

    /// Series recorded under `name`, any labels.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RecordedMetric> + 'a {
        self.series.iter().filter(move |m| m.name == name)
    }

    /// The series with exactly `labels` (order-insensitive).
    #[must_use]
    pub fn find<'a>(&'a self, name: &'a str, labels: &[(&str, &str)]) -> Option<&'a RecordedMetric> {
        let wanted: BTreeMap<String, String> = labels
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.named(name).find(|m| m.labels == wanted)
    }

    /// Counter value of the series with exactly `labels`.
    #[must_use]
    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
        match self.find(name, labels)?.value {
            RecordedValue::Counter(v) => Some(v),
            _ => None,
        }
    }

    /// Histogram samples of the series with exactly `labels`.
    #[must_use]
    pub fn histogram(&self, name: &str, labels: &[(&str, &str)]) -> Option<Vec<f64>> {
        match &self.find(name, labels)?.value {
            RecordedValue::Histogram(values) => Some(values.clone()),
            _ => None,
        }
    }

    /// Sum of every counter series recorded under `name`.
    #[must_use]
    pub fn counter_total(&self, name: &str) -> u64 {
        self.named(name)
            .map(|m| match m.value {
                RecordedValue::Counter(v) => v,
                _ => 0,
            })
            .sum()
    }
}

/// Run `f` with a fresh thread-local `DebuggingRecorder` and return what it
/// recorded.
pub fn capture<F: FnOnce()>(f: F) -> RecordedMetrics {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    metrics::with_local_recorder(&recorder, f);
    RecordedMetrics::from_snapshotter(&snapshotter)
}

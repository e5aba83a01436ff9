//! Analytics aggregations over problem and recall-log snapshots.
//!
//! Every function here is pure: the backend reads a snapshot from the
//! store and the aggregation is computed at request time. Grouping goes
//! through `BTreeMap` and sorts are stable, so the same snapshot always
//! produces the same output. Averages are rounded to two decimals.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

/// Confidence summary for one group of problems (a difficulty or a data
/// structure). `samples` counts only problems with a recorded confidence;
/// a group whose members were never recalled reports a null average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfidence {
    pub name: String,
    pub samples: usize,
    pub average_confidence: Option<f64>,
}

/// Problem count for one difficulty bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCount {
    pub name: String,
    pub count: usize,
}

/// Average confidence across every recall log for one pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub name: String,
    pub average_confidence: f64,
    pub samples: usize,
}

/// Number of recall logs on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    pub label: String,
    pub revisions: usize,
}

/// Average confidence across the logs of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub confidence: f64,
}

/// Direction of the confidence trend between the first and last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

/// Trend direction plus a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendStatus {
    pub status: TrendDirection,
    pub message: String,
}

/// Order a due list so the lowest latest-confidence comes first.
/// Problems that were never recalled sort after every scored problem;
/// ties keep their input order.
pub fn sort_weakest_first<T, F>(items: &mut [T], latest_confidence: F)
where
    F: Fn(&T) -> Option<i32>,
{
    items.sort_by(|a, b| {
        confidence_rank(latest_confidence(a)).total_cmp(&confidence_rank(latest_confidence(b)))
    });
}

fn confidence_rank(confidence: Option<i32>) -> f64 {
    confidence.map(f64::from).unwrap_or(f64::INFINITY)
}

/// Group problems by a key (difficulty or data structure) and average the
/// latest confidence of the scored members. Empty keys fall into the
/// `"Unknown"` group. Result is sorted by group name.
pub fn grouped_confidence_overview<'a, I>(items: I) -> Vec<GroupConfidence>
where
    I: IntoIterator<Item = (&'a str, Option<i32>)>,
{
    let mut groups: BTreeMap<String, (usize, i64)> = BTreeMap::new();
    for (key, latest) in items {
        let entry = groups.entry(bucket_name(key)).or_insert((0, 0));
        if let Some(confidence) = latest {
            entry.0 += 1;
            entry.1 += i64::from(confidence);
        }
    }

    groups
        .into_iter()
        .map(|(name, (samples, total))| GroupConfidence {
            name,
            samples,
            average_confidence: (samples > 0).then(|| round2(total as f64 / samples as f64)),
        })
        .collect()
}

/// Count problems per difficulty, seeded in `Easy, Medium, Hard` order.
/// Values outside the fixed set land in an `"Unknown"` bucket appended
/// after the fixed three. Buckets that stay at zero are dropped.
pub fn difficulty_breakdown<'a, I>(difficulties: I) -> Vec<DifficultyCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = [0usize; Difficulty::ALL.len()];
    let mut unknown = 0usize;
    for value in difficulties {
        match Difficulty::from_str(value) {
            Some(difficulty) => counts[difficulty as usize] += 1,
            None => unknown += 1,
        }
    }

    let mut breakdown: Vec<DifficultyCount> = Difficulty::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(difficulty, count)| DifficultyCount {
            name: difficulty.as_str().to_string(),
            count,
        })
        .collect();
    if unknown > 0 {
        breakdown.push(DifficultyCount {
            name: "Unknown".to_string(),
            count: unknown,
        });
    }
    breakdown
}

/// Average confidence per pattern over every recall log (not just the
/// latest per problem). Sorted weakest pattern first; ties stay in
/// alphabetical order.
pub fn pattern_distribution<'a, I>(logs: I) -> Vec<PatternSummary>
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    let mut groups: BTreeMap<String, (usize, i64)> = BTreeMap::new();
    for (pattern, confidence) in logs {
        let entry = groups.entry(bucket_name(pattern)).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += i64::from(confidence);
    }

    let mut distribution: Vec<PatternSummary> = groups
        .into_iter()
        .map(|(name, (samples, total))| PatternSummary {
            name,
            average_confidence: round2(total as f64 / samples as f64),
            samples,
        })
        .collect();
    distribution.sort_by(|a, b| a.average_confidence.total_cmp(&b.average_confidence));
    distribution
}

/// Patterns averaging below 3, most-practiced first.
pub fn weak_patterns(distribution: &[PatternSummary]) -> Vec<PatternSummary> {
    let mut weak: Vec<PatternSummary> = distribution
        .iter()
        .filter(|summary| summary.average_confidence < 3.0)
        .cloned()
        .collect();
    weak.sort_by(|a, b| b.samples.cmp(&a.samples));
    weak
}

/// Patterns averaging 4 or above, highest average first.
pub fn strong_patterns(distribution: &[PatternSummary]) -> Vec<PatternSummary> {
    let mut strong: Vec<PatternSummary> = distribution
        .iter()
        .filter(|summary| summary.average_confidence >= 4.0)
        .cloned()
        .collect();
    strong.sort_by(|a, b| b.average_confidence.total_cmp(&a.average_confidence));
    strong
}

/// Count recall logs per UTC calendar day, oldest day first.
pub fn revisions_over_time<I>(timestamps: I) -> Vec<VolumePoint>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for timestamp in timestamps {
        *per_day.entry(timestamp.date_naive()).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .map(|(day, revisions)| VolumePoint {
            label: date_label(day),
            revisions,
        })
        .collect()
}

/// Average confidence of the logs on each UTC calendar day, oldest first.
pub fn confidence_trend<I>(logs: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = (DateTime<Utc>, i32)>,
{
    let mut per_day: BTreeMap<NaiveDate, (usize, i64)> = BTreeMap::new();
    for (timestamp, confidence) in logs {
        let entry = per_day.entry(timestamp.date_naive()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += i64::from(confidence);
    }

    per_day
        .into_iter()
        .map(|(day, (count, total))| TrendPoint {
            label: date_label(day),
            confidence: round2(total as f64 / count as f64),
        })
        .collect()
}

/// Compare the last daily average against the first. A shift of at least
/// 0.25 in either direction counts as a trend; fewer than two points is
/// not enough signal.
pub fn trend_status(trend: &[TrendPoint]) -> TrendStatus {
    if trend.len() < 2 {
        return TrendStatus {
            status: TrendDirection::Stable,
            message: "Need more revision points to detect trend.".to_string(),
        };
    }

    let delta = round2(trend[trend.len() - 1].confidence - trend[0].confidence);
    if delta >= 0.25 {
        TrendStatus {
            status: TrendDirection::Improving,
            message: format!("Confidence is improving (+{delta})."),
        }
    } else if delta <= -0.25 {
        TrendStatus {
            status: TrendDirection::Declining,
            message: format!("Confidence is declining ({delta})."),
        }
    } else {
        TrendStatus {
            status: TrendDirection::Stable,
            message: "Confidence is stable.".to_string(),
        }
    }
}

fn bucket_name(key: &str) -> String {
    if key.is_empty() {
        "Unknown".to_string()
    } else {
        key.to_string()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn date_label(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

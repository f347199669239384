//! Reporting-period column recognition and ordering.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Relative-offset suffix: `_t`, `_t-1`, `_t-2`, ...
static OFFSET_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_t(?:-([0-9]+))?$").unwrap());

/// Rules for deciding which columns are period columns.
#[derive(Debug, Clone)]
pub struct PeriodScheme {
    /// Year tokens whose containment marks a period column.
    pub year_tokens: Vec<String>,
    /// Whether a `_t` / `_t-N` suffix marks a period column. The ADIB feed
    /// names its period columns `q1_t`, `q2_t-1`, ... with no year token.
    pub match_relative_offsets: bool,
}

impl Default for PeriodScheme {
    fn default() -> Self {
        Self {
            year_tokens: vec!["2023".to_string(), "2024".to_string(), "2025".to_string()],
            match_relative_offsets: true,
        }
    }
}

impl PeriodScheme {
    /// A scheme recognizing the given year tokens.
    pub fn with_years<I, S>(years: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            year_tokens: years.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Reporting frequency marker embedded in a period column name.
///
/// The master CSV spells quarters both as `q1_`..`q4_` and as month
/// triples `jfm_`/`amj_`/`jas_`/`ond_`; both map to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Q1,
    Q2,
    Q3,
    Q4,
    HalfYear1,
    HalfYear2,
    NineMonths,
    FullYear,
    /// No recognizable frequency marker.
    Unknown,
}

impl Frequency {
    fn from_marker(lower: &str) -> Frequency {
        let token = lower.split(['_', '-']).next().unwrap_or("");
        match token {
            "q1" | "jfm" => Frequency::Q1,
            "q2" | "amj" => Frequency::Q2,
            "q3" | "jas" => Frequency::Q3,
            "q4" | "ond" => Frequency::Q4,
            "h1" => Frequency::HalfYear1,
            "h2" => Frequency::HalfYear2,
            "9m" => Frequency::NineMonths,
            "fy" | "f" => Frequency::FullYear,
            _ => Frequency::Unknown,
        }
    }

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Q1 => "Q1",
            Frequency::Q2 => "Q2",
            Frequency::Q3 => "Q3",
            Frequency::Q4 => "Q4",
            Frequency::HalfYear1 => "H1",
            Frequency::HalfYear2 => "H2",
            Frequency::NineMonths => "9M",
            Frequency::FullYear => "FY",
            Frequency::Unknown => "",
        }
    }

    /// Month in which the period ends, for chronological ordering.
    fn end_month(&self) -> u8 {
        match self {
            Frequency::Unknown => 0,
            Frequency::Q1 => 3,
            Frequency::Q2 | Frequency::HalfYear1 => 6,
            Frequency::Q3 | Frequency::NineMonths => 9,
            Frequency::Q4 | Frequency::HalfYear2 | Frequency::FullYear => 12,
        }
    }

    /// Covered months; breaks end-month ties (a quarter sorts before the
    /// half year ending in the same month).
    fn span_months(&self) -> u8 {
        match self {
            Frequency::Unknown => 0,
            Frequency::Q1 | Frequency::Q2 | Frequency::Q3 | Frequency::Q4 => 3,
            Frequency::HalfYear1 | Frequency::HalfYear2 => 6,
            Frequency::NineMonths => 9,
            Frequency::FullYear => 12,
        }
    }
}

/// A parsed descriptor of one reporting-period column.
///
/// Keys are plain set members for faceting; [`Ord`] provides the natural
/// chronological ordering used for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Column name exactly as it appears in the source.
    pub name: String,
    /// Four-digit year token, when the name carries one.
    pub year: Option<u16>,
    /// Reporting frequency marker.
    pub frequency: Frequency,
    /// Relative offset in reporting cycles: `_t` is 0, `_t-1` is one back.
    pub offset: Option<u8>,
}

impl PeriodKey {
    /// Classify a column name, returning a key iff it is a period column
    /// under the given scheme.
    pub fn classify(name: &str, scheme: &PeriodScheme) -> Option<PeriodKey> {
        let lower = name.to_ascii_lowercase();

        let matched_year = scheme
            .year_tokens
            .iter()
            .find(|token| name.contains(token.as_str()));
        let offset = relative_offset(&lower);

        if matched_year.is_none() && !(scheme.match_relative_offsets && offset.is_some()) {
            return None;
        }

        Some(PeriodKey {
            name: name.to_string(),
            year: matched_year.and_then(|token| token.parse().ok()),
            frequency: Frequency::from_marker(&lower),
            offset,
        })
    }

    /// Display label, e.g. "FY 2024", "Q3 2024", "Q1 t-1".
    pub fn label(&self) -> String {
        let freq = self.frequency.label();
        match (self.year, self.offset) {
            (Some(year), _) if freq.is_empty() => year.to_string(),
            (Some(year), _) => format!("{} {}", freq, year),
            (None, Some(0)) => format!("{} t", freq),
            (None, Some(back)) => format!("{} t-{}", freq, back),
            (None, None) => self.name.clone(),
        }
    }

    /// Chronological sort key: absolute (yeared) keys sort after relative
    /// ones, years ascend, then period end month, then span.
    fn sort_key(&self) -> (u8, i32, u8, u8) {
        match self.year {
            Some(year) => (
                1,
                year as i32,
                self.frequency.end_month(),
                self.frequency.span_months(),
            ),
            None => (
                0,
                -(self.offset.unwrap_or(0) as i32),
                self.frequency.end_month(),
                self.frequency.span_months(),
            ),
        }
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn relative_offset(lower: &str) -> Option<u8> {
    let captures = OFFSET_SUFFIX.captures(lower)?;
    let back = captures
        .get(1)
        .map(|m| m.as_str().parse::<u8>().unwrap_or(u8::MAX))
        .unwrap_or(0);
    Some(back)
}

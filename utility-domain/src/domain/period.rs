use std::fmt;

use serde::Serialize;
use time::Month;

use super::reading::Reading;

const ARABIC_MONTHS: [(&str, Month); 15] = [
    ("يناير", Month::January),
    ("فبراير", Month::February),
    ("مارس", Month::March),
    ("أبريل", Month::April),
    ("مايو", Month::May),
    ("يونيو", Month::June),
    ("يوليو", Month::July),
    ("أغسطس", Month::August),
    ("سبتمبر", Month::September),
    ("أكتوبر", Month::October),
    ("نوفمبر", Month::November),
    ("ديسمبر", Month::December),
    ("ابريل", Month::April),
    ("اغسطس", Month::August),
    ("اكتوبر", Month::October),
];

const ENGLISH_MONTHS: [(&str, Month); 12] = [
    ("JAN", Month::January),
    ("FEB", Month::February),
    ("MAR", Month::March),
    ("APR", Month::April),
    ("MAY", Month::May),
    ("JUN", Month::June),
    ("JUL", Month::July),
    ("AUG", Month::August),
    ("SEP", Month::September),
    ("OCT", Month::October),
    ("NOV", Month::November),
    ("DEC", Month::December),
];

/// One sheet of the workbook: a month of daily readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    pub label: String,
    pub readings: Vec<Reading>,
}

impl Period {
    pub fn new(label: impl Into<String>, readings: Vec<Reading>) -> Self {
        Self {
            label: label.into(),
            readings,
        }
    }

    /// Calendar month named by the label, e.g. `JAN`, `January 2025` or `يناير`.
    pub fn month(&self) -> Option<Month> {
        label_month(&self.label)
    }

    /// Four-digit year token in the label, if any.
    pub fn year(&self) -> Option<i32> {
        label_year(&self.label)
    }

    pub fn matches(&self, label: &str) -> bool {
        same_label(&self.label, label)
    }
}

pub fn label_month(label: &str) -> Option<Month> {
    label
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '/')
        .filter(|t| !t.is_empty())
        .find_map(|token| {
            let upper = token.to_uppercase();
            ENGLISH_MONTHS
                .iter()
                .find(|(prefix, _)| upper.starts_with(prefix))
                .or_else(|| ARABIC_MONTHS.iter().find(|(name, _)| token.contains(name)))
                .map(|(_, m)| *m)
        })
}

pub fn label_year(label: &str) -> Option<i32> {
    label
        .split(|c: char| !c.is_ascii_digit())
        .filter(|t| t.len() == 4)
        .find_map(|t| t.parse().ok())
}

/// Labels compare trimmed and case-insensitively.
pub fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}

/// Every period parsed from one uploaded workbook, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub periods: Vec<Period>,
}

impl Dataset {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.periods.iter().map(|p| p.readings.len()).sum()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.periods.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn period(&self, label: &str) -> Option<&Period> {
        self.periods.iter().find(|p| p.matches(label))
    }

    pub fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.periods.iter().flat_map(|p| p.readings.iter())
    }
}

/// What the operator is looking at: one month or the whole workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Period(String),
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("ALL"),
            Selection::Period(label) => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_from_english_and_arabic_labels() {
        assert_eq!(label_month("JAN"), Some(Month::January));
        assert_eq!(label_month("september 2025"), Some(Month::September));
        assert_eq!(label_month("يوليو"), Some(Month::July));
        assert_eq!(label_month("Sheet1"), None);
    }

    #[test]
    fn year_from_label() {
        assert_eq!(label_year("JAN 2025"), Some(2025));
        assert_eq!(label_year("2024-FEB"), Some(2024));
        assert_eq!(label_year("JAN 25"), None);
    }

    #[test]
    fn dataset_lookup_ignores_case_and_padding() {
        let ds = Dataset::new(vec![Period::new("JAN", vec![]), Period::new("Feb", vec![])]);
        assert!(ds.period(" jan ").is_some());
        assert!(ds.period("FEB").is_some());
        assert!(ds.period("MAR").is_none());
        assert_eq!(ds.labels(), vec!["JAN", "Feb"]);
    }
}

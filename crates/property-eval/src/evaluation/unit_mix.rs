use serde::{Deserialize, Serialize};
use std::fmt;

/// Count of dwelling units for a single unit-type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMixEntry {
    pub label: String,
    pub count: u32,
}

/// Dwelling units by type label, in first-seen order.
///
/// Labels are matched exactly; inserting an existing label replaces its count
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitMix {
    entries: Vec<UnitMixEntry>,
}

impl UnitMix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for `label`, returning the count it replaced.
    pub fn insert(&mut self, label: impl Into<String>, count: u32) -> Option<u32> {
        let label = label.into();
        match self.entries.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => Some(std::mem::replace(&mut entry.count, count)),
            None => {
                self.entries.push(UnitMixEntry { label, count });
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitMixEntry> {
        self.entries.iter()
    }

    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.count)).sum()
    }

    /// `"{label}: {count} units"` per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{}: {} units", entry.label, entry.count))
            .collect()
    }
}

/// A `label:count` token whose count was not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMixWarning {
    pub label: String,
    pub value: String,
}

impl fmt::Display for UnitMixWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value for {}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMixParse {
    pub mix: UnitMix,
    pub warnings: Vec<UnitMixWarning>,
}

/// Parses `1BR:20,2BR:15` style text.
///
/// Tokens are separated by `,` or `;`. A token without `:` is dropped quietly.
/// A token whose count does not parse is dropped with a warning and the rest
/// of the text is still read.
pub fn parse_unit_mix(text: &str) -> UnitMixParse {
    let mut parsed = UnitMixParse::default();

    for token in text.split([',', ';']) {
        let Some((label, count)) = token.split_once(':') else {
            continue;
        };
        let label = label.trim();
        let count = count.trim();

        match count.parse::<u32>() {
            Ok(count) => {
                parsed.mix.insert(label, count);
            }
            Err(_) => parsed.warnings.push(UnitMixWarning {
                label: label.to_string(),
                value: count.to_string(),
            }),
        }
    }

    parsed
}

//! Batch report types.
//!
//! Like the other report types in this crate, a [`BatchReport`] renders as
//! human-readable text via `Display` and serializes to JSON via serde.

use serde::Serialize;
use std::fmt;

use crate::geometry::Rect;

/// Which batch operation produced a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    #[default]
    Crop,
    List,
}

/// What happened to a single item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// The image and annotation were cropped and written.
    Cropped {
        /// Final crop region as `[left, top, right, bottom]`.
        envelope: Rect,
        /// Size of the written image.
        width: u32,
        height: u32,
        /// Objects kept in the output annotation.
        kept: usize,
        /// Objects removed from the output annotation.
        removed: usize,
    },
    /// Every object of the item is at or below the threshold.
    AllSmall,
    /// The item has at least one object above the threshold.
    HasLarge,
    /// The item could not be processed.
    Failed { error: String },
}

/// Per-item entry of a batch report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub id: String,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// The result of running a batch over an annotation folder.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    pub mode: BatchMode,
    pub threshold: i64,
    /// Entries sorted by item identifier.
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn new(mode: BatchMode, threshold: i64) -> Self {
        Self {
            mode,
            threshold,
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, id: impl Into<String>, outcome: ItemOutcome) {
        self.items.push(ItemReport {
            id: id.into(),
            outcome,
        });
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Returns true if no item failed.
    pub fn is_ok(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items
            .iter()
            .filter(|item| matches!(item.outcome, ItemOutcome::Failed { .. }))
    }

    /// Identifiers whose objects are all at or below the threshold.
    pub fn all_small_ids(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.outcome == ItemOutcome::AllSmall)
            .map(|item| item.id.as_str())
            .collect()
    }

    pub fn cropped_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.outcome, ItemOutcome::Cropped { .. }))
            .count()
    }

    fn sort(&mut self) {
        self.items.sort_by(|left, right| left.id.cmp(&right.id));
    }

    pub(crate) fn finish(mut self) -> Self {
        self.sort();
        self
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            BatchMode::List => {
                let ids = self.all_small_ids();
                writeln!(
                    f,
                    "{} of {} item(s) have every object at or below area {}:",
                    ids.len(),
                    self.total(),
                    self.threshold
                )?;
                for id in ids {
                    writeln!(f, "  {}", id)?;
                }
            }
            BatchMode::Crop => {
                writeln!(
                    f,
                    "Cropped {} of {} item(s) at area threshold {}",
                    self.cropped_count(),
                    self.total(),
                    self.threshold
                )?;
                for item in &self.items {
                    if let ItemOutcome::Cropped {
                        envelope,
                        width,
                        height,
                        kept,
                        removed,
                    } = &item.outcome
                    {
                        writeln!(
                            f,
                            "  {}: crop {} -> {}x{}, kept {}, removed {}",
                            item.id, envelope, width, height, kept, removed
                        )?;
                    }
                }
            }
        }

        let failed = self.failed_count();
        if failed > 0 {
            writeln!(f)?;
            writeln!(f, "Failures ({}):", failed)?;
            for item in self.failures() {
                if let ItemOutcome::Failed { error } = &item.outcome {
                    writeln!(f, "  - {}: {}", item.id, error)?;
                }
            }
        }

        Ok(())
    }
}

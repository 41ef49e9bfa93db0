use crate::{LexirankError, LexirankResult};

/// An ascending table of integer breakpoints with a floor lookup.
///
/// A lookup returns the value of the greatest breakpoint that is less than
/// or equal to the query. Queries below the first breakpoint fall back to the
/// first entry, and queries past the last breakpoint land in the last entry.
#[derive(Debug, Clone, Copy)]
pub struct BreakpointTable<V: 'static> {
    entries: &'static [(u32, V)],
}

impl<V: 'static> BreakpointTable<V> {
    /// Wraps a static table. Call [`BreakpointTable::validate`] in tests.
    pub const fn new(entries: &'static [(u32, V)]) -> Self {
        Self { entries }
    }

    /// Checks that the table is non-empty with strictly ascending keys.
    pub fn validate(&self) -> LexirankResult<()> {
        if self.entries.is_empty() {
            return Err(LexirankError::Config("Breakpoint table is empty".into()));
        }
        for pair in self.entries.windows(2) {
            if pair[0].0 >= pair[1].0 {
                return Err(LexirankError::Config(format!(
                    "Breakpoints must be strictly ascending, found {} before {}",
                    pair[0].0, pair[1].0
                )));
            }
        }
        Ok(())
    }

    /// Floor lookup of `value`. `None` only for an empty table.
    pub fn lookup(&self, value: u32) -> Option<&V> {
        let idx = self.entries.partition_point(|(bp, _)| *bp <= value);
        let idx = idx.saturating_sub(1);
        self.entries.get(idx).map(|(_, v)| v)
    }

    /// The breakpoints and values in ascending order.
    pub fn entries(&self) -> &'static [(u32, V)] {
        self.entries
    }
}

/// CEFR band reached by a known-word count.
pub const CEFR_BANDS: BreakpointTable<&str> = BreakpointTable::new(&[
    (0, "A1 - Low"),
    (350, "A1 - Middle"),
    (600, "A1 - High"),
    (1000, "A2 - Low"),
    (1500, "A2 - Middle"),
    (2000, "A2 - High"),
    (2500, "B1 - Low"),
    (3000, "B1 - Middle"),
    (3250, "B1 - High"),
    (3750, "B2 - Low"),
    (4250, "B2 - Middle"),
    (5000, "B2 - High"),
    (6500, "C1"),
    (9000, "C2"),
]);

/// What a reader with a given known-word count can typically do.
pub const PROFICIENCY_LABELS: BreakpointTable<&str> = BreakpointTable::new(&[
    (0, "Starter: recognizes a handful of isolated words"),
    (250, "Emerging: knows greetings, numbers and the most common nouns"),
    (500, "Basic: can follow very slow speech about familiar objects"),
    (750, "Survival: handles simple everyday exchanges with effort"),
    (1000, "Elementary: reads short notes and signs with a dictionary nearby"),
    (2000, "Functional: follows the main points of clear everyday speech"),
    (3000, "Independent: reads simplified texts and graded readers comfortably"),
    (4000, "Conversational: takes part in most unprepared conversations"),
    (5000, "Fluent reader: reads news articles with occasional lookups"),
    (6500, "Advanced: reads most general prose without a dictionary"),
    (8000, "Proficient: follows films, lectures and idiomatic speech"),
    (10000, "Highly proficient: reads literature with few unknown words"),
    (15000, "Near-native: vocabulary comparable to an educated adult speaker"),
    (20000, "Native-like breadth: knows rare and specialist words across domains"),
]);

/// CEFR band for a known-word count.
pub fn find_cefr(known_words: u32) -> &'static str {
    CEFR_BANDS.lookup(known_words).copied().unwrap_or_default()
}

/// Proficiency description for a known-word count.
pub fn find_label(known_words: u32) -> &'static str {
    PROFICIENCY_LABELS
        .lookup(known_words)
        .copied()
        .unwrap_or_default()
}

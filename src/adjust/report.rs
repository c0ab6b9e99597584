use super::path::FieldPath;

/// What happened to one path of the old configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    /// An adjuster grafted the value onto `target`
    Adjusted { target: FieldPath, via_override: bool },
    /// The path is known but the target chart type has no analog for it
    Dropped,
    /// The path is not part of the adjustable set
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustEntry {
    pub path: String,
    pub outcome: AdjustOutcome,
}

/// Per-path record of one chart type change, in walk order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustReport {
    pub entries: Vec<AdjustEntry>,
}

impl AdjustReport {
    pub(crate) fn record(&mut self, path: &str, outcome: AdjustOutcome) {
        self.entries.push(AdjustEntry {
            path: path.to_string(),
            outcome,
        });
    }

    pub fn outcome(&self, path: &str) -> Option<AdjustOutcome> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.outcome)
    }

    pub fn adjusted(&self) -> impl Iterator<Item = &AdjustEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, AdjustOutcome::Adjusted { .. }))
    }

    pub fn dropped(&self) -> impl Iterator<Item = &str> {
        self.with_outcome(AdjustOutcome::Dropped)
    }

    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.with_outcome(AdjustOutcome::Unrecognized)
    }

    fn with_outcome(&self, outcome: AdjustOutcome) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.outcome == outcome)
            .map(|e| e.path.as_str())
    }
}

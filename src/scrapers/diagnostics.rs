use std::sync::Mutex;

/// Something the extractor noticed while working through a page.
/// None of these are errors: every miss degrades to zero/`TBD`.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A section was dropped before becoming a game
    SectionSkipped { section: usize, reason: String },
    /// A single field could not be recovered
    FieldMissed { field: &'static str, detail: String },
    /// Logo count does not match what the layout expects
    LogoCountMismatch { expected: usize, found: usize },
    Note(String),
}

/// Sink for extraction diagnostics, passed through the pipeline
pub trait Recorder {
    fn record(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRecorder;

impl Recorder for TracingRecorder {
    fn record(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::SectionSkipped { section, reason } => {
                tracing::debug!(section, %reason, "section skipped");
            }
            Diagnostic::FieldMissed { field, detail } => {
                tracing::debug!(field, %detail, "field not extracted");
            }
            Diagnostic::LogoCountMismatch { expected, found } => {
                tracing::warn!(expected, found, "unexpected sportsbook logo count");
            }
            Diagnostic::Note(note) => tracing::trace!("{}", note),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn misses(&self, field: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Diagnostic::FieldMissed { field: f, .. } if *f == field))
            .count()
    }
}

impl Recorder for MemoryRecorder {
    fn record(&self, diagnostic: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_recorder_collects_events() {
        let recorder = MemoryRecorder::new();
        recorder.record(Diagnostic::FieldMissed {
            field: "awayMoneyline",
            detail: "no signed number".to_string(),
        });
        recorder.record(Diagnostic::Note("hello".to_string()));

        assert_eq!(recorder.events().len(), 2);
        assert_eq!(recorder.misses("awayMoneyline"), 1);
        assert_eq!(recorder.misses("homeMoneyline"), 0);
    }
}

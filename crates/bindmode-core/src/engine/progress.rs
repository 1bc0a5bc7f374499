use std::fmt;

/// Stages of a single analysis run.
///
/// A run moves strictly forward through `Unloaded → Loaded → Indexed → Classified →
/// Aggregated`; any fatal error moves it to `Failed` instead, and no report is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnalysisStage {
    Unloaded,
    Loaded,
    Indexed,
    Classified,
    Aggregated,
    Failed,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStage::Unloaded => "unloaded",
            AnalysisStage::Loaded => "loaded",
            AnalysisStage::Indexed => "indexed",
            AnalysisStage::Classified => "classified",
            AnalysisStage::Aggregated => "aggregated",
            AnalysisStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub enum Progress {
    StageReached(AnalysisStage),

    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().report(Progress::TaskIncrement);
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let events = Mutex::new(Vec::new());
        {
            let reporter = ProgressReporter::with_callback(Box::new(|event| {
                if let Progress::StageReached(stage) = event {
                    events.lock().unwrap().push(stage);
                }
            }));
            reporter.report(Progress::StageReached(AnalysisStage::Loaded));
            reporter.report(Progress::Message("ignored".to_string()));
            reporter.report(Progress::StageReached(AnalysisStage::Indexed));
        }
        assert_eq!(
            events.into_inner().unwrap(),
            vec![AnalysisStage::Loaded, AnalysisStage::Indexed]
        );
    }
}

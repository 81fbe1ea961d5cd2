use std::path::PathBuf;

/// One `(source, tag)` pair that made it all the way to the destination.
#[derive(Debug, Clone)]
pub struct SyncedSource {
    pub source: String,
    pub tag: String,
    /// Final destination directory of the rendered tree.
    pub dest: PathBuf,
}

/// One `(source, tag)` pair that failed somewhere in the pipeline.
#[derive(Debug, Clone)]
pub struct FailedSync {
    pub source: String,
    pub tag: String,
    pub error: String,
}

/// Outcome of a sync run. One failing pair never aborts the batch, so a
/// report can carry both successes and failures.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: Vec<SyncedSource>,
    pub failed: Vec<FailedSync>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_success() {
        assert!(SyncReport::default().is_success());
    }

    #[test]
    fn test_report_with_failure_is_not_success() {
        let mut report = SyncReport::default();
        report.failed.push(FailedSync {
            source: "widgets".to_string(),
            tag: "v1".to_string(),
            error: "boom".to_string(),
        });
        assert!(!report.is_success());
    }
}

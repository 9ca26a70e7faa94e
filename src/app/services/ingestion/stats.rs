//! Ingestion run statistics

/// Counters accumulated over one ingestion run
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IngestionStats {
    /// Files read and persisted without error
    pub files_processed: usize,

    /// Files skipped because they could not be read or saved
    pub files_failed: usize,

    /// Profiles that survived extraction across all files
    pub profiles_extracted: usize,

    /// Per-level rows written to the store
    pub rows_saved: usize,

    /// Error descriptions for the failed files
    pub errors: Vec<String>,
}

impl IngestionStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            files_processed: 0,
            files_failed: 0,
            profiles_extracted: 0,
            rows_saved: 0,
            errors: Vec::new(),
        }
    }

    /// Total files the run attempted
    pub fn files_seen(&self) -> usize {
        self.files_processed + self.files_failed
    }

    /// Calculate file success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.files_seen() == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.files_seen() as f64) * 100.0
        }
    }

    /// Human-readable one-screen summary
    pub fn summary(&self) -> String {
        format!(
            "Files processed: {} ({} failed)\n\
             Profiles extracted: {}\n\
             Rows saved: {}\n\
             Success rate: {:.1}%",
            self.files_processed,
            self.files_failed,
            self.profiles_extracted,
            self.rows_saved,
            self.success_rate()
        )
    }
}

impl Default for IngestionStats {
    fn default() -> Self {
        Self::new()
    }
}

use std::path::PathBuf;

use srp_core::{Kinetics, ObservableSeries, SrpError};

/// Destination for the normalised ensemble average.
pub trait OutputSink {
    /// Receives the final series and its kinetics.
    fn emit(&mut self, series: &ObservableSeries, kinetics: &Kinetics) -> Result<(), SrpError>;
}

/// Writes the averaged series as CSV.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for CsvSink {
    fn emit(&mut self, series: &ObservableSeries, kinetics: &Kinetics) -> Result<(), SrpError> {
        series.write_csv(&self.path, kinetics)
    }
}

/// Keeps the last emitted result in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Last emitted series and kinetics.
    pub output: Option<(ObservableSeries, Kinetics)>,
}

impl OutputSink for MemorySink {
    fn emit(&mut self, series: &ObservableSeries, kinetics: &Kinetics) -> Result<(), SrpError> {
        self.output = Some((series.clone(), kinetics.clone()));
        Ok(())
    }
}

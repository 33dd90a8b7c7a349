use cfipcheck::{ClassificationResult, Result};
use std::fs::File;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save Classification Results to a CSV File
-------------------------------------------------------------------------------------------------*/

/// Streams one `address,result` record per classified candidate.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;

        // Write header
        writer.write_record(["address", "result"])?;

        Ok(CsvSink { writer })
    }

    pub fn write(&mut self, result: &ClassificationResult) -> Result<()> {
        self.writer
            .write_record([result.token.as_str(), result.classification.as_str()])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

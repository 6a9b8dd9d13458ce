//! JSON executor
//!
//! Stands in for the slicer's calibration runner: each accepted record is
//! written as pretty JSON followed by a newline.

use calibkit_core::{CalibrationExecutor, ValidatedParams};
use std::io::{self, Write};
use tracing::error;

pub struct JsonExecutor<W: Write> {
    writer: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> JsonExecutor<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the writer, or the first write error encountered.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_record(&mut self, params: &ValidatedParams) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, params)?;
        writeln!(self.writer)
    }
}

impl<W: Write> CalibrationExecutor for JsonExecutor<W> {
    fn execute(&mut self, params: ValidatedParams) {
        if self.error.is_some() {
            return;
        }
        match self.write_record(&params) {
            Ok(()) => self.written += 1,
            Err(e) => {
                error!(mode = %params.mode(), error = %e, "failed to write calibration record");
                self.error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calibkit_core::{CalibrationForm, TowerForm};

    #[test]
    fn test_writes_one_record() {
        let mut executor = JsonExecutor::new(Vec::new());
        TowerForm::retraction().confirm(&mut executor).unwrap();
        assert_eq!(executor.written(), 1);

        let out = String::from_utf8(executor.finish().unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mode"], "retraction_tower");
        assert_eq!(value["end"], 2.0);
    }

    #[test]
    fn test_rejected_form_writes_nothing() {
        let mut form = TowerForm::retraction();
        form.step = "-1".to_string();
        let mut executor = JsonExecutor::new(Vec::new());
        assert!(form.confirm(&mut executor).is_err());
        assert_eq!(executor.written(), 0);
        assert!(executor.finish().unwrap().is_empty());
    }
}

//! Append-only text log of completed evaluations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ap_types::{ApResult, BoundarySet, Candidate, FIELD_SEPARATOR};
use tracing::info;

/// Writes a header of parameter names followed by one line of values per
/// completed evaluation, in completion order.
#[derive(Debug)]
pub struct CompletionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    lines: usize,
}

impl CompletionLog {
    /// Creates (or truncates) the file at `path` and writes the header.
    pub fn create(path: impl AsRef<Path>, boundaries: &BoundarySet) -> ApResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut writer = BufWriter::new(File::create(&path)?);

        let mut header: Vec<&str> = boundaries.names().collect();
        header.push("result");
        writeln!(writer, "{}", header.join(&FIELD_SEPARATOR.to_string()))?;

        info!(path = %path.display(), "completion log enabled");
        Ok(Self {
            path,
            writer,
            lines: 0,
        })
    }

    pub fn append(&mut self, candidate: &Candidate) -> ApResult<()> {
        writeln!(self.writer, "{}", candidate.to_string_values())?;
        self.lines += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> ApResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of value lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

use crate::utils::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Incrementally builds a JSON array on disk, one record per `append`,
/// without keeping the collection in memory.
///
/// The file is only a well-formed array after `close` has run; a crash
/// mid-run leaves a truncated file. That limitation is inherited from the
/// streaming layout and is accepted.
pub struct StreamingWriter {
    out: BufWriter<File>,
    path: PathBuf,
    count: u64,
}

impl StreamingWriter {
    /// Creates (truncating) the target file and writes the opening bracket.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut out = BufWriter::new(File::create(&path)?);
        out.write_all(b"[\n")?;
        Ok(Self {
            out,
            path,
            count: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Appends one record, pretty-printed. Every record after the first is
    /// preceded by a separator.
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<()> {
        if self.count > 0 {
            self.out.write_all(b",\n")?;
        }
        let json = serde_json::to_string_pretty(record)?;
        self.out.write_all(json.as_bytes())?;
        self.count += 1;
        Ok(())
    }

    /// Writes the closing bracket and flushes to durable storage. Returns
    /// the number of records written.
    pub fn close(mut self) -> Result<u64> {
        self.out.write_all(b"\n]")?;
        self.out.flush()?;
        self.out.get_ref().sync_all()?;
        Ok(self.count)
    }
}

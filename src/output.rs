use crate::{Record, ScraperError, Vendor};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only destination for extracted records.
pub trait RecordSink {
    fn append_record(&mut self, record: &Record) -> Result<(), ScraperError>;
}

pub struct FileSink {
    path: PathBuf,
    out: BufWriter<File>,
}

impl FileSink {
    /// Truncates `path`, creating parent directories when needed.
    pub fn create(path: &Path) -> Result<FileSink, ScraperError> {
        ensure_parent(path)?;
        let file = File::create(path)?;
        Ok(FileSink {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
        })
    }

    pub fn finish(mut self) -> Result<PathBuf, ScraperError> {
        self.out.flush()?;
        Ok(self.path)
    }
}

impl RecordSink for FileSink {
    fn append_record(&mut self, record: &Record) -> Result<(), ScraperError> {
        record.write_line(&mut self.out)?;
        Ok(())
    }
}

pub fn vendor_path(output_dir: &Path, vendor: &Vendor) -> PathBuf {
    output_dir.join(&vendor.output)
}

/// Writes `target` as the byte concatenation of `parts`, in order.
pub fn concat_files(parts: &[PathBuf], target: &Path) -> Result<(), ScraperError> {
    ensure_parent(target)?;
    let mut out = BufWriter::new(File::create(target)?);
    for part in parts {
        out.write_all(&fs::read(part)?)?;
    }
    out.flush()?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ScraperError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

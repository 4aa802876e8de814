use std::fmt;
use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::SerializationError;

/// Where the generated document goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("<stdout>"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Scoped writer for a single output.
///
/// File output is written to a sibling `.tmp` file and moved into place by
/// [`Sink::commit`]. Dropping a sink that was not committed deletes the
/// temporary file, so the destination never holds a partial document.
pub struct Sink {
    kind: SinkKind,
}

enum SinkKind {
    Stdout(BufWriter<Stdout>),
    File(Option<PendingFile>),
}

struct PendingFile {
    writer: BufWriter<File>,
    tmp_path: PathBuf,
    path: PathBuf,
}

impl Sink {
    pub fn open(target: &OutputTarget) -> Result<Self, SerializationError> {
        let kind = match target {
            OutputTarget::Stdout => SinkKind::Stdout(BufWriter::new(io::stdout())),
            OutputTarget::File(path) => SinkKind::File(Some(PendingFile::create(path)?)),
        };
        Ok(Self { kind })
    }

    /// Flush everything and, for files, publish the document at its path.
    pub fn commit(mut self) -> Result<(), SerializationError> {
        match &mut self.kind {
            SinkKind::Stdout(writer) => writer.flush()?,
            SinkKind::File(slot) => {
                if let Some(pending) = slot.take() {
                    pending.publish()?;
                }
            }
        }
        Ok(())
    }

    fn writer(&mut self) -> io::Result<&mut dyn Write> {
        match &mut self.kind {
            SinkKind::Stdout(writer) => Ok(writer),
            SinkKind::File(Some(pending)) => Ok(&mut pending.writer),
            SinkKind::File(None) => Err(io::Error::other("sink already committed")),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        if let SinkKind::File(slot) = &mut self.kind
            && let Some(pending) = slot.take()
        {
            pending.discard();
        }
    }
}

impl PendingFile {
    fn create(path: &Path) -> Result<Self, SerializationError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }
        let tmp_path = temp_path(path)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&tmp_path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            tmp_path,
            path: path.to_path_buf(),
        })
    }

    fn publish(self) -> Result<(), SerializationError> {
        let PendingFile {
            writer,
            tmp_path,
            path,
        } = self;
        let result = finish_file(writer, &tmp_path, &path);
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp_path);
        }
        result
    }

    fn discard(self) {
        drop(self.writer);
        let _ = std::fs::remove_file(&self.tmp_path);
    }
}

fn finish_file(
    writer: BufWriter<File>,
    tmp_path: &Path,
    path: &Path,
) -> Result<(), SerializationError> {
    let file = writer.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, SerializationError> {
    let file_name = path.file_name().ok_or_else(|| {
        SerializationError::InvalidPath(format!("{} has no file name", path.display()))
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

/// Write `value` as pretty JSON to `path`, replacing it atomically.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), SerializationError> {
    let mut sink = Sink::open(&OutputTarget::File(path.to_path_buf()))?;
    serde_json::to_writer_pretty(&mut sink, value)?;
    sink.write_all(b"\n")?;
    sink.commit()
}

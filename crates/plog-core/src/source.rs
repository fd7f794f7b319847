//! Line sources — the ordered inputs of a scan.
//!
//! A source only has to hand out a buffered reader. Rotation and discovery
//! are the caller's business: the scan consumes whatever list it is given,
//! in order.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Something a scan can read lines from.
pub trait LineSource {
    /// Human-readable name used in diagnostics.
    fn name(&self) -> String;

    /// Open the source for reading from the beginning.
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

impl<T: LineSource + ?Sized> LineSource for &T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        (**self).open()
    }
}

impl<T: LineSource + ?Sized> LineSource for Box<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        (**self).open()
    }
}

/// A log file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}

/// Build one [`FileSource`] per path, keeping order.
pub fn file_sources<I, P>(paths: I) -> Vec<FileSource>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths.into_iter().map(FileSource::new).collect()
}

/// In-memory text, for tests and benchmarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySource {
    name: String,
    text: String,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn from_lines<S: AsRef<str>>(name: impl Into<String>, lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(name, text)
    }
}

impl LineSource for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(self.text.as_bytes()))
    }
}

/// Iterator over the lines of a reader. Bytes that are not valid UTF-8 are
/// dropped, and trailing `\n` / `\r\n` is stripped.
pub struct Lines<'a> {
    reader: Box<dyn BufRead + 'a>,
    buf: Vec<u8>,
}

impl<'a> Lines<'a> {
    pub fn new(reader: Box<dyn BufRead + 'a>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(self.buf.utf8_chunks().map(|chunk| chunk.valid()).collect()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

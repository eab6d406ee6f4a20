//! Document sources

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads one document per line, with whitespace-separated tokens
pub struct LineDocuments<R: BufRead> {
    lines: io::Lines<R>,
}

impl<R: BufRead> LineDocuments<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl LineDocuments<BufReader<File>> {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for LineDocuments<R> {
    type Item = io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(line.map(|line| line.split_whitespace().map(str::to_string).collect()))
    }
}

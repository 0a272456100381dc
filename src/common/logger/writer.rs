use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::PathBuf,
    sync::{Arc, Mutex},
};

/// Appends log lines to a file and trims it back to the newest `max_lines`
/// once enough new lines have accumulated.
#[derive(Clone)]
pub struct CappedFileWriter {
    path: PathBuf,
    max_lines: usize,
    pending: Arc<Mutex<usize>>,
}

impl CappedFileWriter {
    pub fn new(path: impl Into<PathBuf>, max_lines: usize) -> Self {
        Self {
            path: path.into(),
            max_lines: max_lines.max(1),
            pending: Arc::new(Mutex::new(0)),
        }
    }

    /// Lines written between two trims: 10% of the cap, at least 50.
    fn trim_every(&self) -> usize {
        (self.max_lines / 10).max(50)
    }

    fn trim(&self) -> io::Result<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        let lines: Vec<&str> = content.lines().collect();
        if lines.len() <= self.max_lines {
            return Ok(());
        }

        let mut kept = lines[lines.len() - self.max_lines..].join("\n");
        kept.push('\n');
        fs::write(&self.path, kept)
    }
}

impl io::Write for CappedFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?
            .write_all(buf)?;

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *pending += buf.iter().filter(|&&b| b == b'\n').count();

        if *pending >= self.trim_every() {
            if let Err(e) = self.trim() {
                eprintln!("Failed to trim log file: {}", e);
            }
            *pending = 0;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CappedFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_newest_lines_after_trim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lixget.log");
        let mut writer = CappedFileWriter::new(&path, 20);

        for i in 0..60 {
            writer.write_all(format!("line {}\n", i).as_bytes()).unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // trimmed at the 50th line, then 10 more appended
        assert_eq!(lines.len(), 30);
        assert_eq!(lines.first(), Some(&"line 30"));
        assert_eq!(lines.last(), Some(&"line 59"));
    }

    #[test]
    fn short_logs_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lixget.log");
        let mut writer = CappedFileWriter::new(&path, 1000);

        writer.write_all(b"first\nsecond\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}

use std::io::Write;

/// An implementation of `std::io::Write` collecting the written bytes into a `String`.
///
/// Used to send multi-line outputs (help messages, summaries) to the logger line by line.
#[derive(Default)]
pub(crate) struct WritableString(String);

impl WritableString {
    /// Returns the lines written so far.
    pub(crate) fn lines(&self) -> std::str::Lines<'_> {
        self.0.lines()
    }
}

impl Write for WritableString {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Display for WritableString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

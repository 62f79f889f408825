//! Abstract generation target: a production file writer plus an
//! in-memory test double, both built on the same indentation model so
//! the generator itself never touches a file handle directly.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use mylc_util::IoError;

use crate::error::CodegenResult;

/// One output file's indentation-aware print surface. `disable_next_indent`
/// is a one-shot flag: the following `print_indented` call skips the
/// leading spaces (used to keep a brace on the same line as `if (...)`).
pub trait OutputSink {
    fn open(&mut self, path: &Path) -> CodegenResult<()>;
    fn print(&mut self, text: &str);
    fn print_indented(&mut self, text: &str);
    fn increase_depth(&mut self);
    fn decrease_depth(&mut self);
    fn disable_next_indent(&mut self);
    fn close(&mut self) -> CodegenResult<()>;

    /// Non-`None` only for the in-memory test double; lets golden tests
    /// read back generated content without downcasting.
    fn as_buffer_content(&self) -> Option<&str> {
        None
    }
}

/// Shared depth-tracking state every concrete sink delegates to.
#[derive(Default)]
struct Indentation {
    depth: u32,
    suppress_next: bool,
}

impl Indentation {
    fn prefix(&mut self) -> String {
        if self.suppress_next {
            self.suppress_next = false;
            String::new()
        } else {
            " ".repeat(4 * self.depth as usize)
        }
    }
}

pub struct FileOutputSink {
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
    indent: Indentation,
}

impl FileOutputSink {
    pub fn new() -> Self {
        Self { path: None, writer: None, indent: Indentation::default() }
    }
}

impl OutputSink for FileOutputSink {
    fn open(&mut self, path: &Path) -> CodegenResult<()> {
        let file = File::create(path).map_err(|source| IoError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        self.path = Some(path.to_path_buf());
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    fn print(&mut self, text: &str) {
        if let Some(writer) = &mut self.writer {
            let _ = writer.write_all(text.as_bytes());
        }
    }

    fn print_indented(&mut self, text: &str) {
        let prefix = self.indent.prefix();
        self.print(&prefix);
        self.print(text);
    }

    fn increase_depth(&mut self) {
        self.indent.depth += 1;
    }

    fn decrease_depth(&mut self) {
        self.indent.depth -= 1;
    }

    fn disable_next_indent(&mut self) {
        self.indent.suppress_next = true;
    }

    fn close(&mut self) -> CodegenResult<()> {
        if let Some(mut writer) = self.writer.take() {
            let path = self.path.clone().expect("writer implies a path was opened");
            writer.flush().map_err(|source| IoError::WriteFailed { path, source })?;
        }
        Ok(())
    }
}

/// Collects printed text into an in-memory buffer, for golden tests that
/// compare generated content without touching the filesystem.
#[derive(Default)]
pub struct BufferOutputSink {
    content: String,
    indent: Indentation,
}

impl BufferOutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl OutputSink for BufferOutputSink {
    fn open(&mut self, _path: &Path) -> CodegenResult<()> {
        self.content.clear();
        Ok(())
    }

    fn print(&mut self, text: &str) {
        self.content.push_str(text);
    }

    fn print_indented(&mut self, text: &str) {
        let prefix = self.indent.prefix();
        self.content.push_str(&prefix);
        self.content.push_str(text);
    }

    fn increase_depth(&mut self) {
        self.indent.depth += 1;
    }

    fn decrease_depth(&mut self) {
        self.indent.depth -= 1;
    }

    fn disable_next_indent(&mut self) {
        self.indent.suppress_next = true;
    }

    fn close(&mut self) -> CodegenResult<()> {
        Ok(())
    }

    fn as_buffer_content(&self) -> Option<&str> {
        Some(&self.content)
    }
}

/// Creates fresh sinks on demand, so the generator can be parameterized
/// over the real file writer in production and the buffer double in
/// tests without knowing which one it holds.
pub trait OutputSinkFactory {
    fn create(&self) -> Box<dyn OutputSink>;
}

pub struct FileSinkFactory;

impl OutputSinkFactory for FileSinkFactory {
    fn create(&self) -> Box<dyn OutputSink> {
        Box::new(FileOutputSink::new())
    }
}

#[derive(Default)]
pub struct BufferSinkFactory;

impl OutputSinkFactory for BufferSinkFactory {
    fn create(&self) -> Box<dyn OutputSink> {
        Box::new(BufferOutputSink::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disable_next_indent_only_suppresses_one_call() {
        let mut sink = BufferOutputSink::new();
        sink.increase_depth();
        sink.disable_next_indent();
        sink.print_indented("a");
        sink.print_indented("b");
        assert_eq!(sink.content(), "a    b");
    }

    #[test]
    fn depth_controls_indentation_width() {
        let mut sink = BufferOutputSink::new();
        sink.increase_depth();
        sink.increase_depth();
        sink.print_indented("x");
        assert_eq!(sink.content(), "        x");
    }
}

//! Maps opaque `FileId`s to the path and text of each input file, so later
//! stages can report diagnostics without re-reading disk.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use mylc_util::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u32);

pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// Preserves input-file order (`IndexMap`) so diagnostics and generated
/// output are reported in the order the user listed files on the command
/// line.
#[derive(Default)]
pub struct SourceMap {
    files: IndexMap<FileId, SourceFile>,
    next_id: u32,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<FileId, IoError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| IoError::ReadFailed { path: path.to_path_buf(), source })?;
        let id = FileId(self.next_id);
        self.next_id += 1;
        self.files.insert(id, SourceFile { path: path.to_path_buf(), content });
        Ok(id)
    }

    pub fn get(&self, id: FileId) -> &SourceFile {
        self.files.get(&id).expect("FileId is only constructed by SourceMap::load")
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files.iter().map(|(id, file)| (*id, file))
    }
}

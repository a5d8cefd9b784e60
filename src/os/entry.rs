#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EntryType {
    File,
    Directory,
}

/// A node of [`MemoryOs`](super::MemoryOs). Only files carry content.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    entry_type: EntryType,
    content: Option<Vec<u8>>,
}

impl Entry {
    pub fn new(entry_type: EntryType) -> Entry {
        let content = match entry_type {
            EntryType::File => Some(Vec::new()),
            EntryType::Directory => None,
        };
        Entry {
            entry_type,
            content,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    pub fn content(&self) -> Option<&Vec<u8>> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: &[u8]) {
        if self.is_file() {
            self.content = Some(content.to_vec());
        }
    }

    pub fn append_content(&mut self, content: &[u8]) {
        if let Some(existing) = self.content.as_mut() {
            existing.extend_from_slice(content);
        }
    }
}

mod entry;
mod host;
mod memory;

pub use entry::{Entry, EntryType};
pub use host::HostOs;
pub use memory::MemoryOs;

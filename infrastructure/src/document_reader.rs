use anyhow::Context;
use memmap2::Mmap;
use shared::types::Result;
use std::fs::File;
use std::path::Path;

/// Read a whole UTF-8 document into memory.
///
/// Invalid UTF-8 is an error rather than being replaced, so a mis-encoded
/// source never ends up embedded.
pub fn read_document(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let len = file.metadata()?.len();
    // Mapping a zero-length file fails on some platforms.
    if len == 0 {
        return Ok(String::new());
    }
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    Ok(text.to_string())
}

//! Memory-mapped / buffered line reading and binary detection.

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

/// Threshold above which a file is read via memory mapping rather than a
/// single buffered read.
const MMAP_THRESHOLD_BYTES: u64 = 64 * 1024;

/// Bytes sampled from the start of a file to decide binary-ness.
const BINARY_SNIFF_BYTES: usize = 8 * 1024;

/// Either a memory map or an owned buffer; both deref to `&[u8]` so callers
/// don't need to know which strategy was used.
pub enum FileBytes {
    Mapped(memmap2::Mmap),
    Buffered(Vec<u8>),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Buffered(buf) => &buf[..],
        }
    }
}

/// Opens `path` and reads its full contents, choosing mmap vs. buffered by
/// size. Returns `Ok(None)` for an empty file.
pub fn open(path: &Path) -> std::io::Result<Option<FileBytes>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(None);
    }
    if len >= MMAP_THRESHOLD_BYTES {
        // Safety: the file is not modified for the lifetime of this mapping
        // from this process's perspective; a concurrent external writer is
        // an accepted, well-known mmap hazard shared by every line-oriented
        // scanner that memory-maps untrusted files.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Ok(Some(FileBytes::Mapped(mmap)))
    } else {
        let mut buf = Vec::with_capacity(len as usize);
        let mut file = file;
        file.read_to_end(&mut buf)?;
        Ok(Some(FileBytes::Buffered(buf)))
    }
}

/// Binary detection: any `0x00` byte in the first 8 KiB.
#[must_use]
pub fn looks_binary(bytes: &[u8]) -> bool {
    let sample_len = bytes.len().min(BINARY_SNIFF_BYTES);
    bytes[..sample_len].contains(&0u8)
}

/// Splits on `\n`, stripping an optional trailing `\r`, producing 1-based
/// `(lineNumber, text)` pairs. Non-UTF-8 bytes are lossily replaced; only
/// ASCII-superset line delimiters are promised.
#[must_use]
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    let mut lines: Vec<String> = bytes
        .split(|&b| b == b'\n')
        .map(|raw| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            String::from_utf8_lossy(raw).into_owned()
        })
        .collect();
    // A trailing `\n` produces a phantom empty final segment; a file ending
    // without a newline does not, so only drop it when the byte was there.
    if bytes.last() == Some(&b'\n') {
        lines.pop();
    }
    lines
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;

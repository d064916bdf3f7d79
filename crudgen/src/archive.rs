//! Archive packaging
//!
//! Packs a [`GeneratedFileSet`] into an in-memory zip archive: one deflated
//! entry per file, entry name equal to the file path, in insertion order.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{GenerationError, Result};
use crate::file_set::{GeneratedFile, GeneratedFileSet};

/// File name offered to clients for the archive
pub const DEFAULT_ARCHIVE_NAME: &str = "GeneratedCode.zip";

/// Write a file set into zip bytes
///
/// # Errors
///
/// Returns [`GenerationError::PackagingError`] if any entry cannot be
/// written. No partial archive is returned.
///
/// # Examples
///
/// ```
/// # use crudgen::archive::{pack, unpack};
/// # use crudgen::file_set::{GeneratedFile, GeneratedFileSet};
/// # fn main() -> crudgen::Result<()> {
/// let mut files = GeneratedFileSet::new();
/// files.insert(GeneratedFile::new("Program.cs", "var app;", "bootstrap"))?;
///
/// let bytes = pack(&files)?;
/// assert_eq!(unpack(&bytes)?.get("Program.cs"), Some("var app;"));
/// # Ok(())
/// # }
/// ```
pub fn pack(files: &GeneratedFileSet) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (path, content) in files.iter() {
        writer.start_file(path, options)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|err| GenerationError::packaging(format!("{path}: {err}")))?;
    }

    let bytes = writer.finish()?.into_inner();
    tracing::debug!(entries = files.len(), bytes = bytes.len(), "packed archive");
    Ok(bytes)
}

/// Read zip bytes back into a file set, keeping entry order
///
/// Directory entries are skipped. Entry content must be UTF-8.
///
/// # Errors
///
/// Returns [`GenerationError::PackagingError`] for malformed archives or
/// non-UTF-8 entries, and [`GenerationError::DuplicatePath`] if an entry
/// name repeats.
pub fn unpack(bytes: &[u8]) -> Result<GeneratedFileSet> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut files = GeneratedFileSet::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let path = entry.name().to_string();
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .map_err(|err| GenerationError::packaging(format!("{path}: {err}")))?;

        files.insert(GeneratedFile::new(path, content, ""))?;
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratedFileSet {
        let mut files = GeneratedFileSet::new();
        for (path, content) in [
            ("Models/Order.cs", "public class Order {}"),
            ("AppDbContext.cs", "public class AppDbContext {}"),
            ("appsettings.json", "{}"),
            ("Empty.cs", ""),
        ] {
            files.insert(GeneratedFile::new(path, content, "")).unwrap();
        }
        files
    }

    #[test]
    fn test_round_trip_keeps_order_and_content() {
        let files = sample();
        let restored = unpack(&pack(&files).unwrap()).unwrap();

        assert_eq!(
            restored.paths().collect::<Vec<_>>(),
            files.paths().collect::<Vec<_>>()
        );
        for (path, content) in files.iter() {
            assert_eq!(restored.get(path), Some(content));
        }
    }

    #[test]
    fn test_non_ascii_content_is_stored_as_utf8() {
        let content = "// café ✓\npublic string Name { get; set; } = \"Zoë\";";
        let mut files = GeneratedFileSet::new();
        files
            .insert(GeneratedFile::new("Models/Café.cs", content, ""))
            .unwrap();

        let bytes = pack(&files).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut raw = Vec::new();
        archive
            .by_name("Models/Café.cs")
            .unwrap()
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw, content.as_bytes());

        let restored = unpack(&bytes).unwrap();
        assert_eq!(restored.get("Models/Café.cs"), Some(content));
    }

    #[test]
    fn test_entries_are_deflated() {
        let bytes = pack(&sample()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let entry = archive.by_name("Models/Order.cs").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn test_empty_set_packs() {
        let bytes = pack(&GeneratedFileSet::new()).unwrap();
        assert!(unpack(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_a_packaging_error() {
        let err = unpack(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, GenerationError::PackagingError(_)));
    }
}

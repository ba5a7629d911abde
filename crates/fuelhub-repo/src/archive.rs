//! Zip export of a repository tree
//!
//! Archives are written to a temporary file next to the destination and
//! renamed into place once complete, so readers never observe a partial zip.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{RepoError, Result};
use crate::walk::walk_paths;

/// Write `files` (repository-relative paths) into a zip archive.
///
/// Folder entries are emitted before their contents. `read` supplies the
/// bytes of each file. Returns the final archive path.
pub fn write_zip<F>(output: Option<&Path>, files: &[String], mut read: F) -> Result<PathBuf>
where
    F: FnMut(&str) -> Result<Vec<u8>>,
{
    let target_dir = output
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir);

    let mut tmp = tempfile::Builder::new()
        .prefix(".fuelhub-")
        .suffix(".zip")
        .tempfile_in(&target_dir)?;

    {
        let mut zip = ZipWriter::new(tmp.as_file_mut());
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        walk_paths(files.iter().map(String::as_str), true, &mut |entry| {
            let name = entry.path.trim_start_matches('/');
            if entry.is_dir {
                zip.add_directory(format!("{}/", name), options)?;
            } else {
                let content = read(name)?;
                zip.start_file(name.to_string(), options)?;
                zip.write_all(&content)?;
            }
            Ok(())
        })?;

        zip.finish()?;
    }

    match output {
        Some(path) => {
            tmp.persist(path)?;
            Ok(path.to_path_buf())
        }
        None => {
            let (_, path) = tmp.keep()?;
            Ok(path)
        }
    }
}

/// List entry names in a zip archive
pub fn list_entries(archive_path: &Path) -> Result<Vec<String>> {
    let archive = ZipArchive::new(File::open(archive_path)?)?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Read one file out of a zip archive
pub fn read_entry(archive_path: &Path, name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;
    let mut file = archive.by_name(name).map_err(|_| RepoError::FileNotFound {
        path: name.to_string(),
        rev: archive_path.display().to_string(),
    })?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

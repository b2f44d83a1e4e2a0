//! Directory tree enumeration for the writer.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use chrono::{DateTime, Local};
use tokio::fs;

use super::source::FileSource;
use crate::error::Result;
use crate::zip::ArchiveEntry;

/// Collect an archive entry for every regular file under `root`.
///
/// Hidden files and directories (names starting with `.`) are skipped.
/// Each directory is visited in name order, so the same tree always yields
/// the same entry list. Relative paths inside the archive use `/` as the
/// separator regardless of platform. File modification times are carried
/// into the entries.
pub async fn collect_entries(root: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    walk(root.to_path_buf(), String::new(), &mut entries).await?;
    Ok(entries)
}

// Recursive async fn, boxed by hand.
fn walk<'a>(
    dir: PathBuf,
    prefix: String,
    out: &'a mut Vec<ArchiveEntry>,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        let mut read_dir = fs::read_dir(&dir).await?;
        let mut children: Vec<(String, PathBuf, bool)> = Vec::new();
        while let Some(dirent) = read_dir.next_entry().await? {
            let name = dirent.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let file_type = dirent.file_type().await?;
            children.push((name, dirent.path(), file_type.is_dir()));
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path, is_dir) in children {
            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            if is_dir {
                walk(path, relative, out).await?;
            } else {
                let metadata = fs::metadata(&path).await?;
                let source = FileSource::new(&path);
                let mut entry = ArchiveEntry::from_source(relative, &source).await?;
                if let Ok(modified) = metadata.modified() {
                    entry = entry.with_modified(DateTime::<Local>::from(modified));
                }
                out.push(entry);
            }
        }
        Ok(())
    })
}

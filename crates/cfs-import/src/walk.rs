//! Directory walking.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use cfs_store::{Backend, Directory};
use cfs_tree::ContentFs;
use cfs_types::HashRef;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{ImportError, ImportResult};
use crate::filter::ImportFilter;

/// What an import wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSummary {
    pub root: HashRef,
    pub files: u64,
    pub directories: u64,
    pub bytes: u64,
    /// Entries rejected by the filter. A rejected directory counts once.
    pub skipped: u64,
}

#[derive(Default)]
struct Tally {
    files: u64,
    directories: u64,
    bytes: u64,
    skipped: u64,
}

/// Write the tree under `dir` to `backend` and return its root reference.
pub async fn walk(
    dir: impl AsRef<Path>,
    backend: &dyn Backend,
    filter: &dyn ImportFilter,
) -> ImportResult<HashRef> {
    Ok(walk_with_summary(dir, backend, filter).await?.root)
}

/// Like [`walk`], also reporting what was written.
pub async fn walk_with_summary(
    dir: impl AsRef<Path>,
    backend: &dyn Backend,
    filter: &dyn ImportFilter,
) -> ImportResult<ImportSummary> {
    let dir = dir.as_ref();
    let mut tally = Tally::default();
    let root = walk_dir(dir, backend, filter, &mut tally).await?;
    info!(
        dir = %dir.display(),
        root = %root,
        files = tally.files,
        directories = tally.directories,
        skipped = tally.skipped,
        "directory imported"
    );
    Ok(ImportSummary {
        root,
        files: tally.files,
        directories: tally.directories,
        bytes: tally.bytes,
        skipped: tally.skipped,
    })
}

/// Import `dir` into `fs` and install it as the root of a store that has
/// none yet.
pub async fn import_into(
    fs: &ContentFs,
    dir: impl AsRef<Path>,
    filter: &dyn ImportFilter,
) -> ImportResult<ImportSummary> {
    let summary = walk_with_summary(dir, fs.local().as_ref(), filter).await?;
    fs.set_root(&summary.root, None)?;
    Ok(summary)
}

/// Create a store over `local` and `remote` seeded with the tree under `dir`.
pub async fn from_directory(
    dir: impl AsRef<Path>,
    local: Arc<dyn Backend>,
    remote: Arc<dyn Backend>,
    filter: &dyn ImportFilter,
) -> ImportResult<ContentFs> {
    let fs = ContentFs::new(local, remote)?;
    import_into(&fs, dir, filter).await?;
    Ok(fs)
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = ImportResult<HashRef>> + Send + 'a>>;

fn walk_dir<'a>(
    dir: &'a Path,
    backend: &'a dyn Backend,
    filter: &'a dyn ImportFilter,
    tally: &'a mut Tally,
) -> WalkFuture<'a> {
    Box::pin(async move {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await.map_err(ImportError::io(dir))?;
        while let Some(entry) = entries.next_entry().await.map_err(ImportError::io(dir))? {
            names.push(entry.file_name());
        }
        names.sort();

        let mut listing = Directory::new();
        for name in names {
            let path = dir.join(&name);
            if !filter.accept(&path).await {
                debug!(path = %path.display(), "filtered out");
                tally.skipped += 1;
                continue;
            }
            let Some(key) = name.to_str() else {
                return Err(ImportError::NonUtf8Name(path));
            };

            let meta = fs::metadata(&path).await.map_err(ImportError::io(&path))?;
            let target = if meta.is_dir() {
                walk_dir(&path, backend, filter, &mut *tally).await?
            } else {
                let data = fs::read(&path).await.map_err(ImportError::io(&path))?;
                tally.files += 1;
                tally.bytes += data.len() as u64;
                HashRef::blob(backend.set(Bytes::from(data)).await?)
            };
            listing.insert(key, target);
        }

        let hash = backend.set(listing.to_bytes()?).await?;
        tally.directories += 1;
        debug!(dir = %dir.display(), entries = listing.len(), hash = %hash.short(), "directory stored");
        Ok(HashRef::dir(hash))
    })
}

//! Read-side resolution of addresses to objects.

use bytes::Bytes;
use cfs_store::Directory;

use crate::error::{FsError, FsResult};
use crate::fetch::Resolved;
use crate::fs::StoreContext;
use crate::path::Address;

pub(crate) async fn resolve(ctx: &StoreContext, address: &str) -> FsResult<Resolved> {
    let segments = match Address::parse(address)? {
        Address::Hash(target) => return ctx.fetcher.fetch(&target).await,
        Address::Path(segments) => segments,
    };

    let root = ctx.current_root()?.ok_or(FsError::RootUnset)?;
    let mut current = ctx.fetcher.fetch(&root).await?;
    for segment in segments {
        let target = match &current {
            Resolved::Dir(dir) => dir.get(segment).cloned(),
            Resolved::Blob(_) => None,
        }
        .ok_or_else(|| FsError::NotFound(address.to_string()))?;
        current = ctx.fetcher.fetch(&target).await?;
    }
    Ok(current)
}

pub(crate) async fn get(ctx: &StoreContext, address: &str) -> FsResult<Bytes> {
    match resolve(ctx, address).await? {
        Resolved::Blob(data) => Ok(data),
        Resolved::Dir(_) => Err(FsError::NotFound(address.to_string())),
    }
}

pub(crate) async fn ls_raw(ctx: &StoreContext, address: &str) -> FsResult<Directory> {
    match resolve(ctx, address).await? {
        Resolved::Dir(dir) => Ok(dir),
        Resolved::Blob(_) => Err(FsError::NotDirectory(address.to_string())),
    }
}

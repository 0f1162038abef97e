//! Import filters.

use std::path::Path;

use async_trait::async_trait;

/// Decides whether a path is imported.
///
/// Filters are asynchronous so they can consult other services. Plain
/// closures can be used through [`FnFilter`].
#[async_trait]
pub trait ImportFilter: Send + Sync {
    async fn accept(&self, path: &Path) -> bool;
}

/// Imports everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

#[async_trait]
impl ImportFilter for AcceptAll {
    async fn accept(&self, _path: &Path) -> bool {
        true
    }
}

/// Skips entries whose name starts with `.`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipHidden;

#[async_trait]
impl ImportFilter for SkipHidden {
    async fn accept(&self, path: &Path) -> bool {
        !path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }
}

/// Adapts a synchronous predicate.
#[derive(Clone, Copy, Debug)]
pub struct FnFilter<F>(pub F);

#[async_trait]
impl<F> ImportFilter for FnFilter<F>
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    async fn accept(&self, path: &Path) -> bool {
        (self.0)(path)
    }
}

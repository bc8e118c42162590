//! Lazily loaded listings
//!
//! Extensions never hand the host a fully materialised list: they return a
//! [`PagedData`] that knows how to fetch its content, and the host decides
//! when (and whether) to load it.

use crate::Result;
use crate::models::Tab;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type PageLoader<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync>;

/// One page of a listing
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Token for the next page, `None` on the last one
    pub continuation: Option<String>,
}

/// A deferred listing
///
/// The loader is invoked each time a page is requested. Nothing is cached:
/// requesting the same page twice runs the loader twice.
pub enum PagedData<T> {
    /// Everything arrives in a single page
    Single(PageLoader<T>),
    /// Nothing to show
    Empty,
}

impl<T: Send + 'static> PagedData<T> {
    /// Builds a single-page listing from an async loader
    pub fn single<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        PagedData::Single(Arc::new(move || loader().boxed()))
    }

    pub fn empty() -> Self {
        PagedData::Empty
    }

    /// Loads the page designated by `continuation` (`None` for the first one)
    pub async fn load_page(&self, continuation: Option<&str>) -> Result<Page<T>> {
        match (self, continuation) {
            (PagedData::Single(loader), None) => Ok(Page {
                data: loader().await?,
                continuation: None,
            }),
            _ => Ok(Page {
                data: Vec::new(),
                continuation: None,
            }),
        }
    }

    /// Loads every page and concatenates them
    pub async fn load_all(&self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let page = self.load_page(continuation.as_deref()).await?;
            items.extend(page.data);
            match page.continuation {
                Some(next) => continuation = Some(next),
                None => return Ok(items),
            }
        }
    }

    /// Wraps the listing into a feed without tabs
    pub fn to_feed(self) -> Feed<T> {
        Feed {
            tabs: Vec::new(),
            paged: self,
        }
    }
}

impl<T> Clone for PagedData<T> {
    fn clone(&self) -> Self {
        match self {
            PagedData::Single(loader) => PagedData::Single(Arc::clone(loader)),
            PagedData::Empty => PagedData::Empty,
        }
    }
}

impl<T> fmt::Debug for PagedData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagedData::Single(_) => f.write_str("PagedData::Single(..)"),
            PagedData::Empty => f.write_str("PagedData::Empty"),
        }
    }
}

/// A listing with optional tabs
#[derive(Debug, Clone)]
pub struct Feed<T> {
    pub tabs: Vec<Tab>,
    pub paged: PagedData<T>,
}

impl<T: Send + 'static> Feed<T> {
    /// Loads the whole listing
    pub async fn load_all(&self) -> Result<Vec<T>> {
        self.paged.load_all().await
    }
}

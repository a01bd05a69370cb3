//! Token-based pagination over list operations.
//!
//! A pager is created from the first response of a list call. Pages it has
//! already fetched are kept, so every new [`Pager::pages`] or
//! [`Pager::items`] view starts again from the first page and only goes to
//! the network past the cached tail. Views borrow the pager mutably, which
//! keeps it to a single consumer at a time.
//!
//! ```rust,ignore
//! use futures_util::StreamExt;
//!
//! let mut pager = client.list_usable_subnetworks(None, fields, CallOptions::new()).await?;
//! let mut items = pager.items();
//! while let Some(subnet) = items.next().await {
//!     println!("{}", subnet?.subnetwork);
//! }
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use pin_project_lite::pin_project;

use crate::error::ClientError;

/// List request carrying a page token.
pub trait PageRequest: Clone {
    fn set_page_token(&mut self, token: String);
}

/// List response carrying one page of items and the next token.
pub trait PageResponse: Clone {
    type Item;

    /// Empty when there are no more pages.
    fn next_page_token(&self) -> &str;

    fn into_items(self) -> Vec<Self::Item>;
}

pub type PageFuture<Resp> = Pin<Box<dyn Future<Output = Result<Resp, ClientError>> + Send>>;

/// Fetches one page for a request that already carries its page token.
pub type PageFetcher<Req, Resp> = Arc<dyn Fn(Req) -> PageFuture<Resp> + Send + Sync>;

/// Blocking page fetcher.
pub type BlockingPageFetcher<Req, Resp> =
    Arc<dyn Fn(Req) -> Result<Resp, ClientError> + Send + Sync>;

/// Fetched pages plus the request used to ask for more.
struct PageCache<Req, Resp> {
    request: Req,
    pages: Vec<Resp>,
    metadata: Vec<(String, String)>,
}

impl<Req: PageRequest, Resp: PageResponse> PageCache<Req, Resp> {
    fn new(request: Req, first: Resp, metadata: Vec<(String, String)>) -> Self {
        Self {
            request,
            pages: vec![first],
            metadata,
        }
    }

    /// Request for the page after the last cached one, if there is one.
    fn next_request(&self) -> Option<Req> {
        let token = self.pages.last()?.next_page_token();
        if token.is_empty() {
            return None;
        }
        let mut request = self.request.clone();
        request.set_page_token(token.to_owned());
        Some(request)
    }

    fn latest(&self) -> Option<&Resp> {
        self.pages.last()
    }
}

/// Lazy, restartable pager for the async client.
pub struct Pager<Req, Resp> {
    cache: PageCache<Req, Resp>,
    fetcher: PageFetcher<Req, Resp>,
}

impl<Req, Resp> fmt::Debug for Pager<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("cached_pages", &self.cache.pages.len())
            .field("metadata", &self.cache.metadata)
            .finish_non_exhaustive()
    }
}

impl<Req: PageRequest, Resp: PageResponse> Pager<Req, Resp> {
    /// Create a pager from the first response of a list call.
    ///
    /// `request` is the original request; further pages clone it and set
    /// their page token.
    pub fn new(
        fetcher: PageFetcher<Req, Resp>,
        request: Req,
        first: Resp,
        metadata: Vec<(String, String)>,
    ) -> Self {
        Self {
            cache: PageCache::new(request, first, metadata),
            fetcher,
        }
    }

    /// Most recently fetched page.
    #[must_use]
    pub fn latest_response(&self) -> Option<&Resp> {
        self.cache.latest()
    }

    /// Metadata sent with the list call.
    #[must_use]
    pub fn metadata(&self) -> &[(String, String)] {
        &self.cache.metadata
    }

    /// Stream of raw pages, starting with the first one.
    pub fn pages(&mut self) -> PageStream<'_, Req, Resp> {
        PageStream {
            pager: self,
            index: 0,
            done: false,
            current_fetch: None,
        }
    }

    /// Stream of items across all pages, in server order.
    pub fn items(&mut self) -> ItemStream<'_, Req, Resp> {
        ItemStream {
            pages: self.pages(),
            buffer: VecDeque::new(),
        }
    }
}

pin_project! {
    /// Pages of a [`Pager`].
    pub struct PageStream<'a, Req, Resp> {
        pager: &'a mut Pager<Req, Resp>,
        index: usize,
        done: bool,
        #[pin]
        current_fetch: Option<PageFuture<Resp>>,
    }
}

impl<Req: PageRequest, Resp: PageResponse> Stream for PageStream<'_, Req, Resp> {
    type Item = Result<Resp, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(page) = this.pager.cache.pages.get(*this.index) {
                *this.index += 1;
                return Poll::Ready(Some(Ok(page.clone())));
            }

            if *this.done {
                return Poll::Ready(None);
            }

            if let Some(fut) = this.current_fetch.as_mut().as_pin_mut() {
                match fut.poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.current_fetch.set(None);
                        this.pager.cache.pages.push(page);
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.current_fetch.set(None);
                        *this.done = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            let Some(request) = this.pager.cache.next_request() else {
                *this.done = true;
                return Poll::Ready(None);
            };
            tracing::debug!(page = *this.index + 1, "fetching next page");
            let fut = (this.pager.fetcher)(request);
            this.current_fetch.set(Some(fut));
        }
    }
}

pin_project! {
    /// Items of a [`Pager`], flattened across pages.
    pub struct ItemStream<'a, Req, Resp>
    where
        Resp: PageResponse,
    {
        #[pin]
        pages: PageStream<'a, Req, Resp>,
        buffer: VecDeque<Resp::Item>,
    }
}

impl<Req: PageRequest, Resp: PageResponse> Stream for ItemStream<'_, Req, Resp> {
    type Item = Result<Resp::Item, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            match this.pages.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(page))) => this.buffer.extend(page.into_items()),
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Pager for the blocking client; same caching rules as [`Pager`].
pub struct BlockingPager<Req, Resp> {
    cache: PageCache<Req, Resp>,
    fetcher: BlockingPageFetcher<Req, Resp>,
}

impl<Req, Resp> fmt::Debug for BlockingPager<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingPager")
            .field("cached_pages", &self.cache.pages.len())
            .field("metadata", &self.cache.metadata)
            .finish_non_exhaustive()
    }
}

impl<Req: PageRequest, Resp: PageResponse> BlockingPager<Req, Resp> {
    pub fn new(
        fetcher: BlockingPageFetcher<Req, Resp>,
        request: Req,
        first: Resp,
        metadata: Vec<(String, String)>,
    ) -> Self {
        Self {
            cache: PageCache::new(request, first, metadata),
            fetcher,
        }
    }

    #[must_use]
    pub fn latest_response(&self) -> Option<&Resp> {
        self.cache.latest()
    }

    #[must_use]
    pub fn metadata(&self) -> &[(String, String)] {
        &self.cache.metadata
    }

    pub fn pages(&mut self) -> BlockingPages<'_, Req, Resp> {
        BlockingPages {
            pager: self,
            index: 0,
            done: false,
        }
    }

    pub fn items(&mut self) -> BlockingItems<'_, Req, Resp> {
        BlockingItems {
            pages: self.pages(),
            buffer: VecDeque::new(),
        }
    }
}

/// Pages of a [`BlockingPager`].
pub struct BlockingPages<'a, Req, Resp> {
    pager: &'a mut BlockingPager<Req, Resp>,
    index: usize,
    done: bool,
}

impl<Req: PageRequest, Resp: PageResponse> Iterator for BlockingPages<'_, Req, Resp> {
    type Item = Result<Resp, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(page) = self.pager.cache.pages.get(self.index) {
            self.index += 1;
            return Some(Ok(page.clone()));
        }
        if self.done {
            return None;
        }

        let Some(request) = self.pager.cache.next_request() else {
            self.done = true;
            return None;
        };
        tracing::debug!(page = self.index + 1, "fetching next page");
        match (self.pager.fetcher)(request) {
            Ok(page) => {
                self.pager.cache.pages.push(page.clone());
                self.index += 1;
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Items of a [`BlockingPager`].
pub struct BlockingItems<'a, Req, Resp: PageResponse> {
    pages: BlockingPages<'a, Req, Resp>,
    buffer: VecDeque<Resp::Item>,
}

impl<Req: PageRequest, Resp: PageResponse> Iterator for BlockingItems<'_, Req, Resp> {
    type Item = Result<Resp::Item, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            match self.pages.next()? {
                Ok(page) => self.buffer.extend(page.into_items()),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

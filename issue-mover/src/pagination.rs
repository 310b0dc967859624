//! Cursor pagination as a lazy stream.
//!
//! A list call returns the first [`Page`]; [`pages`] turns it into a stream
//! that only requests the following page once the previous batch has been
//! consumed. [`collect_all`] drains that stream into one ordered `Vec`.

use crate::tracker::{Page, PageCursor};
use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;

enum Cursor<T> {
    Ready(Page<T>),
    Pending(PageCursor),
    Exhausted,
}

/// Streams the item batches of `first` and every page after it.
///
/// `fetch_next` is called with the cursor of the previous page. The stream
/// ends after the first page without a cursor, or after the first error.
pub fn pages<T, E, F, Fut>(first: Page<T>, fetch_next: F) -> impl Stream<Item = Result<Vec<T>, E>>
where
    F: FnMut(PageCursor) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    stream::try_unfold(
        (Cursor::Ready(first), fetch_next),
        |(cursor, mut fetch_next)| async move {
            let page = match cursor {
                Cursor::Ready(page) => page,
                Cursor::Pending(next) => fetch_next(next).await?,
                Cursor::Exhausted => return Ok::<_, E>(None),
            };

            let following = match page.next {
                Some(next) => Cursor::Pending(next),
                None => Cursor::Exhausted,
            };

            Ok::<_, E>(Some((page.items, (following, fetch_next))))
        },
    )
}

/// Accumulates every item reachable from `first`, in order.
///
/// # Errors
///
/// Returns the first error produced by `fetch_next`.
pub async fn collect_all<T, E, F, Fut>(first: Page<T>, fetch_next: F) -> Result<Vec<T>, E>
where
    F: FnMut(PageCursor) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    pages(first, fetch_next).try_concat().await
}

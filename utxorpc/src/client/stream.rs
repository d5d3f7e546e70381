//! Cancellable streams built on server streaming calls and paginated RPCs.

use std::future::Future;

use async_stream::stream;
use futures::stream::{BoxStream, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::error::Error;

/// Events of a subscription, in server emission order.
///
/// A translation failure for one message is yielded as an `Err` item and the stream goes on. A
/// transport failure is yielded once and ends the stream. Cancellation ends it without an error.
pub type EventStream<T> = BoxStream<'static, Result<T, Error>>;

/// Awaits the opening call of a server stream unless `cancel` fires first.
///
/// `Ok(None)` means the caller cancelled before the server answered.
pub(crate) async fn open_stream<W, F>(
    cancel: &CancellationToken,
    label: &'static str,
    call: F,
) -> Result<Option<tonic::Streaming<W>>, Error>
where
    F: Future<Output = Result<tonic::Response<tonic::Streaming<W>>, tonic::Status>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("{label}: cancelled while opening");
            Ok(None)
        }
        response = call => Ok(Some(response?.into_inner())),
    }
}

/// Translates each message of `source` until the server closes it, it fails, or `cancel` fires.
pub(crate) fn translate_stream<S, W, T, F>(
    source: S,
    cancel: CancellationToken,
    label: &'static str,
    mut translate: F,
) -> EventStream<T>
where
    S: Stream<Item = Result<W, tonic::Status>> + Send + 'static,
    W: Send + 'static,
    T: Send + 'static,
    F: FnMut(W) -> Result<T, Error> + Send + 'static,
{
    stream! {
        let mut source = Box::pin(source);
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("{label}: cancelled");
                    break;
                }
                next = source.next() => next,
            };
            match next {
                Some(Ok(message)) => {
                    tracing::trace!("{label}: message received");
                    yield translate(message);
                }
                Some(Err(status)) => {
                    tracing::debug!("{label}: stream failed with {}", status.code());
                    yield Err(Error::from(status));
                    break;
                }
                None => {
                    tracing::debug!("{label}: closed by server");
                    break;
                }
            }
        }
    }
    .boxed()
}

/// Walks a paginated RPC, yielding the items of each page in order.
///
/// `fetch` receives the continuation token (`None` for the first page unless `start` is given)
/// and returns the page items with the next token. Walking stops on the first error, when the
/// server returns no next token, or when it returns the token it was just given.
pub(crate) fn paginate<T, K, F, Fut>(
    start: Option<K>,
    cancel: CancellationToken,
    label: &'static str,
    mut fetch: F,
) -> EventStream<T>
where
    T: Send + 'static,
    K: Clone + PartialEq + Send + 'static,
    F: FnMut(Option<K>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(Vec<T>, Option<K>), Error>> + Send + 'static,
{
    stream! {
        let mut token = start;
        let mut pages = 0usize;
        'pages: loop {
            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("{label}: cancelled after {pages} pages");
                    break;
                }
                page = fetch(token.clone()) => page,
            };
            let (items, next) = match page {
                Ok(page) => page,
                Err(error) => {
                    yield Err(error);
                    break;
                }
            };
            pages += 1;
            tracing::trace!("{label}: page {pages} with {} items", items.len());

            for item in items {
                if cancel.is_cancelled() {
                    tracing::debug!("{label}: cancelled mid page");
                    break 'pages;
                }
                yield Ok(item);
            }

            match next {
                Some(next) if token.as_ref() != Some(&next) => token = Some(next),
                Some(_) => {
                    tracing::debug!("{label}: server repeated its continuation token");
                    break;
                }
                None => break,
            }
        }
    }
    .boxed()
}

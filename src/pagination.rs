//! Lazy, marker-driven pagination
//!
//! List endpoints return one page per request. [`Pager`] exposes the result
//! as a stream that fetches the next page only when the caller advances past
//! the current one: the continuation marker is the id of the last item on the
//! page, and a next page exists only while the server advertises a
//! `{collection}_links` entry with `rel == "next"`. The full collection is
//! never materialized unless the caller asks for it with [`Pager::all`].

use std::marker::PhantomData;
use std::sync::Arc;

use futures::stream::{self, Stream, TryStreamExt};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::client::ServiceClient;
use crate::error::{ManilaError, Result};

/// Items that can be listed page by page.
pub trait Pageable: DeserializeOwned {
    /// JSON key the server stores the page's item array under.
    const COLLECTION_KEY: &'static str;

    /// Continuation marker for this item, fed into the next page request.
    fn marker(&self) -> &str;
}

/// A restartable, finite sequence of list results.
///
/// Cloning a pager restarts consumption from the first page.
#[derive(Clone)]
pub struct Pager<T> {
    client: Arc<ServiceClient>,
    url: Url,
    _item: PhantomData<T>,
}

impl<T> Pager<T>
where
    T: Pageable + Send + 'static,
{
    pub(crate) fn new(client: Arc<ServiceClient>, url: Url) -> Self {
        Self {
            client,
            url,
            _item: PhantomData,
        }
    }

    /// The URL the first page is fetched from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Consume the pager as a stream of items, one request per page.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        let Pager { client, url, .. } = self;
        stream::try_unfold((client, Some(url)), |(client, next)| async move {
            let url = match next {
                Some(url) => url,
                None => return Ok::<_, ManilaError>(None),
            };
            let raw = client
                .request(Method::GET, url.clone(), None, &[200])
                .await?;
            let (items, has_next) = parse_page::<T>(raw.body)?;
            let next = match (has_next, items.last()) {
                (true, Some(last)) => Some(next_page_url(&url, last.marker())),
                _ => None,
            };
            let page = stream::iter(items.into_iter().map(Ok::<T, ManilaError>));
            Ok(Some((page, (client, next))))
        })
        .try_flatten()
    }

    /// Collect every remaining page into one vector. This is the explicit
    /// opt-in to a full fetch.
    pub async fn all(self) -> Result<Vec<T>> {
        self.into_stream().try_collect().await
    }
}

fn parse_page<T: Pageable>(body: Option<Value>) -> Result<(Vec<T>, bool)> {
    let body = body.ok_or_else(|| ManilaError::serialization("List response carried no body"))?;
    let items = body.get(T::COLLECTION_KEY).cloned().ok_or_else(|| {
        ManilaError::serialization(format!(
            "List response is missing the '{}' key",
            T::COLLECTION_KEY
        ))
    })?;
    let items: Vec<T> = serde_json::from_value(items)?;

    let links_key = format!("{}_links", T::COLLECTION_KEY);
    let has_next = body
        .get(&links_key)
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .any(|link| link.get("rel").and_then(Value::as_str) == Some("next"))
        })
        .unwrap_or(false);

    Ok((items, has_next))
}

/// Derive the follow-up page URL: keep the caller's filters, drop any
/// `offset` (it would fight the marker) and set `marker` to the last item's
/// id.
fn next_page_url(url: &Url, marker: &str) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "offset" && key != "marker")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut next = url.clone();
    {
        let mut query = next.query_pairs_mut();
        query.clear();
        for (key, value) in &retained {
            query.append_pair(key, value);
        }
        query.append_pair("marker", marker);
    }
    next
}

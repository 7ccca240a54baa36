//! HTTP-backed [`DataSource`] for pagegrid collections.
//!
//! [`HttpDataSource`] speaks the widget's wire contract against a single
//! endpoint URL:
//!
//! - `fetch_all`: `GET <url>`, expecting a JSON array of records (used by
//!   client-side paging to buffer the full set).
//! - `fetch_page`: `GET <url>?currentPage=..&pageSize=..[&sort=..&dir=..]`,
//!   expecting `{"records": [...], "totalCount": n}` (used by server-side
//!   paging).
//!
//! Transport, status, and decode failures all surface as
//! [`GridError::Fetch`]; the collection treats them uniformly and keeps its
//! last-known-good window.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

use async_trait::async_trait;
use pagegrid_core::{DataSource, GridError, PageQuery, PageResponse, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use url::Url;

/// A [`DataSource`] that fetches records from one HTTP endpoint.
///
/// ```no_run
/// use pagegrid_http::HttpDataSource;
///
/// #[derive(serde::Deserialize)]
/// struct User { name: String }
///
/// let source: HttpDataSource<User> =
///     HttpDataSource::new("https://api.example.com/users")?;
/// # Ok::<(), pagegrid_core::GridError>(())
/// ```
pub struct HttpDataSource<R> {
	client: Client,
	url: Url,
	_record: PhantomData<fn() -> R>,
}

impl<R> HttpDataSource<R> {
	/// Creates a source over the given endpoint URL with a default client.
	pub fn new(url: &str) -> Result<Self> {
		let url = Url::parse(url).map_err(|e| GridError::Config(format!("invalid url: {e}")))?;
		Ok(Self::with_client(Client::new(), url))
	}

	/// Creates a source with a caller-supplied client, for connection pooling
	/// or custom headers/timeouts.
	pub fn with_client(client: Client, url: Url) -> Self {
		Self {
			client,
			url,
			_record: PhantomData,
		}
	}

	/// The endpoint URL.
	pub fn url(&self) -> &Url {
		&self.url
	}

	fn page_url(&self, query: &PageQuery) -> Result<Url> {
		let params = serde_urlencoded::to_string(query)
			.map_err(|e| GridError::Fetch(format!("query encoding failed: {e}")))?;
		let mut url = self.url.clone();
		url.set_query(Some(&params));
		Ok(url)
	}
}

#[async_trait]
impl<R: DeserializeOwned + Send + Sync + 'static> DataSource<R> for HttpDataSource<R> {
	async fn fetch_all(&self) -> Result<Vec<R>> {
		tracing::debug!(url = %self.url, "fetching full record set");
		let response = self
			.client
			.get(self.url.clone())
			.send()
			.await
			.map_err(fetch_error)?
			.error_for_status()
			.map_err(fetch_error)?;
		response.json().await.map_err(fetch_error)
	}

	async fn fetch_page(&self, query: &PageQuery) -> Result<PageResponse<R>> {
		let url = self.page_url(query)?;
		tracing::debug!(%url, "fetching page");
		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(fetch_error)?
			.error_for_status()
			.map_err(fetch_error)?;
		response.json().await.map_err(fetch_error)
	}
}

fn fetch_error(err: reqwest::Error) -> GridError {
	GridError::Fetch(err.to_string())
}

impl<R> Clone for HttpDataSource<R> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			url: self.url.clone(),
			_record: PhantomData,
		}
	}
}

impl<R> std::fmt::Debug for HttpDataSource<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HttpDataSource")
			.field("url", &self.url.as_str())
			.finish_non_exhaustive()
	}
}

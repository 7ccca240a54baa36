//! Mock record-set backend for HTTP source tests

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response, StatusCode, body::Incoming};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Test record served by the mock backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockUser {
	pub id: i64,
	pub name: String,
}

/// Error simulation mode
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
	Success,
	ServerError,
	InvalidResponse,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ReceivedQuery {
	current_page: Option<usize>,
	page_size: Option<usize>,
	sort: Option<String>,
	dir: Option<String>,
}

struct ServerState {
	users: Vec<MockUser>,
	error_mode: ErrorMode,
	last_query: Option<String>,
}

/// Mock backend serving `GET /users` (full array) and
/// `GET /users?currentPage=..` (paged envelope).
pub struct MockRecordServer {
	state: Arc<Mutex<ServerState>>,
	local_addr: SocketAddr,
}

impl MockRecordServer {
	/// Starts a server over `count` generated users on an ephemeral port.
	pub async fn start(count: i64) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let local_addr = listener.local_addr().unwrap();

		let users = (1..=count)
			.map(|id| MockUser {
				id,
				name: format!("user-{id:02}"),
			})
			.collect();
		let state = Arc::new(Mutex::new(ServerState {
			users,
			error_mode: ErrorMode::Success,
			last_query: None,
		}));

		let accept_state = Arc::clone(&state);
		tokio::spawn(async move {
			loop {
				if let Ok((stream, _)) = listener.accept().await {
					let io = TokioIo::new(stream);
					let state = Arc::clone(&accept_state);

					tokio::spawn(async move {
						let mut service =
							hyper::service::service_fn(move |req: Request<Incoming>| {
								let state = Arc::clone(&state);
								async move { handle_request(req, state) }
							});

						let _ = hyper::server::conn::http1::Builder::new()
							.serve_connection(io, &mut service)
							.await;
					});
				}
			}
		});

		Self { state, local_addr }
	}

	/// The `/users` endpoint URL.
	pub fn users_url(&self) -> String {
		format!("http://{}/users", self.local_addr)
	}

	pub fn set_error_mode(&self, mode: ErrorMode) {
		self.state.lock().error_mode = mode;
	}

	/// The raw query string of the most recent paged request.
	pub fn last_query(&self) -> Option<String> {
		self.state.lock().last_query.clone()
	}
}

fn handle_request(
	req: Request<Incoming>,
	state: Arc<Mutex<ServerState>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
	let mut state = state.lock();

	match state.error_mode {
		ErrorMode::ServerError => {
			return Ok(Response::builder()
				.status(StatusCode::INTERNAL_SERVER_ERROR)
				.body(Full::default())
				.unwrap());
		}
		ErrorMode::InvalidResponse => {
			return Ok(Response::builder()
				.status(StatusCode::OK)
				.header("Content-Type", "application/json")
				.body(Full::from(Bytes::from("{not json at all")))
				.unwrap());
		}
		ErrorMode::Success => {}
	}

	if req.uri().path() != "/users" {
		return Ok(Response::builder()
			.status(StatusCode::NOT_FOUND)
			.body(Full::default())
			.unwrap());
	}

	let raw_query = req.uri().query().unwrap_or("");
	let query: ReceivedQuery = serde_urlencoded::from_str(raw_query).unwrap_or_default();

	// No paging parameters: the full-array endpoint.
	let (Some(page), Some(size)) = (query.current_page, query.page_size) else {
		let json = serde_json::to_string(&state.users).unwrap();
		return Ok(json_response(json));
	};

	state.last_query = Some(raw_query.to_string());

	let mut users = state.users.clone();
	if let Some(sort) = &query.sort {
		if sort == "name" {
			users.sort_by(|a, b| a.name.cmp(&b.name));
		} else if sort == "id" {
			users.sort_by(|a, b| a.id.cmp(&b.id));
		}
		if query.dir.as_deref() == Some("desc") {
			users.reverse();
		}
	}

	let total = users.len();
	let page_records: Vec<MockUser> = if size == 0 {
		users
	} else {
		users.into_iter().skip(page * size).take(size).collect()
	};

	let json = serde_json::to_string(&serde_json::json!({
		"records": page_records,
		"totalCount": total,
	}))
	.unwrap();
	Ok(json_response(json))
}

fn json_response(json: String) -> Response<Full<Bytes>> {
	Response::builder()
		.status(StatusCode::OK)
		.header("Content-Type", "application/json")
		.body(Full::from(Bytes::from(json)))
		.unwrap()
}

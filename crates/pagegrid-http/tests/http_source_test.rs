//! Integration tests for [`HttpDataSource`] against a mock HTTP backend.

mod helpers;

use helpers::mock_server::{ErrorMode, MockRecordServer, MockUser};
use pagegrid_core::{
	CollectionConfig, Column, DataSource, GridError, PageQuery, PagingMode, SortDirection,
};
use pagegrid_http::HttpDataSource;
use rstest::*;
use std::sync::Arc;

#[rstest]
#[tokio::test]
async fn test_fetch_all_decodes_the_record_array() {
	let server = MockRecordServer::start(23).await;
	let source: HttpDataSource<MockUser> = HttpDataSource::new(&server.users_url()).unwrap();

	let users = source.fetch_all().await.unwrap();
	assert_eq!(users.len(), 23);
	assert_eq!(users[0].id, 1);
	assert_eq!(users[22].name, "user-23");
}

#[rstest]
#[tokio::test]
async fn test_fetch_page_sends_widget_parameters() {
	let server = MockRecordServer::start(23).await;
	let source: HttpDataSource<MockUser> = HttpDataSource::new(&server.users_url()).unwrap();

	let response = source
		.fetch_page(&PageQuery {
			current_page: 1,
			page_size: 10,
			sort: Some("id".into()),
			dir: Some("asc".into()),
		})
		.await
		.unwrap();

	assert_eq!(response.total_count, 23);
	assert_eq!(
		response.records.iter().map(|u| u.id).collect::<Vec<_>>(),
		(11..=20).collect::<Vec<_>>()
	);
	assert_eq!(
		server.last_query().as_deref(),
		Some("currentPage=1&pageSize=10&sort=id&dir=asc")
	);
}

#[rstest]
#[tokio::test]
async fn test_http_error_surfaces_as_fetch_error() {
	let server = MockRecordServer::start(23).await;
	server.set_error_mode(ErrorMode::ServerError);
	let source: HttpDataSource<MockUser> = HttpDataSource::new(&server.users_url()).unwrap();

	let err = source.fetch_all().await.unwrap_err();
	assert!(matches!(err, GridError::Fetch(_)));
}

#[rstest]
#[tokio::test]
async fn test_malformed_body_surfaces_as_fetch_error() {
	let server = MockRecordServer::start(23).await;
	server.set_error_mode(ErrorMode::InvalidResponse);
	let source: HttpDataSource<MockUser> = HttpDataSource::new(&server.users_url()).unwrap();

	let err = source
		.fetch_page(&PageQuery {
			current_page: 0,
			page_size: 10,
			sort: None,
			dir: None,
		})
		.await
		.unwrap_err();
	assert!(matches!(err, GridError::Fetch(_)));
}

#[rstest]
#[tokio::test]
async fn test_server_mode_collection_over_http() {
	let server = MockRecordServer::start(23).await;
	let source: HttpDataSource<MockUser> = HttpDataSource::new(&server.users_url()).unwrap();

	let collection = CollectionConfig::new()
		.source(Arc::new(source))
		.mode(PagingMode::ServerSide)
		.page_size(10)
		.column(Column::new("id", |u: &MockUser| u.id.into()))
		.column(Column::new("name", |u: &MockUser| u.name.as_str().into()))
		.build()
		.unwrap();

	collection.load().await.unwrap();
	assert_eq!(collection.pagination().total_pages(), 3);

	collection.set_current_page(2).await.unwrap();
	let ids: Vec<i64> = collection.visible_records().iter().map(|u| u.id).collect();
	assert_eq!(ids, vec![21, 22, 23]);

	collection
		.set_sort("id", SortDirection::Descending)
		.await
		.unwrap();
	let ids: Vec<i64> = collection.visible_records().iter().map(|u| u.id).collect();
	assert_eq!(ids, vec![3, 2, 1]);
}

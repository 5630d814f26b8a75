//! Integration tests for TOML route tables
//!
//! Success Criteria:
//! 1. A TOML route table drives a route service
//! 2. Custom segments can extend factories declared in a table

#![cfg(feature = "config")]

use async_trait::async_trait;
use rstest::*;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;
use waymark_router::prelude::*;
use waymark_router::{Captures, PathError};

fn fixture_path() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/routes.toml")
}

/// Matches `/v{major}` and names itself after the version.
#[derive(Debug)]
struct VersionSegment;

#[async_trait]
impl RouteSegment for VersionSegment {
	fn relative_matcher(&self) -> Cow<'_, str> {
		Cow::Borrowed("/v{major:int}")
	}

	fn relative_match_params(&self, captures: &Captures) -> Result<Params, PathError> {
		let major: i64 = captures.parse("major")?;
		Ok(Params::new().with("major", major))
	}

	fn relative_path(&self, params: &Params) -> Result<String, PathError> {
		params
			.get_i64("major")
			.map(|major| format!("/v{}", major))
			.ok_or_else(|| PathError::MissingParameter("major".to_string()))
	}

	async fn name(&self, params: &Params) -> RouteResult<String> {
		let major = params
			.get_i64("major")
			.ok_or_else(|| PathError::MissingParameter("major".to_string()))?;
		Ok(format!("Version {}", major))
	}
}

#[fixture]
fn table() -> RouteTable {
	RouteTable::load(fixture_path()).unwrap()
}

#[rstest]
fn test_table_drives_service(table: RouteTable) {
	let location = Arc::new(MemoryLocation::new("/bundles/new"));
	let service = RouteService::new(location.clone(), &table).unwrap();

	assert_eq!(service.route().unwrap().route_type(), "new_bundle");

	service.navigate(&"settings".to_string(), Params::new()).unwrap();
	assert_eq!(location.path(), "/settings");

	// `bundles` is declared with `resolve = false`, so the empty root
	// catches its path.
	location.go_to("/bundles").unwrap();
	assert_eq!(service.route().unwrap().route_type(), "home");
	assert!(service.route_factory(&"bundles".to_string()).is_none());
}

#[rstest]
#[tokio::test]
async fn test_custom_segment_under_table_route(table: RouteTable) {
	let settings = table.get("settings").unwrap();
	let api = Arc::new(RouteFactory::with_parent(
		settings,
		"api_version".to_string(),
		VersionSegment,
	));

	let route = api.create_from_path("/settings/v2").unwrap().unwrap();
	assert_eq!(route.params().get_i64("major"), Some(2));

	let names = api.cascade_names_all(route.params()).await.unwrap();
	assert_eq!(names, vec!["Home", "Settings", "Version 2"]);
}

//! Resolved or constructed navigation targets.

use crate::error::PathError;
use crate::params::Params;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A navigation target: which view, at which path, with which parameters.
///
/// Routes are only built by [`RouteFactory::create`](crate::RouteFactory::create)
/// so that `path` is always what the owning factory renders for `params`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route<T> {
	route_type: T,
	path: String,
	params: Params,
}

impl<T> Route<T> {
	pub(crate) fn new(route_type: T, path: String, params: Params) -> Self {
		Self {
			route_type,
			path,
			params,
		}
	}

	/// Returns the discriminator.
	pub fn route_type(&self) -> &T {
		&self.route_type
	}

	/// Returns the fully composed path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the parsed parameters.
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Deserializes the parameters into a caller-defined type.
	pub fn params_as<P: DeserializeOwned>(&self) -> Result<P, PathError> {
		self.params.deserialize()
	}

	/// Splits the route into its parts.
	pub fn into_parts(self) -> (T, String, Params) {
		(self.route_type, self.path, self.params)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde::Deserialize;

	#[derive(Debug, PartialEq, Deserialize)]
	struct BundleParams {
		bundle_id: String,
	}

	#[rstest]
	fn test_params_as_and_into_parts() {
		let route = Route::new(
			"BUNDLE",
			"/bundles/com.example".to_string(),
			Params::new().with("bundle_id", "com.example"),
		);

		assert_eq!(
			route.params_as::<BundleParams>().unwrap(),
			BundleParams {
				bundle_id: "com.example".to_string()
			}
		);

		let (route_type, path, params) = route.into_parts();
		assert_eq!(route_type, "BUNDLE");
		assert_eq!(path, "/bundles/com.example");
		assert_eq!(params.get_str("bundle_id"), Some("com.example"));
	}
}

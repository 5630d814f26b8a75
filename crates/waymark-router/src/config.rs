//! Static route tables declared in TOML.
//!
//! ```toml
//! [[route]]
//! type = "settings"
//! path = "/settings"
//! name = "Settings"
//! parent = "home"
//!
//! [[route]]
//! type = "home"
//! path = ""
//! name = "Home"
//! ```
//!
//! Declaration order is resolution priority. Since a pattern only has to
//! match the end of a path, the empty root accepts every path and belongs
//! last; parents may therefore be declared after their children. Entries
//! with `resolve = false` only serve as ancestors and are not offered for
//! resolution.

use crate::error::{RouteError, RouteResult};
use crate::factory::RouteFactory;
use crate::resolve::RouteFactoryService;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Top-level TOML document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTableConfig {
	/// Routes in priority order.
	#[serde(rename = "route", default)]
	pub routes: Vec<RouteEntry>,
}

/// One `[[route]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
	/// Discriminator, unique within the table.
	#[serde(rename = "type")]
	pub route_type: String,
	/// Literal fragment appended to the parent's path.
	pub path: String,
	/// Display name.
	pub name: String,
	/// Type of the parent entry.
	#[serde(default)]
	pub parent: Option<String>,
	/// Whether the entry takes part in resolution.
	#[serde(default = "default_resolve")]
	pub resolve: bool,
}

fn default_resolve() -> bool {
	true
}

/// Static factories built from a [`RouteTableConfig`].
#[derive(Debug, Clone)]
pub struct RouteTable {
	resolvable: Vec<Arc<RouteFactory<String>>>,
	by_type: HashMap<String, Arc<RouteFactory<String>>>,
}

impl RouteTable {
	/// Parses a TOML document.
	pub fn from_toml_str(source: &str) -> RouteResult<Self> {
		let config: RouteTableConfig =
			toml::from_str(source).map_err(|e| RouteError::Config(e.to_string()))?;
		Self::from_config(&config)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: impl AsRef<Path>) -> RouteResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)
			.map_err(|e| RouteError::Config(format!("{}: {}", path.display(), e)))?;
		tracing::debug!(path = %path.display(), "loading route table");
		Self::from_toml_str(&source)
	}

	/// Builds the factories of `config`.
	pub fn from_config(config: &RouteTableConfig) -> RouteResult<Self> {
		let mut entries: HashMap<&str, &RouteEntry> = HashMap::with_capacity(config.routes.len());
		for entry in &config.routes {
			if entries.insert(entry.route_type.as_str(), entry).is_some() {
				return Err(RouteError::Config(format!(
					"duplicate route type '{}'",
					entry.route_type
				)));
			}
			if entry.path.contains(['{', '}']) {
				return Err(RouteError::Config(format!(
					"route '{}' path '{}' must be literal",
					entry.route_type, entry.path
				)));
			}
		}

		let mut by_type = HashMap::with_capacity(entries.len());
		let mut resolvable = Vec::new();
		for entry in &config.routes {
			let factory = build_factory(entry, &entries, &mut by_type, &mut Vec::new())?;
			if entry.resolve {
				resolvable.push(factory);
			}
		}

		Ok(Self {
			resolvable,
			by_type,
		})
	}

	/// Returns any declared factory, resolvable or not.
	pub fn get(&self, route_type: &str) -> Option<&Arc<RouteFactory<String>>> {
		self.by_type.get(route_type)
	}

	/// Returns the number of declared routes.
	pub fn len(&self) -> usize {
		self.by_type.len()
	}

	/// Returns whether the table declares no routes.
	pub fn is_empty(&self) -> bool {
		self.by_type.is_empty()
	}
}

/// Builds `entry` after its ancestors, reusing factories built earlier.
fn build_factory(
	entry: &RouteEntry,
	entries: &HashMap<&str, &RouteEntry>,
	built: &mut HashMap<String, Arc<RouteFactory<String>>>,
	visiting: &mut Vec<String>,
) -> RouteResult<Arc<RouteFactory<String>>> {
	if let Some(factory) = built.get(&entry.route_type) {
		return Ok(Arc::clone(factory));
	}
	if visiting.contains(&entry.route_type) {
		return Err(RouteError::Config(format!(
			"route '{}' is its own ancestor",
			entry.route_type
		)));
	}
	visiting.push(entry.route_type.clone());

	let factory = match &entry.parent {
		Some(parent_type) => {
			let parent_entry = entries.get(parent_type.as_str()).ok_or_else(|| {
				RouteError::Config(format!(
					"route '{}' refers to undeclared parent '{}'",
					entry.route_type, parent_type
				))
			})?;
			let parent = build_factory(parent_entry, entries, built, visiting)?;
			RouteFactory::simple_child(
				&parent,
				entry.route_type.clone(),
				entry.path.clone(),
				entry.name.clone(),
			)
		}
		None => RouteFactory::simple(
			entry.route_type.clone(),
			entry.path.clone(),
			entry.name.clone(),
		),
	};

	visiting.pop();
	let factory = Arc::new(factory);
	built.insert(entry.route_type.clone(), Arc::clone(&factory));
	Ok(factory)
}

impl RouteFactoryService<String> for RouteTable {
	fn route_factories(&self) -> Vec<Arc<RouteFactory<String>>> {
		self.resolvable.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::params::Params;
	use crate::resolve::FactoryIndex;
	use rstest::rstest;

	const TABLE: &str = r#"
[[route]]
type = "home"
path = ""
name = "Home"
resolve = false

[[route]]
type = "settings"
path = "/settings"
name = "Settings"
parent = "home"

[[route]]
type = "profile"
path = "/profile"
name = "Profile"
parent = "settings"
"#;

	#[rstest]
	fn test_table_builds_parent_chains() {
		let table = RouteTable::from_toml_str(TABLE).unwrap();
		let profile = table.get("profile").unwrap();

		assert_eq!(table.len(), 3);
		assert_eq!(
			profile.cascade_paths(&Params::new()).unwrap(),
			vec!["", "/settings", "/settings/profile"]
		);
	}

	#[rstest]
	fn test_non_resolvable_entries_are_only_ancestors() {
		let table = RouteTable::from_toml_str(TABLE).unwrap();
		let types: Vec<String> = table
			.route_factories()
			.iter()
			.map(|f| f.route_type().clone())
			.collect();
		assert_eq!(types, vec!["settings", "profile"]);

		let index = FactoryIndex::build(&table).unwrap();
		assert_eq!(index.resolve(""), None);
		assert_eq!(
			index.resolve("/settings/profile").unwrap().route_type(),
			"profile"
		);
	}

	#[rstest]
	#[case(
		"[[route]]\ntype = \"a\"\npath = \"/a\"\nname = \"A\"\nparent = \"missing\"\n",
		"undeclared parent"
	)]
	#[case(
		"[[route]]\ntype = \"a\"\npath = \"/a\"\nname = \"A\"\n[[route]]\ntype = \"a\"\npath = \"/b\"\nname = \"B\"\n",
		"duplicate route type"
	)]
	#[case(
		"[[route]]\ntype = \"a\"\npath = \"/{id}\"\nname = \"A\"\n",
		"must be literal"
	)]
	#[case("[[route]]\ntype = \"a\"\n", "missing field")]
	fn test_invalid_tables(#[case] source: &str, #[case] expected: &str) {
		let err = RouteTable::from_toml_str(source).unwrap_err();
		assert!(
			matches!(&err, RouteError::Config(message) if message.contains(expected)),
			"unexpected error: {}",
			err
		);
	}

	#[rstest]
	fn test_root_declared_last_catches_unmatched_paths() {
		let source = r#"
[[route]]
type = "child"
path = "/child"
name = "Child"
parent = "root"

[[route]]
type = "root"
path = ""
name = "Root"
"#;
		let table = RouteTable::from_toml_str(source).unwrap();
		let index = FactoryIndex::build(&table).unwrap();

		assert_eq!(index.resolve("/child").unwrap().route_type(), "child");
		assert_eq!(index.resolve("/elsewhere").unwrap().route_type(), "root");
		// The child's parent is the same factory the table exposes.
		assert!(Arc::ptr_eq(
			table.get("child").unwrap().parent().unwrap(),
			table.get("root").unwrap()
		));
	}

	#[rstest]
	#[case("[[route]]\ntype = \"a\"\npath = \"/a\"\nname = \"A\"\nparent = \"a\"\n")]
	#[case(
		"[[route]]\ntype = \"a\"\npath = \"/a\"\nname = \"A\"\nparent = \"b\"\n[[route]]\ntype = \"b\"\npath = \"/b\"\nname = \"B\"\nparent = \"a\"\n"
	)]
	fn test_parent_cycles_are_rejected(#[case] source: &str) {
		let err = RouteTable::from_toml_str(source).unwrap_err();
		assert!(matches!(err, RouteError::Config(message) if message.contains("its own ancestor")));
	}

	#[rstest]
	fn test_load_missing_file() {
		let err = RouteTable::load("/definitely/not/here.toml").unwrap_err();
		assert!(matches!(err, RouteError::Config(message) if message.contains("here.toml")));
	}
}

//! # Waymark
//!
//! Hierarchical route factories for client-side navigation.
//!
//! Waymark describes every screen of an application as a typed route built by
//! a [`RouteFactory`](router::RouteFactory). Factories nest: a child inherits
//! its parent's path, matcher and parameters and adds its own. An ordered set
//! of factories resolves the current location to the first route that matches.
//!
//! This crate is a thin facade over the following internal crates:
//!
//! - `waymark-router`: composition, resolution and navigation
//!
//! ## Feature Flags
//!
//! - `config` (default) - TOML route tables, re-exported as [`config`]
//!
//! ```rust
//! # #[cfg(feature = "config")]
//! # {
//! use waymark::config::RouteTable;
//! use waymark::prelude::*;
//!
//! let table = RouteTable::from_toml_str(
//! 	r#"
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
//! "#,
//! )
//! .unwrap();
//! let index = FactoryIndex::build(&table).unwrap();
//! assert_eq!(index.resolve("/settings").unwrap().route_type(), "settings");
//! # }
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use waymark::prelude::*;
//!
//! let home = Arc::new(RouteFactory::simple("HOME", "", "Home"));
//! let settings = Arc::new(RouteFactory::simple_child(&home, "SETTINGS", "/settings", "Settings"));
//!
//! let location = Arc::new(MemoryLocation::new(""));
//! let service = RouteService::new(location, &vec![settings, home]).unwrap();
//!
//! service.navigate(&"SETTINGS", Params::new()).unwrap();
//! assert_eq!(service.route().unwrap().route_type(), &"SETTINGS");
//! ```

pub use waymark_router as router;

#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub use waymark_router::config;

/// Commonly used types.
pub mod prelude {
	pub use waymark_router::prelude::*;

	// External
	pub use async_trait::async_trait;
}

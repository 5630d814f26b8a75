//! Hierarchical route factories for client-side navigation.
//!
//! A route is a typed, parameterised destination inside an application. Routes
//! are produced by [`RouteFactory`] nodes that compose into a tree: each node
//! contributes a matcher fragment, a path fragment, a parameter extractor and a
//! display name, and inherits the rest from its parent.
//!
//! - **Composition**: [`RouteFactory`] concatenates matchers and paths along the
//!   parent chain and merges extracted parameters, the child's keys winning.
//! - **Segments**: [`StaticSegment`] for literal pages, [`ParamSegment`] for a
//!   single typed path parameter.
//! - **Resolution**: [`resolve`] and [`FactoryIndex`] perform first-match
//!   resolution over an ordered [`RouteFactoryService`].
//! - **Navigation**: [`RouteService`] binds a [`Location`] to the active route
//!   and re-emits changes; [`RouteNavigator`] is the side-effect-free variant.
//!
//! # Features
//!
//! - `config` - TOML route tables via [`RouteTable`] (enabled by default)
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use waymark_router::prelude::*;
//!
//! let home = Arc::new(RouteFactory::simple("HOME", "", "Home"));
//! let bundle = Arc::new(RouteFactory::with_parent(
//! 	&home,
//! 	"BUNDLE",
//! 	ParamSegment::new("/bundles/", "bundle_id", ParamKind::Str),
//! ));
//!
//! let index = FactoryIndex::build(&vec![bundle, home]).unwrap();
//! let route = index.resolve("/bundles/com.example").unwrap();
//!
//! assert_eq!(route.route_type(), &"BUNDLE");
//! assert_eq!(route.params().get_str("bundle_id"), Some("com.example"));
//! ```
//!
//! # Pattern Syntax
//!
//! Matcher fragments use `{name}` for a single segment, `{name:int}` for a
//! signed integer and `{name:*}` for the remainder of the path. Everything
//! else is matched literally. A composed pattern must match up to the end of the
//! path but may start anywhere in it, so an empty root matcher accepts every
//! path and should be listed last.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod factory;
pub mod listeners;
pub mod location;
pub mod navigator;
pub mod params;
pub mod pattern;
pub mod prelude;
pub mod resolve;
pub mod route;
pub mod segments;
pub mod service;

#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;

// Re-export commonly used types at crate root
pub use error::{PathError, RouteError, RouteResult};
pub use factory::{CompiledFactory, RouteFactory, RouteSegment, RouteType};
pub use listeners::{ListenerFn, ListenerId, Listeners};
pub use location::{Location, MemoryLocation, PathListener};
pub use navigator::RouteNavigator;
pub use params::{Captures, ParamKind, Params};
pub use pattern::PathPattern;
pub use resolve::{FactoryIndex, RouteFactoryService, resolve};
pub use route::Route;
pub use segments::{NameLookup, ParamSegment, StaticSegment};
pub use service::{RouteChange, RouteService};

#[cfg(feature = "config")]
pub use config::{RouteEntry, RouteTable, RouteTableConfig};

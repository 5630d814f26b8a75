//! Commonly used types.
//!
//! ```
//! use waymark_router::prelude::*;
//! ```

pub use crate::error::{RouteError, RouteResult};
pub use crate::factory::{RouteFactory, RouteSegment, RouteType};
pub use crate::location::{Location, MemoryLocation};
pub use crate::navigator::RouteNavigator;
pub use crate::params::{ParamKind, Params};
pub use crate::resolve::{FactoryIndex, RouteFactoryService};
pub use crate::route::Route;
pub use crate::segments::{NameLookup, ParamSegment, StaticSegment};
pub use crate::service::{RouteChange, RouteService};

#[cfg(feature = "config")]
pub use crate::config::RouteTable;

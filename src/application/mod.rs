//! Commands, queries and their handlers
//!
//! Controllers never touch the database: they build a request from the route, query string
//! and body and hand it to the [`Mediator`], which logs it, authorizes it, validates it and
//! runs the one handler bound to its type.

pub mod context;
pub mod identity;
pub mod logging;
pub mod lookup;
pub mod mapping;
pub mod mediator;
pub mod models;
pub mod paging;
pub mod validation;

pub mod modules;
pub mod paths;
pub mod sections;
pub mod sources;
pub mod tags;
pub mod themes;

pub use context::RequestContext;
pub use mediator::{Mediator, Request, RequestHandler};
pub use paging::{Paged, PaginationData, RequestParams};

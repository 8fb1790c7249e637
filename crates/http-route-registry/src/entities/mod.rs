mod body;
mod chain;
mod context;
mod handler;
mod method;
pub mod path;
mod request;
mod response;
mod route;

pub use body::{Body, IntoBody};
pub use chain::{Chain, Done, Flow, Next};
pub use context::Context;
pub use handler::{Endpoint, Handler, Middleware};
pub use method::Method;
pub use path::{join_paths, normalize_path};
pub use request::Request;
pub use response::Response;
pub use route::Route;

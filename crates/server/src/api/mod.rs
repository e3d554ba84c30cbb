pub mod handlers;
pub mod middleware;
pub mod overrides;
pub mod routes;

pub use routes::create_router;

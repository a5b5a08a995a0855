pub mod health;
pub mod list;
pub mod create;
pub mod route;

pub use health::health_handler;
pub use list::list_handler;
pub use create::create_handler;
pub use route::route_handler;

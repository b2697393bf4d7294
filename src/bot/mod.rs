pub mod commands;
pub mod handlers;
pub mod responder;

pub use commands::Command;
pub use handlers::schema;

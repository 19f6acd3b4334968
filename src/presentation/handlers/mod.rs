mod health;
mod interpret;

pub use health::health_handler;
pub use interpret::interpret_handler;

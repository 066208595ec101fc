mod handler;
mod model;

pub use handler::{check_secret_exists, consume_secret, create_secret};

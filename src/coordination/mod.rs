mod errors;
mod link;

pub use errors::CoordinationError;
pub use link::get_or_create_user;

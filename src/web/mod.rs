// Server-rendered pages

pub mod handlers;
pub mod schema;

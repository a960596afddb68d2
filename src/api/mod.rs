mod client;
mod envelope;
mod error;
mod http;

pub use client::{ResourceApi, SessionFilter};
pub use envelope::Envelope;
pub use error::ApiError;
pub use http::HttpApi;

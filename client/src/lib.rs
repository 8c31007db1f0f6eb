pub mod config;
pub mod http;
pub mod transport;
pub mod types;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use http::HttpTransport;
pub use transport::{ApiTransport, ClientError, ClientResult};
pub use types::{
    ApiRequest, ApiResponse, BookingRequest, ContactSubmission, Method, NewsletterSignup,
};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::http::*;
    pub use crate::transport::*;
    pub use crate::types::*;
}

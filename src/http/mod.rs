//! HTTP module containing HTTP client functionality.
//!
//! This module provides HTTP client setup and the header helpers used when
//! probing a resource.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`headers`] - length, range-support and `Content-Range` parsing
//!
//! # Examples
//!
//! ## Creating an HTTP Client
//!
//! ```rust
//! use rangedl::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     retries: 0,
//!     proxy: None,
//!     headers: Some(headers),
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing Content-Range Headers
//!
//! ```rust
//! use rangedl::http::parse_content_range_total;
//!
//! assert_eq!(parse_content_range_total("bytes 200-1023/1024"), Some(1024));
//! ```

pub mod client;
pub mod headers;

pub use client::{create_http_client, HttpClientConfig};
pub use headers::{
    accepts_byte_ranges, header_u64, parse_content_range_bounds, parse_content_range_total,
    resource_length, X_LENGTH_BACKUP,
};

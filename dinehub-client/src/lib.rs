//! DineHub API client
//!
//! Consumer of the deployed HTTP API, separate from direct store access:
//!
//! - [`StaticParamResolver`]: build-time outlet enumeration (fatal on failure)
//! - [`OutletApi`]: outlet detail for server-rendered pages (absent on failure)
//! - [`decode`]: explicit validation of response bodies

pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod outlet_api;
pub mod static_params;

pub use config::ApiConfig;
pub use decode::{DecodeError, OutletSummary};
pub use error::{ClientError, ClientResult};
pub use http::NetworkHttpClient;
pub use outlet_api::OutletApi;
pub use static_params::{OutletParams, StaticParamResolver};

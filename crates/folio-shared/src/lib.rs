//! # Folio Shared
//!
//! Wire types shared with the blog API.
//! Everything here mirrors the JSON the server sends; conversion into domain
//! types happens in `folio-infra`.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorBody, Paginated, Pagination};

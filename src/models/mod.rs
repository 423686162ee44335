//! Row types for the admin list pages and the shared page envelope.

pub mod blog_post;
pub mod catering_request;
pub mod customer;
pub mod feedback;
pub mod order;
pub mod pagination;
pub mod review;

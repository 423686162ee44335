//! One module per admin list page: its filters, column allow-list and `list`.

pub mod blog;
pub mod catering;
pub mod customer;
pub mod feedback;
pub mod order;
pub mod review;

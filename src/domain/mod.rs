pub mod clock;
pub mod pagination;
pub mod presentation;
pub mod query;
pub mod weather;

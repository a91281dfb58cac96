pub mod catalog;
pub mod export;
pub mod import;
pub mod model;
pub mod store;

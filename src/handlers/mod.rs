pub mod api;
pub mod note;
pub mod pages;

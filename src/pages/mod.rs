//! Page handlers for the server-rendered catalog

pub mod authors;
pub mod books;
pub mod health;
pub mod home;
pub mod instances;

//! Dashboard: the client side of the contacts REST API
//!
//! `http` performs the requests, `api` maps them to normalized contacts,
//! `store` keeps the rows with snapshot/restore, and `page` drives all
//! three the way the "Manage Contacts" screen does.

pub mod api;
pub mod http;
pub mod page;
pub mod store;

pub use api::{ContactsBackend, ContactsClient};
pub use http::{HttpJson, RequestError};
pub use page::{ContactsPage, DeleteOutcome, Editor, Field, LoadState};
pub use store::{ContactStore, StoreSnapshot};

//! Contract layer - public API for in-process communication
//!
//! Transport-agnostic models, the vendor wire shapes and the native client trait.

pub mod client;
pub mod error;
pub mod model;
pub mod vendor;

pub use client::ContactsApi;
pub use error::ContactsError;
pub use model::{Contact, ContactForm, ContactOp};
pub use vendor::{
    EmailItem, EmailsBlock, NameBlock, PhoneItem, PhonesBlock, Revision, VendorInfo,
    VendorRecord,
};

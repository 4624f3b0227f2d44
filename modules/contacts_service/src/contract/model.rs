//! Contract models for contacts service
//!
//! These models are transport-agnostic and used by the dashboard and by
//! in-process callers. NO serde derives - these are pure domain models.

/// Contact as shown in the dashboard (client view)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Identifier assigned by the CRM
    pub id: String,
    /// Full name, first and last joined by a single space
    pub name: String,
    /// First email of the vendor record, if any
    pub email: Option<String>,
    /// First phone of the vendor record, if any
    pub phone: Option<String>,
}

/// Flat contact form submitted by the editor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactForm {
    /// Create a form with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl From<&Contact> for ContactForm {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

/// Operation performed against the CRM on behalf of a REST call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOp {
    List,
    Create,
    Update,
    Delete,
}

impl ContactOp {
    /// Fixed, client-facing message returned when the operation fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed listing contacts",
            Self::Create => "Failed creating contact",
            Self::Update => "Failed updating contact",
            Self::Delete => "Failed deleting contact",
        }
    }

    /// Short tag used in log records
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "LIST",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ContactOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

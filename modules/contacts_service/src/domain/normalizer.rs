//! Record normalizer: flat contact form <-> nested vendor record
//!
//! Only name, first email and first phone are mapped. Any other vendor
//! data is dropped when a contact is edited through the dashboard.

use crate::contract::{
    Contact, ContactForm, EmailItem, EmailsBlock, NameBlock, PhoneItem, PhonesBlock, VendorInfo,
    VendorRecord,
};

/// Message used for both server (400) and payload validation failures
pub const NAME_REQUIRED: &str = "name is required";

/// Form input rejected before reaching the CRM
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn name_required() -> Self {
        Self(NAME_REQUIRED.to_string())
    }
}

/// Map a vendor record to the dashboard view. Never fails.
pub fn to_client_view(record: &VendorRecord) -> Contact {
    let info = &record.info;

    let name = info
        .name
        .as_ref()
        .map(|n| {
            [n.first.as_deref(), n.last.as_deref()]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let email = info
        .emails
        .as_ref()
        .and_then(|block| block.items.first())
        .map(|item| item.email.clone());

    let phone = info
        .phones
        .as_ref()
        .and_then(|block| block.items.first())
        .map(|item| item.phone.clone());

    Contact {
        id: record.id.clone(),
        name,
        email,
        phone,
    }
}

/// Build the vendor `info` payload for create/update.
///
/// Blank email/phone produce no block at all, so an update leaves the
/// stored value untouched.
pub fn to_vendor_payload(form: &ContactForm) -> Result<VendorInfo, ValidationError> {
    let mut tokens = form.name.split_whitespace();
    let first = tokens.next().ok_or_else(ValidationError::name_required)?;
    let last = tokens.collect::<Vec<_>>().join(" ");

    Ok(VendorInfo {
        name: Some(NameBlock {
            first: Some(first.to_string()),
            last: Some(last),
        }),
        emails: non_blank(form.email.as_deref()).map(|email| EmailsBlock {
            items: vec![EmailItem::primary(email)],
        }),
        phones: non_blank(form.phone.as_deref()).map(|phone| PhonesBlock {
            items: vec![PhoneItem::primary(phone)],
        }),
        ..VendorInfo::default()
    })
}

/// Trim and collapse whitespace in a full name; `None` when nothing is left
pub fn normalize_full_name(name: &str) -> Option<String> {
    let joined = name.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

//! Conversions between REST DTOs and contract models

use super::dto::ContactFormDto;
use crate::contract::ContactForm;

impl From<ContactFormDto> for ContactForm {
    fn from(dto: ContactFormDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            email: dto.email,
            phone: dto.phone,
        }
    }
}

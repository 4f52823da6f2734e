use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::company::CompanyForm;
use crate::utils::validation::{validate_not_blank, FormErrors};

// Company create and update body
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompanyRequest {
    #[serde(default)]
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub industry: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub contact_person: String,
}

impl CompanyRequest {
    pub fn into_form(self) -> Result<CompanyForm, ValidationErrors> {
        let errors = FormErrors::from_validate(&self);
        errors.finish(move || {
            Some(CompanyForm {
                name: self.name.trim().to_string(),
                industry: self.industry.trim().to_string(),
                address: self.address.trim().to_string(),
                contact_person: self.contact_person.trim().to_string(),
            })
        })
    }
}

// Generic response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dto::document_dto::DocumentResponse;
use crate::models::worker::{WorkerForm, WorkerWithCompany};
use crate::repositories::worker_repository::WorkerFilters;
use crate::services::access_scope::Scope;
use crate::utils::validation::{non_blank, validate_not_blank, FormErrors};

// Worker create and update body. Dates arrive as YYYY-MM-DD strings.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct WorkerRequest {
    #[serde(default)]
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 50), custom = "validate_not_blank")]
    pub passport_number: String,
    #[serde(default)]
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub nationality: String,
    #[serde(default)]
    pub birth_date: String,
    pub company: Option<i64>,
    #[serde(default)]
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub position: String,
    #[validate(length(max = 255))]
    pub photo: Option<String>,
    pub start_date: Option<String>,
}

impl WorkerRequest {
    /// Build the form; a scoped caller's company replaces the requested one
    pub fn into_form(self, scope: Scope) -> Result<WorkerForm, ValidationErrors> {
        let mut errors = FormErrors::from_validate(&self);
        let birth_date = errors.date("birth_date", &self.birth_date);
        let start_date = errors.optional_date("start_date", self.start_date.as_deref());
        let company_id = errors.reference("company", scope.assign_company(self.company));

        errors.finish(move || {
            Some(WorkerForm {
                name: self.name.trim().to_string(),
                passport_number: self.passport_number.trim().to_string(),
                nationality: self.nationality.trim().to_string(),
                birth_date: birth_date?,
                company_id: company_id?,
                position: self.position.trim().to_string(),
                photo: non_blank(self.photo.as_deref()).map(str::to_string),
                start_date,
            })
        })
    }
}

// Query string of the worker list
#[derive(Debug, Default, Deserialize)]
pub struct WorkerListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub company: Option<String>,
    pub nationality: Option<String>,
}

impl WorkerListQuery {
    /// Parse the optional filters; blank means unfiltered
    pub fn filters(&self) -> Result<WorkerFilters, ValidationErrors> {
        let mut errors = FormErrors::default();
        let company_id = non_blank(self.company.as_deref()).and_then(|value| errors.id("company", value));

        errors.finish(|| {
            Some(WorkerFilters {
                search: non_blank(self.q.as_deref()).map(str::to_string),
                company_id,
                nationality: non_blank(self.nationality.as_deref()).map(str::to_string),
            })
        })
    }
}

// Worker detail with its documents ordered by type
#[derive(Debug, Serialize)]
pub struct WorkerDetailResponse {
    #[serde(flatten)]
    pub worker: WorkerWithCompany,
    pub documents: Vec<DocumentResponse>,
}

use crate::api::CompanyParams;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::fields::supplied;

pub struct CompanyService<'a> {
    state: &'a AppState,
}

impl<'a> CompanyService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Remove the company's departments, employees and timecards
    pub async fn delete(&self, params: &CompanyParams) -> Result<String, ApiError> {
        let company = supplied(&params.company).ok_or_else(|| ApiError::missing_field("Company name is required"))?;
        self.state.repository.delete_company(company).await?;

        tracing::info!(company, "company deleted");
        Ok(format!("{}'s information deleted.", company))
    }
}

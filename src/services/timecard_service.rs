use crate::api::{TimecardParams, TimecardView};
use crate::database::models::Timecard;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::fields::supplied;
use crate::validation::TimecardValidator;

pub struct TimecardService<'a> {
    state: &'a AppState,
}

impl<'a> TimecardService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn validator(&self) -> TimecardValidator<'_> {
        TimecardValidator::new(self.state.repository.as_ref(), &self.state.calendar)
    }

    fn view(&self, timecard: &Timecard) -> TimecardView {
        TimecardView::new(timecard, &self.state.calendar)
    }

    pub async fn get(&self, params: &TimecardParams) -> Result<TimecardView, ApiError> {
        let timecard_id = TimecardValidator::validate_lookup(params)?;
        let timecard = self
            .state
            .repository
            .get_timecard(timecard_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Timecard not found"))?;
        Ok(self.view(&timecard))
    }

    pub async fn list(&self, params: &TimecardParams) -> Result<Vec<TimecardView>, ApiError> {
        let emp_id = TimecardValidator::validate_listing(params)?;
        let timecards = self.state.repository.get_all_timecards(emp_id).await?;
        if timecards.is_empty() {
            return Err(ApiError::not_found("No timecards found"));
        }
        Ok(TimecardView::many(&timecards, &self.state.calendar))
    }

    /// The one-per-day check and the insert run under the employee's lock so
    /// two concurrent creates for the same day cannot both pass.
    pub async fn create(&self, params: &TimecardParams) -> Result<TimecardView, ApiError> {
        let _guard = match supplied(&params.emp_id).and_then(|raw| raw.trim().parse::<i32>().ok()) {
            Some(emp_id) => Some(self.state.timecard_locks.acquire(&emp_id).await),
            // Validation rejects it below
            None => None,
        };

        let timecard = self.validator().validate_create(params).await?;
        let stored = self.state.repository.insert_timecard(timecard).await?;

        tracing::info!(timecard_id = stored.timecard_id, emp_id = stored.emp_id, "timecard created");
        Ok(self.view(&stored))
    }

    pub async fn update(&self, params: &TimecardParams) -> Result<TimecardView, ApiError> {
        let timecard = self.validator().validate_update(params).await?;
        let stored = self
            .state
            .repository
            .update_timecard(timecard)
            .await?
            .ok_or_else(|| ApiError::not_found("Timecard not found"))?;

        tracing::info!(timecard_id = stored.timecard_id, "timecard updated");
        Ok(self.view(&stored))
    }

    pub async fn delete(&self, params: &TimecardParams) -> Result<String, ApiError> {
        let timecard_id = TimecardValidator::validate_lookup(params)?;
        if self.state.repository.get_timecard(timecard_id).await?.is_none() {
            return Err(ApiError::not_found("Timecard not found"));
        }
        self.state.repository.delete_timecard(timecard_id).await?;

        tracing::info!(timecard_id, "timecard deleted");
        Ok(format!("Timecard {} deleted.", timecard_id))
    }
}

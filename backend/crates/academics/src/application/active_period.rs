//! Active Period Use Case
//!
//! Switches the single active academic period. The store performs the
//! deactivate/activate pair atomically; this use case adds the not-found
//! signal and logging.

use kernel::id::AcademicPeriodId;
use std::sync::Arc;

use crate::domain::entities::AcademicPeriod;
use crate::domain::repository::AcademicPeriodRepository;
use crate::error::{AcademicsError, AcademicsResult};

/// Set active period use case
pub struct SetActivePeriodUseCase<R>
where
    R: AcademicPeriodRepository,
{
    store: Arc<R>,
}

impl<R> SetActivePeriodUseCase<R>
where
    R: AcademicPeriodRepository,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, id: AcademicPeriodId) -> AcademicsResult<AcademicPeriod> {
        let period = self
            .store
            .set_active_period(id)
            .await?
            .ok_or(AcademicsError::NotFound("Academic period"))?;

        tracing::info!(period = %period.name, "Academic period activated");

        Ok(period)
    }
}

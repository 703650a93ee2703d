//! Dashboard Statistics Use Case
//!
//! Single point-in-time snapshot of the headline counters. No windowing,
//! no trends.

use std::sync::Arc;

use crate::domain::entities::Statistics;
use crate::domain::repository::StatsRepository;
use crate::error::AcademicsResult;

/// Statistics use case
pub struct StatisticsUseCase<R>
where
    R: StatsRepository,
{
    store: Arc<R>,
}

impl<R> StatisticsUseCase<R>
where
    R: StatsRepository,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> AcademicsResult<Statistics> {
        self.store.statistics().await
    }
}

use super::RatingResponse;
use crate::services::reports::{RatingSummary, RevenueSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueReport {
    #[schema(example = 12)]
    pub appointment_count: usize,
    #[schema(example = 640.0)]
    pub total_revenue: f64,
}

impl From<RevenueSummary> for RevenueReport {
    fn from(summary: RevenueSummary) -> Self {
        Self {
            appointment_count: summary.appointment_count,
            total_revenue: summary.total_revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingReport {
    pub count: usize,
    /// 0 when there are no ratings.
    pub average: f64,
    pub ratings: Vec<RatingResponse>,
}

impl From<RatingSummary> for RatingReport {
    fn from(summary: RatingSummary) -> Self {
        Self {
            count: summary.count,
            average: summary.average,
            ratings: summary.ratings.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyAppointmentsReport {
    /// `YYYY-MM` to count, covering the last twelve months.
    pub months: BTreeMap<String, u32>,
}

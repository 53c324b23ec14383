//! Dashboard module - monthly summary across accounts, cards and transactions.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::DashboardSummary;
pub use dashboard_service::{DashboardService, DashboardServiceTrait};

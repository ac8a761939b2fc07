//! Revenue analytics for the dashboard overview chart.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use marquee_core::StoreId;

use super::require_store;
use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::state::AppState;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/stores/{store_id}/analytics/revenue",
        get(monthly_revenue),
    )
}

/// One bar of the revenue chart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RevenueBucket {
    pub name: &'static str,
    pub total: Decimal,
}

/// Spread (month, total) pairs over twelve zero-filled buckets.
fn fill_buckets(rows: &[(i32, Decimal)]) -> Vec<RevenueBucket> {
    let mut buckets: Vec<RevenueBucket> = MONTH_LABELS
        .iter()
        .map(|name| RevenueBucket {
            name,
            total: Decimal::ZERO,
        })
        .collect();

    for &(month, total) in rows {
        if (1..=12).contains(&month) {
            #[allow(clippy::cast_sign_loss)]
            let index = (month - 1) as usize;
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.total = total;
            }
        }
    }

    buckets
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn monthly_revenue(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<RevenueBucket>>, AppError> {
    require_store(&state, store_id, &user).await?;

    let rows = OrderRepository::new(state.pool())
        .monthly_revenue(store_id)
        .await?;
    Ok(Json(fill_buckets(&rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_buckets_zero_filled() {
        let buckets = fill_buckets(&[]);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].name, "Jan");
        assert_eq!(buckets[11].name, "Dec");
        assert!(buckets.iter().all(|b| b.total == Decimal::ZERO));
    }

    #[test]
    fn test_fill_buckets_places_totals() {
        let rows = vec![
            (3, Decimal::new(4999, 2)),
            (12, Decimal::new(100, 0)),
        ];
        let buckets = fill_buckets(&rows);

        assert_eq!(buckets[2].name, "Mar");
        assert_eq!(buckets[2].total, Decimal::new(4999, 2));
        assert_eq!(buckets[11].total, Decimal::new(100, 0));
        assert_eq!(buckets[0].total, Decimal::ZERO);
    }

    #[test]
    fn test_fill_buckets_ignores_out_of_range_months() {
        let buckets = fill_buckets(&[(0, Decimal::ONE), (13, Decimal::ONE)]);
        assert!(buckets.iter().all(|b| b.total == Decimal::ZERO));
    }
}

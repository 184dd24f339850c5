//! Dashboard figures derived from container snapshots.
//!
//! Nothing here is fetched directly: the dashboard mounts the four list
//! operations and these numbers follow from whatever has landed so far.

use crate::api::types::{Booking, BookingStatus};
use crate::core::state::App;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardMetrics {
    pub total_users: usize,
    pub total_tours: usize,
    pub total_bookings: u64,
    pub revenue: f64,
    pub pending_bookings: usize,
    pub visible_reviews: usize,
    pub hidden_reviews: usize,
}

impl DashboardMetrics {
    pub fn compute(app: &App) -> Self {
        let bookings = &app.bookings;
        // The paginated fetch only returns one page, so prefer the server total.
        let total_bookings = bookings.pagination.total.max(bookings.items.len() as u64);
        let visible_reviews = app.reviews.items.iter().filter(|r| r.visible).count();

        Self {
            total_users: app.users.items.len(),
            total_tours: app.tours.items.len(),
            total_bookings,
            revenue: bookings.pagination.total_amount,
            pending_bookings: bookings
                .items
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            visible_reviews,
            hidden_reviews: app.reviews.items.len() - visible_reviews,
        }
    }
}

/// The first `n` bookings of the loaded page, in server order.
pub fn recent_bookings(app: &App, n: usize) -> &[Booking] {
    let items = &app.bookings.items;
    &items[..n.min(items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Pagination, Review, User};
    use crate::test_support::test_app;

    #[test]
    fn test_empty_app_has_zero_metrics() {
        let app = test_app();
        assert_eq!(DashboardMetrics::compute(&app), DashboardMetrics::default());
    }

    #[test]
    fn test_metrics_follow_containers() {
        let mut app = test_app();
        app.users.items = vec![User::default(), User::default()];
        app.bookings.items = vec![
            Booking {
                id: "b1".into(),
                status: BookingStatus::Pending,
                ..Default::default()
            },
            Booking {
                id: "b2".into(),
                status: BookingStatus::Confirmed,
                ..Default::default()
            },
        ];
        app.bookings.pagination = Pagination {
            total: 42,
            total_amount: 1500.0,
            ..Default::default()
        };
        app.reviews.items = vec![
            Review {
                visible: true,
                ..Default::default()
            },
            Review::default(),
            Review::default(),
        ];

        let m = DashboardMetrics::compute(&app);
        assert_eq!(m.total_users, 2);
        assert_eq!(m.total_tours, 0);
        assert_eq!(m.total_bookings, 42);
        assert_eq!(m.revenue, 1500.0);
        assert_eq!(m.pending_bookings, 1);
        assert_eq!(m.visible_reviews, 1);
        assert_eq!(m.hidden_reviews, 2);
    }

    #[test]
    fn test_recent_bookings_clamps() {
        let mut app = test_app();
        app.bookings.items = vec![Booking::default()];
        assert_eq!(recent_bookings(&app, 5).len(), 1);
        assert!(recent_bookings(&test_app(), 5).is_empty());
    }
}

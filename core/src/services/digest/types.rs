//! User statistics value objects

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::User;

/// Registration counts for one reporting window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Users registered within the window
    pub total: u64,
    /// Of those, users currently on the premium tier
    pub premium: u64,
}

impl PeriodStats {
    /// Premium share of the window's registrations, as a percentage
    pub fn conversion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.premium as f64 / self.total as f64) * 100.0
    }

    fn count(&mut self, user: &User) {
        self.total += 1;
        if user.is_premium() {
            self.premium += 1;
        }
    }
}

/// Registration statistics across the standard reporting windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// When the statistics were computed
    pub generated_at: DateTime<Utc>,
    /// Last 24 hours
    pub daily: PeriodStats,
    /// Last 7 days
    pub weekly: PeriodStats,
    /// Last 30 days
    pub monthly: PeriodStats,
    /// Last 365 days
    pub yearly: PeriodStats,
    /// Entire user base, regardless of registration date
    pub all_time: PeriodStats,
}

impl UserStats {
    /// Compute statistics over the given users as of `now`
    ///
    /// Users with no registration date count toward `all_time` only.
    pub fn compute(users: &[User], now: DateTime<Utc>) -> Self {
        let day_ago = now - Duration::hours(24);
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);
        let year_ago = now - Duration::days(365);

        let mut stats = Self {
            generated_at: now,
            daily: PeriodStats::default(),
            weekly: PeriodStats::default(),
            monthly: PeriodStats::default(),
            yearly: PeriodStats::default(),
            all_time: PeriodStats::default(),
        };

        for user in users {
            stats.all_time.count(user);

            let Some(registered_at) = user.registered_at else {
                continue;
            };
            if registered_at >= day_ago {
                stats.daily.count(user);
            }
            if registered_at >= week_ago {
                stats.weekly.count(user);
            }
            if registered_at >= month_ago {
                stats.monthly.count(user);
            }
            if registered_at >= year_ago {
                stats.yearly.count(user);
            }
        }

        stats
    }
}

use auditguardian_core::activity::{
    greeting, relative_time_label, Activity, ActivityType, DashboardStats, FindingsBySeverity,
    SeveritySlice,
};
use auditguardian_core::fixtures;
use auditguardian_core::types::Timestamp;
use serde::Serialize;

/// One line of the recent-activity feed, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub activity_type: ActivityType,
    pub description: String,
    pub user: String,
    /// `"5m ago"`, `"3h ago"` or a `YYYY-MM-DD` date.
    pub when: String,
}

/// Read-only overview screen.
pub struct Dashboard {
    stats: DashboardStats,
    activity: Vec<Activity>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_data(fixtures::dashboard_stats(), fixtures::recent_activity())
    }

    pub fn with_data(stats: DashboardStats, activity: Vec<Activity>) -> Self {
        Self { stats, activity }
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn severity_slices(&self) -> [SeveritySlice; 3] {
        self.stats.findings_by_severity.slices()
    }

    /// Replace the severity breakdown with a live tally, e.g. after
    /// findings were edited.
    pub fn refresh_severity(&mut self, tally: FindingsBySeverity) {
        self.stats.findings_by_severity = tally;
    }

    /// Greeting for a local hour of day (0-23).
    pub fn greeting(&self, local_hour: u32) -> &'static str {
        greeting(local_hour)
    }

    /// Activity feed, newest first, with labels relative to `now`.
    pub fn activity_feed(&self, now: Timestamp) -> Vec<ActivityItem> {
        let mut items: Vec<&Activity> = self.activity.iter().collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items
            .into_iter()
            .map(|a| ActivityItem {
                activity_type: a.activity_type.clone(),
                description: a.description.clone(),
                user: a.user.clone(),
                when: relative_time_label(a.timestamp, now),
            })
            .collect()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn stats_come_from_summary_record() {
        let dashboard = Dashboard::new();
        let stats = dashboard.stats();
        assert_eq!(stats.total_policies, 6);
        assert_eq!(stats.active_transactions, 250);
        assert_eq!(stats.findings_generated, 8);

        let values: Vec<usize> = dashboard.severity_slices().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![4, 3, 1]);
    }

    #[test]
    fn refresh_replaces_breakdown() {
        let mut dashboard = Dashboard::new();
        dashboard.refresh_severity(FindingsBySeverity::tally(&fixtures::findings()));
        let values: Vec<usize> = dashboard.severity_slices().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![3, 3, 2]);
    }

    #[test]
    fn feed_is_newest_first_with_relative_labels() {
        let dashboard = Dashboard::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();
        let feed = dashboard.activity_feed(now);

        assert_eq!(feed.len(), 6);
        assert_eq!(feed[0].when, "30m ago");
        assert_eq!(feed[0].activity_type, ActivityType::Upload);
        assert_eq!(feed[2].when, "2h ago");
        assert_eq!(feed[5].when, "21h ago");
    }

    #[test]
    fn greeting_by_hour() {
        let dashboard = Dashboard::default();
        assert_eq!(dashboard.greeting(9), "Good morning");
        assert_eq!(dashboard.greeting(20), "Good evening");
    }
}

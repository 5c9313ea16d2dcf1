use crate::date_key::DateKey;
use crate::models::{DailyRecord, TOTAL_DEFAULT_QUOTA};
use crate::records::RecordStore;
use crate::storage::KeyValueStore;
use serde::Serialize;

const DAYS_IN_SUMMARY: usize = 7;

/// How the two-colour progress bar for one day is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BarRendering {
    /// Combined progress above 100%: the whole bar is over-target.
    Saturated,
    Split { on_target: f64, over_target: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: DateKey,
    pub default_checked: usize,
    pub extra_checked: usize,
    pub on_target_percent: f64,
    pub over_target_percent: f64,
    pub bar: BarRendering,
}

impl DaySummary {
    pub fn from_record(date: DateKey, record: &DailyRecord) -> Self {
        let default_checked = record.default_checked();
        let extra_checked = record.extra_checked();
        let on_target_percent = percent_of_quota(default_checked);
        let over_target_percent = percent_of_quota(extra_checked);

        // counts, not floats, so exactly 100% never saturates
        let bar = if default_checked + extra_checked > TOTAL_DEFAULT_QUOTA {
            BarRendering::Saturated
        } else {
            BarRendering::Split {
                on_target: on_target_percent.min(100.0),
                over_target: over_target_percent,
            }
        };

        Self {
            date,
            default_checked,
            extra_checked,
            on_target_percent,
            over_target_percent,
            bar,
        }
    }

    pub fn is_saturated(&self) -> bool {
        self.bar == BarRendering::Saturated
    }
}

fn percent_of_quota(count: usize) -> f64 {
    count as f64 / TOTAL_DEFAULT_QUOTA as f64 * 100.0
}

/// `today` followed by the six days before it, most recent first.
pub fn last_seven_days(today: DateKey) -> Vec<DateKey> {
    std::iter::successors(Some(today), DateKey::previous)
        .take(DAYS_IN_SUMMARY)
        .collect()
}

pub fn weekly_summary_at<S: KeyValueStore>(
    today: DateKey,
    store: &RecordStore<S>,
) -> Vec<DaySummary> {
    last_seven_days(today)
        .into_iter()
        .map(|date| DaySummary::from_record(date, &store.load_or_default(date)))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct DaySummaryPoint {
    pub date: DateKey,
    pub label: String,
    pub default_checked: usize,
    pub extra_checked: usize,
    pub on_target_percent: f64,
    pub over_target_percent: f64,
    pub bar: BarRendering,
}

#[derive(Debug, Serialize)]
pub struct WeeklyResponse {
    pub total_default_quota: usize,
    pub days: Vec<DaySummaryPoint>,
}

pub fn build_weekly_response(days: &[DaySummary]) -> WeeklyResponse {
    WeeklyResponse {
        total_default_quota: TOTAL_DEFAULT_QUOTA,
        days: days
            .iter()
            .map(|day| DaySummaryPoint {
                date: day.date,
                label: day.date.label(),
                default_checked: day.default_checked,
                extra_checked: day.extra_checked,
                on_target_percent: day.on_target_percent,
                over_target_percent: day.over_target_percent,
                bar: day.bar,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn today() -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    }

    fn check_all_defaults(record: &mut DailyRecord) {
        for category in Category::ALL {
            for index in 0..category.default_quota() {
                record.entry_mut(category).toggle(index);
            }
        }
    }

    fn add_checked_extras(record: &mut DailyRecord, category: Category, count: usize) {
        let entry = record.entry_mut(category);
        for _ in 0..count {
            entry.add_box();
            let last = entry.box_count() - 1;
            entry.toggle(last);
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn seven_days_descending_across_year_boundary() {
        let days = last_seven_days(today());
        let rendered: Vec<String> = days.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "2026-01-05",
                "2026-01-04",
                "2026-01-03",
                "2026-01-02",
                "2026-01-01",
                "2025-12-31",
                "2025-12-30"
            ]
        );
    }

    #[test]
    fn full_protein_only() {
        let mut record = DailyRecord::default();
        for index in 0..8 {
            record.entry_mut(Category::Protein).toggle(index);
        }

        let summary = DaySummary::from_record(today(), &record);
        assert_close(summary.on_target_percent, 8.0 / 17.0 * 100.0);
        assert!((summary.on_target_percent - 47.06).abs() < 0.01);
        assert_close(summary.over_target_percent, 0.0);
        assert!(!summary.is_saturated());
    }

    #[test]
    fn all_defaults_plus_extras_saturates() {
        let mut record = DailyRecord::default();
        check_all_defaults(&mut record);
        add_checked_extras(&mut record, Category::Fruits, 5);

        let summary = DaySummary::from_record(today(), &record);
        assert_close(summary.on_target_percent, 100.0);
        assert_close(summary.over_target_percent, 5.0 / 17.0 * 100.0);
        assert_eq!(summary.bar, BarRendering::Saturated);
    }

    #[test]
    fn exactly_one_hundred_does_not_saturate() {
        let mut record = DailyRecord::default();
        for index in 0..8 {
            record.entry_mut(Category::Protein).toggle(index);
        }
        record.entry_mut(Category::Fruits).toggle(0);
        record.entry_mut(Category::Fruits).toggle(1);
        add_checked_extras(&mut record, Category::Carbs, 7);

        let summary = DaySummary::from_record(today(), &record);
        assert_eq!(summary.default_checked + summary.extra_checked, 17);
        assert!(!summary.is_saturated());
        match summary.bar {
            BarRendering::Split { on_target, over_target } => {
                assert_close(on_target, 1000.0 / 17.0);
                assert_close(over_target, 700.0 / 17.0);
            }
            BarRendering::Saturated => panic!("bar should be split"),
        }
    }

    #[test]
    fn all_defaults_without_extras_is_full_split() {
        let mut record = DailyRecord::default();
        check_all_defaults(&mut record);

        let summary = DaySummary::from_record(today(), &record);
        assert_eq!(
            summary.bar,
            BarRendering::Split {
                on_target: 100.0,
                over_target: 0.0
            }
        );
    }

    #[test]
    fn unchecked_extra_boxes_do_not_count() {
        let mut record = DailyRecord::default();
        record.entry_mut(Category::Protein).add_box();
        record.entry_mut(Category::Protein).add_box();

        let summary = DaySummary::from_record(today(), &record);
        assert_close(summary.on_target_percent, 0.0);
        assert_close(summary.over_target_percent, 0.0);
    }

    #[test]
    fn weekly_summary_reads_each_day() {
        let mut store = RecordStore::new(MemoryStore::new());
        let two_days_ago = today().previous().and_then(|d| d.previous()).unwrap();
        store.toggle_box(two_days_ago, Category::Dairy, 0).unwrap();

        let summary = weekly_summary_at(today(), &store);
        assert_eq!(summary.len(), 7);
        assert_eq!(summary[0].date, today());
        assert_close(summary[0].on_target_percent, 0.0);
        assert_close(summary[0].over_target_percent, 0.0);

        let point = summary
            .iter()
            .find(|day| day.date == two_days_ago)
            .expect("missing day");
        assert_eq!(point.default_checked, 1);
        assert_close(point.on_target_percent, 100.0 / 17.0);
    }

    #[test]
    fn missing_days_are_zero_and_not_written() {
        let store = RecordStore::new(MemoryStore::new());
        let summary = weekly_summary_at(today(), &store);

        assert!(summary.iter().all(|day| day.default_checked == 0 && day.extra_checked == 0));
        assert!(store.backend().get(&today().storage_key()).unwrap().is_none());
    }

    #[test]
    fn response_carries_quota_and_labels() {
        let store = RecordStore::new(MemoryStore::new());
        let response = build_weekly_response(&weekly_summary_at(today(), &store));

        assert_eq!(response.total_default_quota, 17);
        assert_eq!(response.days.len(), 7);
        assert_eq!(response.days[0].label, "Monday, Jan 5");
        let json = serde_json::to_value(&response.days[0].bar).unwrap();
        assert_eq!(json["kind"], "split");
    }
}

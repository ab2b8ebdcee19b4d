use super::Moment;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Aggregates shown on the profile view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentStats {
    pub total_moments: usize,
    pub moments_this_week: usize,
    pub moments_this_month: usize,
    pub category_counts: BTreeMap<String, usize>,
    pub collection_counts: BTreeMap<String, usize>,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl MomentStats {
    /// Single pass over `moments`; windows are trailing 7 and 30 days from `now`.
    pub fn compute(moments: &[Moment], now: DateTime<Utc>) -> Self {
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        let mut stats = MomentStats {
            total_moments: moments.len(),
            ..Default::default()
        };
        let mut days = BTreeSet::new();

        for moment in moments {
            if moment.created_at >= week_ago {
                stats.moments_this_week += 1;
            }
            if moment.created_at >= month_ago {
                stats.moments_this_month += 1;
            }
            if moment.has_category() {
                *stats
                    .category_counts
                    .entry(moment.category.clone())
                    .or_default() += 1;
            }
            if let Some(collection) = moment.collection.as_deref().filter(|c| !c.is_empty()) {
                *stats
                    .collection_counts
                    .entry(collection.to_string())
                    .or_default() += 1;
            }
            days.insert(moment.created_at.date_naive());
        }

        stats.current_streak = current_streak(&days, now.date_naive());
        stats.longest_streak = longest_streak(&days);
        stats
    }
}

/// Consecutive active days ending today, or ending yesterday when nothing
/// has been captured yet today.
fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(*day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*day);
    }
    longest
}

/// One cell of the activity heat-map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: usize,
    /// 0 = nothing captured, 4 = four or more moments.
    pub level: u8,
}

impl DailyActivity {
    fn level_for(count: usize) -> u8 {
        match count {
            0 => 0,
            1 => 1,
            2 => 2,
            3 => 3,
            _ => 4,
        }
    }
}

/// Longest heat-map window: one year, leap day included.
pub const MAX_ACTIVITY_DAYS: u32 = 366;

/// Per-day counts for the `days` days ending at `today`, oldest first.
/// Windows longer than [`MAX_ACTIVITY_DAYS`] are clamped.
pub fn daily_activity(moments: &[Moment], today: NaiveDate, days: u32) -> Vec<DailyActivity> {
    let days = days.min(MAX_ACTIVITY_DAYS);
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for moment in moments {
        *counts.entry(moment.created_at.date_naive()).or_default() += 1;
    }

    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_signed(Duration::days(i64::from(offset))))
        .map(|date| {
            let count = counts.get(&date).copied().unwrap_or(0);
            DailyActivity {
                date,
                count,
                level: DailyActivity::level_for(count),
            }
        })
        .collect()
}

//! 时段表 — 预约时段与结束时间计算
//!
//! 午餐/晚餐各自的可选开始时段与用餐时长。时段策略集中在此处的
//! 窗口常量里：午餐两个固定时段，晚餐 18:00–19:30 与 21:00–21:45
//! 两段、15 分钟一档。

use serde::Serialize;

use shared::types::{MealCategory, TimeOfDay};

/// 相邻时段步长 (分钟)
const SLOT_STEP_MINUTES: u32 = 15;

/// 午餐窗口: 两个固定时段
const LUNCH_WINDOWS: &[((u8, u8), (u8, u8))] = &[((12, 0), (12, 0)), ((13, 30), (13, 30))];

/// 晚餐窗口: 18:00–19:30 与 21:00–21:45
const DINNER_WINDOWS: &[((u8, u8), (u8, u8))] = &[((18, 0), (19, 30)), ((21, 0), (21, 45))];

/// 给定类别的可选开始时段，升序且无重复
pub fn slots(category: MealCategory) -> Vec<TimeOfDay> {
    let windows = match category {
        MealCategory::Lunch => LUNCH_WINDOWS,
        MealCategory::Dinner => DINNER_WINDOWS,
    };

    let mut slots = Vec::new();
    for ((start_hour, start_minute), (end_hour, end_minute)) in windows {
        let start = u32::from(*start_hour) * 60 + u32::from(*start_minute);
        let end = u32::from(*end_hour) * 60 + u32::from(*end_minute);
        let mut minutes = start;
        while minutes <= end {
            slots.push(TimeOfDay::from_minutes(minutes));
            minutes += SLOT_STEP_MINUTES;
        }
    }
    slots
}

/// 结束时间 = 开始时间 + 类别时长，跨午夜回卷、不推进日期
pub fn end_time(start: TimeOfDay, category: MealCategory) -> TimeOfDay {
    start.add_minutes(category.duration_minutes())
}

/// 相邻替代时段 — 满座时推荐给客人的前后一档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeSlots {
    pub earlier: Option<TimeOfDay>,
    pub later: Option<TimeOfDay>,
}

impl AlternativeSlots {
    /// 前后都没有可推荐的时段
    pub fn is_empty(&self) -> bool {
        self.earlier.is_none() && self.later.is_none()
    }
}

/// 取 `start` 前后紧邻的时段
///
/// `start` 不必精确落在时段表上：取严格早于它的最后一档和严格晚于
/// 它的第一档。
pub fn alternatives(category: MealCategory, start: TimeOfDay) -> AlternativeSlots {
    let slots = slots(category);
    let idx = slots.partition_point(|slot| *slot < start);

    let earlier = (idx > 0).then(|| slots[idx - 1]);
    let later_idx = if slots.get(idx) == Some(&start) {
        idx + 1
    } else {
        idx
    };
    let later = slots.get(later_idx).copied();

    AlternativeSlots { earlier, later }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn lunch_slots_are_the_two_fixed_sittings() {
        assert_eq!(slots(MealCategory::Lunch), vec![t("12:00"), t("13:30")]);
    }

    #[test]
    fn dinner_slots_cover_both_windows() {
        let dinner = slots(MealCategory::Dinner);
        assert_eq!(dinner.first(), Some(&t("18:00")));
        assert_eq!(dinner.last(), Some(&t("21:45")));
        // 18:00–19:30 = 7 slots, 21:00–21:45 = 4 slots
        assert_eq!(dinner.len(), 11);
        assert!(!dinner.contains(&t("20:00")));
    }

    #[test]
    fn slots_are_strictly_ascending_without_duplicates() {
        for category in [MealCategory::Lunch, MealCategory::Dinner] {
            let slots = slots(category);
            assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(slots.iter().all(|slot| slot.is_on_grid()));
        }
    }

    #[test]
    fn end_times_match_category_durations() {
        assert_eq!(end_time(t("12:00"), MealCategory::Lunch), t("13:20"));
        assert_eq!(end_time(t("19:00"), MealCategory::Dinner), t("20:45"));
    }

    #[test]
    fn end_time_wraps_past_midnight() {
        assert_eq!(end_time(t("23:30"), MealCategory::Dinner), t("01:15"));
    }

    #[test]
    fn end_time_minutes_stay_on_five_minute_marks() {
        for category in [MealCategory::Lunch, MealCategory::Dinner] {
            for slot in slots(category) {
                let end = end_time(slot, category);
                assert_eq!(end.minute() % 5, 0);
                assert!(end.hour() <= 23);
            }
        }
    }

    #[test]
    fn alternatives_in_the_middle_of_a_window() {
        let alt = alternatives(MealCategory::Dinner, t("18:30"));
        assert_eq!(alt.earlier, Some(t("18:15")));
        assert_eq!(alt.later, Some(t("18:45")));
    }

    #[test]
    fn alternatives_jump_across_the_window_gap() {
        let alt = alternatives(MealCategory::Dinner, t("19:30"));
        assert_eq!(alt.earlier, Some(t("19:15")));
        assert_eq!(alt.later, Some(t("21:00")));
    }

    #[test]
    fn first_and_last_slots_miss_one_neighbor() {
        let first = alternatives(MealCategory::Dinner, t("18:00"));
        assert_eq!(first.earlier, None);
        assert_eq!(first.later, Some(t("18:15")));

        let last = alternatives(MealCategory::Dinner, t("21:45"));
        assert_eq!(last.earlier, Some(t("21:30")));
        assert_eq!(last.later, None);
    }

    #[test]
    fn off_grid_start_still_gets_neighbors() {
        let alt = alternatives(MealCategory::Lunch, t("12:40"));
        assert_eq!(alt.earlier, Some(t("12:00")));
        assert_eq!(alt.later, Some(t("13:30")));
    }
}

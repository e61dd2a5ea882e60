//! Static month and weekday label tables.
//!
//! Names are the capitalized Russian standalone forms. A fixed table keeps
//! output identical across platforms and installed locales.

use chrono::Weekday;
use std::collections::BTreeMap;

const MONTH_NAMES_RU: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Returns the display name for `month` (1-12), or `None` when out of range.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES_RU.get(index).copied()
}

/// Returns all month names keyed 1..=12 in calendar order.
pub fn month_names() -> BTreeMap<u32, &'static str> {
    (1..=12)
        .filter_map(|month| month_name(month).map(|name| (month, name)))
        .collect()
}

/// Short weekday label used as a column header.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Пн",
        Weekday::Tue => "Вт",
        Weekday::Wed => "Ср",
        Weekday::Thu => "Чт",
        Weekday::Fri => "Пт",
        Weekday::Sat => "Сб",
        Weekday::Sun => "Вс",
    }
}

#[cfg(test)]
mod tests {
    use super::{month_name, month_names, weekday_label};
    use chrono::Weekday;

    #[test]
    fn month_names_cover_all_months_in_order() {
        let names = month_names();
        assert_eq!(names.len(), 12);
        assert_eq!(names.keys().copied().collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());
        assert_eq!(names[&1], "Январь");
        assert_eq!(names[&12], "Декабрь");
    }

    #[test]
    fn month_name_rejects_out_of_range() {
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_name(2), Some("Февраль"));
    }

    #[test]
    fn weekday_labels_are_short_forms() {
        assert_eq!(weekday_label(Weekday::Tue), "Вт");
        assert_eq!(weekday_label(Weekday::Sun), "Вс");
    }
}

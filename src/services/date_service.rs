// src/services/date_service.rs
use crate::error::{AppError, AppResult};
use chrono::NaiveDate;

const STORAGE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d %B %Y";
const DAYS_PER_MONTH: i64 = 30;

/// Texto de duração entre duas datas ("1 Day", "12 Days", "1 Month", "3 Months").
///
/// Meses contam-se como blocos de 30 dias, com truncagem. Datas invertidas dão
/// margem negativa, que é tratada como 0 (logo "1 Day").
pub fn compute_duration(start: NaiveDate, end: NaiveDate) -> String {
    let margin_days = (end - start).num_days().max(0);

    if margin_days >= DAYS_PER_MONTH {
        match margin_days / DAYS_PER_MONTH {
            1 => "1 Month".to_string(),
            months => format!("{} Months", months),
        }
    } else if margin_days <= 1 {
        "1 Day".to_string()
    } else {
        format!("{} Days", margin_days)
    }
}

/// "02 January 2006"
pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// "2006-01-02", o formato usado nos campos `<input type="date">` e na DB.
pub fn to_storage_key(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

pub fn parse_storage_key(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), STORAGE_FORMAT)
        .map_err(|e| AppError::Validation(format!("data inválida '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn after(days: i64) -> String {
        let start = d(2024, 1, 1);
        compute_duration(start, start + chrono::Duration::days(days))
    }

    #[test]
    fn short_spans_are_one_day() {
        assert_eq!(after(0), "1 Day");
        assert_eq!(after(1), "1 Day");
    }

    #[test]
    fn spans_under_a_month_count_days() {
        assert_eq!(after(2), "2 Days");
        assert_eq!(after(29), "29 Days");
    }

    #[test]
    fn month_boundaries_truncate() {
        assert_eq!(after(30), "1 Month");
        assert_eq!(after(45), "1 Month");
        assert_eq!(after(59), "1 Month");
        assert_eq!(after(60), "2 Months");
        assert_eq!(after(89), "2 Months");
        assert_eq!(after(90), "3 Months");
        assert_eq!(after(365), "12 Months");
    }

    #[test]
    fn reversed_dates_clamp_to_one_day() {
        assert_eq!(compute_duration(d(2024, 3, 1), d(2024, 1, 1)), "1 Day");
    }

    #[test]
    fn portfolio_scenario_durations() {
        // 2024 é bissexto: jan→mar são 60 dias, jan→abr são 91
        assert_eq!(compute_duration(d(2024, 1, 1), d(2024, 2, 29)), "1 Month");
        assert_eq!(compute_duration(d(2024, 1, 1), d(2024, 3, 31)), "3 Months");
        assert_eq!(compute_duration(d(2023, 1, 1), d(2023, 3, 1)), "1 Month");
    }

    #[test]
    fn display_spells_out_month() {
        assert_eq!(to_display(d(2006, 1, 2)), "02 January 2006");
        assert_eq!(to_display(d(2024, 12, 25)), "25 December 2024");
    }

    #[test]
    fn storage_key_round_trips() {
        for date in [d(2024, 2, 29), d(1999, 12, 31), d(2006, 1, 2)] {
            assert_eq!(parse_storage_key(&to_storage_key(date)).unwrap(), date);
        }
        assert_eq!(to_storage_key(d(2006, 1, 2)), "2006-01-02");
    }

    #[test]
    fn parse_rejects_invalid_input() {
        assert!(matches!(parse_storage_key(""), Err(AppError::Validation(_))));
        assert!(matches!(parse_storage_key("2024-02-30"), Err(AppError::Validation(_))));
        assert!(matches!(parse_storage_key("02 January 2006"), Err(AppError::Validation(_))));
    }
}

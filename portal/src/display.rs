//! Formatting shared by the pages.

use api_types::AmcSubscription;
use chrono::{DateTime, Utc};

/// Days left at or below which an active AMC is flagged as expiring.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Formats an amount in rupees with Indian digit grouping (`₹1,23,456`).
/// Paise are shown only when present.
pub fn rupees(amount: f64) -> String {
    let negative = amount < 0.0;
    let paise_total = (amount.abs() * 100.0).round() as u64;
    let (whole, paise) = (paise_total / 100, paise_total % 100);

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{tail}", groups.join(","))
    };

    let sign = if negative { "-" } else { "" };
    if paise == 0 {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{paise:02}")
    }
}

pub fn rupees_or_zero(amount: Option<f64>) -> String {
    rupees(amount.unwrap_or_default())
}

/// `12 Mar 2025`
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn short_date_or_na(date: Option<&DateTime<Utc>>) -> String {
    date.map(short_date).unwrap_or_else(|| "N/A".to_owned())
}

/// Whole days from `now` until `due`, negative when overdue.
pub fn days_until(due: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    due.signed_duration_since(*now).num_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmcBadge {
    Expired,
    Expiring(i64),
    Active,
}

impl AmcBadge {
    pub fn of(amc: &AmcSubscription) -> Self {
        if amc.is_expired() {
            return AmcBadge::Expired;
        }
        match amc.days_remaining {
            Some(days) if days <= EXPIRY_WARNING_DAYS => AmcBadge::Expiring(days),
            _ => AmcBadge::Active,
        }
    }

    pub fn label(&self) -> String {
        match self {
            AmcBadge::Expired => "Expired".to_owned(),
            AmcBadge::Expiring(days) => format!("Expiring in {days} days"),
            AmcBadge::Active => "Active".to_owned(),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            AmcBadge::Expired => "badge text-bg-danger",
            AmcBadge::Expiring(_) => "badge text-bg-warning",
            AmcBadge::Active => "badge text-bg-success",
        }
    }
}

/// Bootstrap badge class for the free-form status strings the server sends.
pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "delivered" | "active" | "completed" | "resolved" | "paid" => "badge text-bg-success",
        "pending" | "open" | "in progress" | "assigned" => "badge text-bg-warning",
        "cancelled" | "returned" | "failed" | "expired" | "rejected" => "badge text-bg-danger",
        _ => "badge text-bg-primary",
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn rupees_use_indian_grouping() {
        assert_eq!(rupees(0.0), "₹0");
        assert_eq!(rupees(999.0), "₹999");
        assert_eq!(rupees(1_000.0), "₹1,000");
        assert_eq!(rupees(123_456.0), "₹1,23,456");
        assert_eq!(rupees(12_345_678.5), "₹1,23,45,678.50");
        assert_eq!(rupees(-4_500.0), "-₹4,500");
        assert_eq!(rupees_or_zero(None), "₹0");
    }

    #[test]
    fn dates_render_day_month_year() {
        let date = Utc.with_ymd_and_hms(2025, 3, 7, 18, 30, 0).unwrap();
        assert_eq!(short_date(&date), "07 Mar 2025");
        assert_eq!(short_date_or_na(None), "N/A");
    }

    #[test]
    fn days_until_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap();
        assert_eq!(days_until(&due, &now), 9);
        assert_eq!(days_until(&now, &due), -9);
    }

    fn amc(status: &str, days_remaining: Option<i64>) -> AmcSubscription {
        AmcSubscription {
            status: Some(status.to_owned()),
            days_remaining,
            ..Default::default()
        }
    }

    #[test]
    fn amc_badge_follows_expiry_rule() {
        assert_eq!(AmcBadge::of(&amc("Expired", Some(10))), AmcBadge::Expired);
        assert_eq!(AmcBadge::of(&amc("Active", Some(30))), AmcBadge::Expiring(30));
        assert_eq!(AmcBadge::of(&amc("Active", Some(31))), AmcBadge::Active);
        assert_eq!(AmcBadge::of(&amc("Active", None)), AmcBadge::Active);
        assert_eq!(AmcBadge::Expiring(12).label(), "Expiring in 12 days");
        assert_eq!(AmcBadge::Expired.label(), "Expired");
    }

    #[test]
    fn status_class_is_case_insensitive() {
        assert_eq!(status_class("Delivered"), "badge text-bg-success");
        assert_eq!(status_class("CANCELLED"), "badge text-bg-danger");
        assert_eq!(status_class("Shipped"), "badge text-bg-primary");
    }
}

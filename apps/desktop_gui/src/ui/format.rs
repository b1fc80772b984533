//! Pure transforms from order data to display strings.
//!
//! egui renders these strings literally, so user-supplied text must pass
//! through unmodified and is never interpreted as markup.

use chrono::Local;
use shared::domain::{Delivery, FlexTimestamp, Payment};

pub fn timestamp(ts: &FlexTimestamp) -> String {
    match ts.to_utc() {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => ts.raw_text(),
    }
}

pub fn opt_timestamp(ts: Option<&FlexTimestamp>) -> String {
    ts.map(timestamp).unwrap_or_default()
}

pub fn opt_text(text: Option<&str>) -> &str {
    text.unwrap_or_default()
}

/// City + street address, skipping blank parts.
pub fn delivery_address(delivery: &Delivery) -> String {
    [delivery.city.as_deref(), delivery.address.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn payment_amount(payment: &Payment) -> String {
    let Some(amount) = payment.amount else {
        return String::new();
    };
    let currency = payment.currency.as_deref().unwrap_or_default();
    format!("{} {}", number(amount), currency).trim_end().to_string()
}

/// Prints whole numbers without a trailing `.0`.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn opt_number(value: Option<f64>) -> String {
    value.map(number).unwrap_or_default()
}

pub fn item_count(count: usize) -> String {
    format!("{count} pcs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::FlexTimestamp;

    #[test]
    fn unix_and_iso_timestamps_format_identically() {
        let unix = FlexTimestamp::Unix(1637907727);
        let iso = FlexTimestamp::Text("2021-11-26T06:22:07Z".to_string());
        assert_eq!(timestamp(&unix), timestamp(&iso));
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        let odd = FlexTimestamp::Text("next tuesday".to_string());
        assert_eq!(timestamp(&odd), "next tuesday");
        assert_eq!(opt_timestamp(None), "");
    }

    #[test]
    fn address_skips_blank_parts() {
        let full = Delivery {
            city: Some("Kiryat Mozkin".to_string()),
            address: Some("Ploshad Mira 15".to_string()),
            ..Delivery::default()
        };
        assert_eq!(delivery_address(&full), "Kiryat Mozkin, Ploshad Mira 15");

        let city_only = Delivery {
            city: Some("Moscow".to_string()),
            address: Some("  ".to_string()),
            ..Delivery::default()
        };
        assert_eq!(delivery_address(&city_only), "Moscow");
        assert_eq!(delivery_address(&Delivery::default()), "");
    }

    #[test]
    fn amount_includes_currency_and_drops_trailing_zero() {
        let payment = Payment {
            amount: Some(1817.0),
            currency: Some("USD".to_string()),
            ..Payment::default()
        };
        assert_eq!(payment_amount(&payment), "1817 USD");

        let fractional = Payment {
            amount: Some(317.1),
            currency: None,
            ..Payment::default()
        };
        assert_eq!(payment_amount(&fractional), "317.1");
        assert_eq!(payment_amount(&Payment::default()), "");
    }

    #[test]
    fn user_text_passes_through_unmodified() {
        // Markup-looking content must stay literal text.
        let hostile = "<script>alert('x')</script>";
        assert_eq!(opt_text(Some(hostile)), hostile);

        let delivery = Delivery {
            city: Some("<b>City</b>".to_string()),
            address: Some("\"quoted\" & 'plain'".to_string()),
            ..Delivery::default()
        };
        assert_eq!(
            delivery_address(&delivery),
            "<b>City</b>, \"quoted\" & 'plain'"
        );
    }

    #[test]
    fn item_count_reads_naturally() {
        assert_eq!(item_count(0), "0 pcs");
        assert_eq!(item_count(3), "3 pcs");
    }
}

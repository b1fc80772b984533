use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp the backend serializes either as unix seconds or as an
/// ISO-8601 string, depending on which pipeline produced the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexTimestamp {
    Unix(i64),
    Text(String),
}

impl FlexTimestamp {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            FlexTimestamp::Unix(secs) => Utc.timestamp_opt(*secs, 0).single(),
            FlexTimestamp::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Raw textual form, used as a display fallback when parsing fails.
    pub fn raw_text(&self) -> String {
        match self {
            FlexTimestamp::Unix(secs) => secs.to_string(),
            FlexTimestamp::Text(text) => text.clone(),
        }
    }
}

/// A tracked purchase record. Orders arrive wholesale from the backend and
/// are never assembled client-side, so every field except the unique
/// `order_uid` is tolerated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shardkey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sm_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<FlexTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oof_shard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Order {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.date_created.as_ref().and_then(FlexTimestamp::to_utc)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_dt: Option<FlexTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fee: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrt_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const SAMPLE_ORDER: &str = r#"{
        "order_uid": "b563feb7b2b84b6test",
        "track_number": "WBILMTESTTRACK",
        "entry": "WBIL",
        "locale": "en",
        "internal_signature": "",
        "customer_id": "test",
        "delivery_service": "meest",
        "shardkey": "9",
        "sm_id": 99,
        "date_created": "2021-11-26T06:22:19Z",
        "oof_shard": "1",
        "delivery": {
            "name": "Test Testov",
            "phone": "+9720000000",
            "zip": "2639809",
            "city": "Kiryat Mozkin",
            "address": "Ploshad Mira 15",
            "region": "Kraiot",
            "email": "test@gmail.com"
        },
        "payment": {
            "transaction": "b563feb7b2b84b6test",
            "request_id": "",
            "currency": "USD",
            "provider": "wbpay",
            "amount": 1817,
            "payment_dt": 1637907727,
            "bank": "alpha",
            "delivery_cost": 1500,
            "goods_total": 317,
            "custom_fee": 0
        },
        "items": [
            {
                "chrt_id": 9934930,
                "track_number": "WBILMTESTTRACK",
                "price": 453,
                "rid": "ab4219087a764ae0btest",
                "name": "Mascaras",
                "sale": 30,
                "size": "0",
                "total_price": 317.1,
                "nm_id": 2389212,
                "brand": "Vivienne Sabo",
                "status": 202
            }
        ]
    }"#;

    #[test]
    fn parses_canonical_order_payload() {
        let order: Order = serde_json::from_str(SAMPLE_ORDER).expect("order parses");
        assert_eq!(order.order_uid, "b563feb7b2b84b6test");
        assert_eq!(order.track_number.as_deref(), Some("WBILMTESTTRACK"));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].nm_id, Some(2389212));
        assert_eq!(order.items[0].total_price, Some(317.1));

        let delivery = order.delivery.as_ref().expect("delivery present");
        assert_eq!(delivery.city.as_deref(), Some("Kiryat Mozkin"));

        let payment = order.payment.as_ref().expect("payment present");
        assert_eq!(payment.amount, Some(1817.0));
    }

    #[test]
    fn date_created_parses_as_iso_timestamp() {
        let order: Order = serde_json::from_str(SAMPLE_ORDER).expect("order parses");
        let created = order.created_at().expect("parseable date_created");
        assert_eq!(created.year(), 2021);
        assert_eq!(created.month(), 11);
    }

    #[test]
    fn payment_dt_accepts_unix_seconds_and_iso_text() {
        let unix: FlexTimestamp = serde_json::from_str("1637907727").expect("unix parses");
        let iso: FlexTimestamp =
            serde_json::from_str("\"2021-11-26T06:22:07Z\"").expect("iso parses");
        assert_eq!(unix.to_utc(), iso.to_utc());
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_raw_text() {
        let odd = FlexTimestamp::Text("next tuesday".to_string());
        assert!(odd.to_utc().is_none());
        assert_eq!(odd.raw_text(), "next tuesday");
    }

    #[test]
    fn tolerates_sparse_and_unknown_fields() {
        let order: Order = serde_json::from_str(
            r#"{"order_uid": "sparse-1", "some_future_field": {"nested": true}}"#,
        )
        .expect("sparse order parses");
        assert_eq!(order.order_uid, "sparse-1");
        assert!(order.delivery.is_none());
        assert!(order.items.is_empty());
    }
}

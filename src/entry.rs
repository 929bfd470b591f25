use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One recorded food-photo analysis result.
///
/// Wire/storage field names match the persisted JSON layout (`foodname`,
/// `dateAdded`). Macro fields are grams; `kcal` is the calorie estimate.
/// `date_added` is stamped by [`crate::journal::Journal::append`] and never
/// mutated afterward, so every persisted entry carries a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "foodname")]
    pub food_name: String,
    pub carbohydrates: f64,
    pub fats: f64,
    pub proteins: f64,
    pub kcal: f64,
    #[serde(rename = "dateAdded", default)]
    pub date_added: Option<DateTime<Local>>,
}

impl Entry {
    /// The entry's timestamp interpreted as a local calendar date.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.date_added.map(|d| d.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_wire_field_names() {
        let entry = Entry {
            food_name: "Apple".to_string(),
            carbohydrates: 25.0,
            fats: 0.3,
            proteins: 0.5,
            kcal: 95.0,
            date_added: Local.with_ymd_and_hms(2026, 8, 27, 12, 30, 0).single(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"foodname\":\"Apple\""));
        assert!(json.contains("\"dateAdded\":"));
        assert!(json.contains("\"kcal\":95.0"));
    }

    #[test]
    fn deserializes_entry_without_timestamp() {
        let json = r#"{"foodname":"Toast","carbohydrates":13,"fats":1,"proteins":2.7,"kcal":75}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.food_name, "Toast");
        assert!(entry.date_added.is_none());
        assert!(entry.local_date().is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let entry = Entry {
            food_name: "Yogurt".to_string(),
            carbohydrates: 6.0,
            fats: 3.2,
            proteins: 5.5,
            kcal: 61.0,
            date_added: Some(Local::now()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}

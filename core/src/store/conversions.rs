//! DynamoDB attribute conversion functions.
//!
//! Pure functions between `AttributeValue` maps and `StudentRecord`, testable
//! without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::errors::StoreError;
use crate::student::{Age, FIELD_AGE, FIELD_CLASS, FIELD_ID, FIELD_NAME, StudentRecord};

use super::ScanPage;

pub type Item = HashMap<String, AttributeValue>;

/// Convert a StudentRecord to a DynamoDB item.
pub fn student_to_item(student: &StudentRecord) -> Item {
    HashMap::from([
        (FIELD_ID.to_string(), AttributeValue::S(student.id.clone())),
        (FIELD_NAME.to_string(), AttributeValue::S(student.name.clone())),
        (
            FIELD_CLASS.to_string(),
            AttributeValue::S(student.class_name.clone()),
        ),
        (FIELD_AGE.to_string(), age_to_attr(&student.age)),
    ])
}

fn age_to_attr(age: &Age) -> AttributeValue {
    match age {
        Age::Years(years) => AttributeValue::N(years.to_string()),
        Age::Legacy(raw) => AttributeValue::S(raw.clone()),
    }
}

/// Build one page of records from the raw `Scan` output.
///
/// An empty `LastEvaluatedKey` map means the same as an absent one.
pub fn scan_output_to_page(
    items: Option<Vec<Item>>,
    last_evaluated_key: Option<Item>,
) -> Result<ScanPage<Item>, StoreError> {
    let items = items
        .unwrap_or_default()
        .iter()
        .map(item_to_student)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScanPage {
        items,
        next: next_cursor(last_evaluated_key),
    })
}

pub fn next_cursor(last_evaluated_key: Option<Item>) -> Option<Item> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

/// Convert a DynamoDB item to a StudentRecord.
pub fn item_to_student(item: &Item) -> Result<StudentRecord, StoreError> {
    Ok(StudentRecord {
        id: get_id(item)?,
        name: get_string(item, FIELD_NAME)?,
        class_name: get_string(item, FIELD_CLASS)?,
        age: get_age(item)?,
    })
}

fn get_attr<'a>(item: &'a Item, key: &str) -> Result<&'a AttributeValue, StoreError> {
    item.get(key).ok_or_else(|| StoreError::Conversion {
        reason: format!("Missing attribute '{}'", key),
    })
}

fn get_string(item: &Item, key: &str) -> Result<String, StoreError> {
    match get_attr(item, key)? {
        AttributeValue::S(s) => Ok(s.clone()),
        other => Err(unexpected(key, "S", other)),
    }
}

// Keys written by other tools may be numeric.
fn get_id(item: &Item) -> Result<String, StoreError> {
    match get_attr(item, FIELD_ID)? {
        AttributeValue::S(s) => Ok(s.clone()),
        AttributeValue::N(n) => Ok(n.clone()),
        other => Err(unexpected(FIELD_ID, "S or N", other)),
    }
}

// Older clients stored the raw form text, which may not be a number at all.
fn get_age(item: &Item) -> Result<Age, StoreError> {
    match get_attr(item, FIELD_AGE)? {
        AttributeValue::N(n) | AttributeValue::S(n) => Ok(Age::from_stored(n)),
        other => Err(unexpected(FIELD_AGE, "N or S", other)),
    }
}

fn unexpected(key: &str, expected: &str, found: &AttributeValue) -> StoreError {
    StoreError::Conversion {
        reason: format!(
            "Attribute '{}' should be {}, found {:?}",
            key, expected, found
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, AttributeValue)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_student_item_layout() {
        let item = student_to_item(&StudentRecord::new("s1", "Alice", "5A", 11));

        assert_eq!(item.len(), 4);
        assert_eq!(item.get("id"), Some(&AttributeValue::S("s1".to_string())));
        assert_eq!(item.get("name"), Some(&AttributeValue::S("Alice".to_string())));
        assert_eq!(item.get("class"), Some(&AttributeValue::S("5A".to_string())));
        assert_eq!(item.get("age"), Some(&AttributeValue::N("11".to_string())));
    }

    #[test]
    fn test_item_back_to_student() {
        let student = StudentRecord::new("s9", "Zoe", "4C", 9);
        assert_eq!(item_to_student(&student_to_item(&student)).unwrap(), student);
    }

    #[test]
    fn test_accepts_legacy_string_age_and_numeric_id() {
        let legacy = item(&[
            ("id", AttributeValue::N("17".to_string())),
            ("name", AttributeValue::S("Bob".to_string())),
            ("class", AttributeValue::S("6B".to_string())),
            ("age", AttributeValue::S("12".to_string())),
        ]);

        let student = item_to_student(&legacy).unwrap();
        assert_eq!(student, StudentRecord::new("17", "Bob", "6B", 12));
    }

    #[test]
    fn test_missing_attribute() {
        let partial = item(&[
            ("id", AttributeValue::S("s1".to_string())),
            ("name", AttributeValue::S("Alice".to_string())),
            ("age", AttributeValue::N("11".to_string())),
        ]);

        let err = item_to_student(&partial).unwrap_err();
        assert!(err.to_string().contains("'class'"));
    }

    #[test]
    fn test_wrong_attribute_types() {
        let bad_name = item(&[
            ("id", AttributeValue::S("s1".to_string())),
            ("name", AttributeValue::Bool(true)),
            ("class", AttributeValue::S("5A".to_string())),
            ("age", AttributeValue::N("11".to_string())),
        ]);
        assert!(matches!(
            item_to_student(&bad_name),
            Err(StoreError::Conversion { .. })
        ));

        let bad_age = item(&[
            ("id", AttributeValue::S("s1".to_string())),
            ("name", AttributeValue::S("Alice".to_string())),
            ("class", AttributeValue::S("5A".to_string())),
            ("age", AttributeValue::Bool(false)),
        ]);
        assert!(matches!(
            item_to_student(&bad_age),
            Err(StoreError::Conversion { .. })
        ));
    }

    #[test]
    fn test_non_numeric_legacy_age_is_kept() {
        let blank = item(&[
            ("id", AttributeValue::S("s7".to_string())),
            ("name", AttributeValue::S("Eve".to_string())),
            ("class", AttributeValue::S("5A".to_string())),
            ("age", AttributeValue::S(String::new())),
        ]);
        let student = item_to_student(&blank).unwrap();
        assert_eq!(student.age, Age::Legacy(String::new()));

        // Written back as it was read.
        let written = student_to_item(&student);
        assert_eq!(written.get("age"), Some(&AttributeValue::S(String::new())));

        let fractional = item(&[
            ("id", AttributeValue::S("s8".to_string())),
            ("name", AttributeValue::S("Finn".to_string())),
            ("class", AttributeValue::S("5A".to_string())),
            ("age", AttributeValue::N("11.5".to_string())),
        ]);
        assert_eq!(
            item_to_student(&fractional).unwrap().age,
            Age::Legacy("11.5".to_string())
        );
    }

    #[test]
    fn test_scan_page_with_legacy_item() {
        let items = vec![
            student_to_item(&StudentRecord::new("s1", "Alice", "5A", 11)),
            item(&[
                ("id", AttributeValue::S("s7".to_string())),
                ("name", AttributeValue::S("Eve".to_string())),
                ("class", AttributeValue::S("5A".to_string())),
                ("age", AttributeValue::S(String::new())),
            ]),
        ];

        let page = scan_output_to_page(Some(items), None).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].age, Age::Legacy(String::new()));
        assert!(page.next.is_none());
    }

    #[test]
    fn test_next_cursor() {
        assert_eq!(next_cursor(None), None);
        assert_eq!(next_cursor(Some(Item::new())), None);

        let key = item(&[("id", AttributeValue::S("s5".to_string()))]);
        assert_eq!(next_cursor(Some(key.clone())), Some(key));
    }

    #[test]
    fn test_empty_scan_output() {
        let page = scan_output_to_page(None, Some(Item::new())).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
    }
}

use formstate::{Constraint, FieldKind, FormSchema, FormStore, SchemaError};

const SURVEY: &str = r#"{
    "fields": [
        {
            "name": "name",
            "placeholder": "What is your name",
            "rules": { "minLength": 4, "isRequired": true }
        },
        {
            "name": "my_email",
            "kind": "email",
            "rules": { "isRequired": true, "isEmail": true }
        },
        {
            "name": "my_radio",
            "kind": "radio",
            "placeholder": "Are you a frontend developer",
            "rules": { "isRequired": true },
            "options": [
                { "value": 0, "displayValue": "No" },
                { "value": 1, "displayValue": "Yes" }
            ]
        }
    ]
}"#;

#[test]
fn test_load_survey() {
    let schema = FormSchema::from_json(SURVEY).unwrap();
    assert_eq!(schema.len(), 3);

    let name = schema.field("name").unwrap();
    assert_eq!(name.placeholder(), "What is your name");
    assert_eq!(name.kind(), FieldKind::Text);
    assert_eq!(name.rules().get("minLength"), Some(&Constraint::MinLength(4)));

    let radio = schema.field("my_radio").unwrap();
    assert_eq!(radio.kind(), FieldKind::Radio);
    let values: Vec<&str> = radio
        .options()
        .unwrap()
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(values, vec!["0", "1"]);
}

#[test]
fn test_unknown_rules_load_and_always_pass() {
    // Rule names the engine does not know are kept but never reject a value.
    let json = r#"{"fields": [{"name": "phone", "rules": {"isPhone": true}}]}"#;
    let schema = FormSchema::from_json(json).unwrap();
    let mut store = FormStore::new(schema);

    let state = store.apply_change("phone", "definitely not a phone").unwrap();
    assert!(state.field("phone").unwrap().is_valid());
    assert!(state.is_valid());
}

#[test]
fn test_empty_rules_accept_anything_once_touched() {
    let json = r#"{"fields": [{"name": "comment"}]}"#;
    let mut store = FormStore::new(FormSchema::from_json(json).unwrap());
    assert!(!store.snapshot().is_valid());
    assert!(store.apply_change("comment", "").unwrap().is_valid());
}

#[test]
fn test_duplicate_names_rejected() {
    let json = r#"{"fields": [{"name": "a"}, {"name": "a"}]}"#;
    let err = FormSchema::from_json(json).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { ref name } if name == "a"));
    assert!(err.to_string().contains("'a'"));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        FormSchema::from_json("{\"fields\": [").unwrap_err(),
        SchemaError::Parse(_)
    ));
    assert!(matches!(
        FormSchema::from_json(r#"{"fields": [{"name": "a", "rules": {"maxLength": -3}}]}"#)
            .unwrap_err(),
        SchemaError::Parse(_)
    ));
}

#[test]
fn test_missing_file_reports_path() {
    let err = FormSchema::from_path("/definitely/not/here/form.json").unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here/form.json"));
}

#[test]
fn test_schema_round_trips_through_json() {
    let schema = formstate::demo_schema();
    let json = serde_json::to_string(&schema).unwrap();
    assert_eq!(FormSchema::from_json(&json).unwrap(), schema);
}

//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use otd_core::entities::*;
use otd_core::enums::QueryPhase;
use otd_core::responses::*;
use otd_core::selector::QueryDate;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn assert_valid<T: schemars::JsonSchema + serde::Serialize>(value: &T) {
    let schema = serde_json::to_value(schema_for!(T)).unwrap();
    let instance = serde_json::to_value(value).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(
        errors.is_empty(),
        "Schema validation failed for {}: {errors:?}",
        std::any::type_name::<T>()
    );
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            assert_valid(&val);
        }
    };
}

fn kuip_photo() -> PhotoRecord {
    PhotoRecord {
        id: 4_512_877,
        title: "File:Feyenoord tegen Ajax 1-0 - 15 maart 1970.jpg".into(),
        image_url: "https://upload.wikimedia.org/wikipedia/commons/a/a1/Feyenoord.jpg".into(),
        source_page_url: "https://commons.wikimedia.org/wiki/File:Feyenoord.jpg".into(),
        description: "<p>Feyenoord tegen Ajax in De Kuip</p>".into(),
        date: "1970-03-15".parse().unwrap(),
    }
}

roundtrip_and_validate!(photo_record_roundtrip, PhotoRecord, kuip_photo());

roundtrip_and_validate!(
    event_group_roundtrip,
    EventGroup,
    EventGroup {
        date: "1970-03-15".parse().unwrap(),
        photos: vec![kuip_photo(), kuip_photo()],
    }
);

roundtrip_and_validate!(
    caption_request_roundtrip,
    CaptionRequestItem,
    CaptionRequestItem {
        date: "1970-03-15".into(),
        descriptions: vec!["Feyenoord tegen Ajax in De Kuip".into()],
    }
);

roundtrip_and_validate!(
    caption_result_roundtrip,
    CaptionResult,
    CaptionResult {
        date: "1970-03-15".into(),
        headline: "Feyenoord klopt Ajax".into(),
        match_info: "Feyenoord - Ajax, 1-0".into(),
    }
);

roundtrip_and_validate!(
    display_event_roundtrip,
    DisplayEvent,
    DisplayEvent {
        date: "1970-03-15".parse().unwrap(),
        headline: "Feyenoord klopt Ajax".into(),
        match_info: String::new(),
        source_url: kuip_photo().source_page_url,
        image: kuip_photo(),
        photo_count: 2,
    }
);

roundtrip_and_validate!(query_state_error_roundtrip, QueryState, QueryState::error());

roundtrip_and_validate!(
    query_state_results_roundtrip,
    QueryState,
    QueryState::Results {
        events: vec![DisplayEvent {
            date: "2002-05-08".parse().unwrap(),
            headline: "UEFA Cup in De Kuip".into(),
            match_info: "Feyenoord - Borussia Dortmund, 3-2".into(),
            source_url: "https://commons.wikimedia.org/wiki/File:Uefa.jpg".into(),
            image: kuip_photo(),
            photo_count: 1,
        }],
    }
);

roundtrip_and_validate!(
    day_options_roundtrip,
    DayOptionsResponse,
    DayOptionsResponse {
        month: 2,
        month_name: "februari".into(),
        days: (1..=29).collect(),
    }
);

roundtrip_and_validate!(
    month_option_roundtrip,
    MonthOption,
    MonthOption {
        number: 12,
        name: "december".into(),
    }
);

roundtrip_and_validate!(query_phase_roundtrip, QueryPhase, QueryPhase::NoResults);

#[test]
fn caption_result_uses_camel_case_match_info() {
    let json = serde_json::to_value(CaptionResult {
        date: "1970-03-15".into(),
        headline: "x".into(),
        match_info: String::new(),
    })
    .unwrap();
    assert!(json.get("matchInfo").is_some());
    assert!(json.get("match_info").is_none());
}

#[test]
fn caption_schema_rejects_missing_headline() {
    let schema = serde_json::to_value(schema_for!(Vec<CaptionResult>)).unwrap();
    let instance = serde_json::json!([{ "date": "1970-03-15", "matchInfo": "" }]);
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}

#[test]
fn query_report_validates() {
    let query = QueryDate::new(3, 15).unwrap();
    assert_valid(&QueryReport::new(query, QueryState::NoResults));
    assert_valid(&QueryReport::new(query, QueryState::error()));
}

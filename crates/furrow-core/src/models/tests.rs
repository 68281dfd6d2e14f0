#[cfg(test)]
mod model_tests {
    use crate::{
        error::PlannerError,
        fixtures::{day, field_groups, in_sequence, planting, sequence},
        models::{bed_number, bed_row, Bed, BedSizing, Plan},
    };

    fn parse(json: &str) -> Result<Plan, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_bed_name_parsing() {
        assert_eq!(bed_row("J2"), "J");
        assert_eq!(bed_row("GH12"), "GH");
        assert_eq!(bed_row("12"), "");
        assert_eq!(bed_number("J2"), Some(2));
        assert_eq!(bed_number("GH12"), Some(12));
        assert_eq!(bed_number("GH"), None);
    }

    #[test]
    fn test_capacity_is_a_function_of_row() {
        let sizing = BedSizing::default();
        assert_eq!(Bed::parse("J4", &sizing).capacity_feet, 20);
        assert_eq!(Bed::parse("A4", &sizing).capacity_feet, 50);
        assert_eq!(Bed::parse("JX1", &sizing).capacity_feet, 50);
    }

    #[test]
    fn test_deserialize_defaults() {
        let plan = parse(
            r#"{
                "plantings": [
                    {"id": "P1", "specId": "c1", "fieldStartDate": "2025-04-01", "endDate": "2025-05-01", "resource": ""},
                    {"id": "P2", "configId": "c1", "fieldStartDate": "2025-04-01", "endDate": "2025-05-01", "resource": "A3"},
                    {"id": "P3", "configId": "c1", "fieldStartDate": "2025-04-01", "endDate": "2025-05-01", "resource": "J3", "feetNeeded": 35}
                ]
            }"#,
        )
        .expect("plan should parse");

        let p1 = plan.planting("P1").unwrap();
        assert_eq!(p1.resource, None);
        assert_eq!(p1.feet_needed, 50);
        assert_eq!(p1.group_id, "P1");
        assert!(!p1.is_locked);

        assert_eq!(plan.planting("P2").unwrap().feet_needed, 50);
        assert_eq!(plan.planting("P3").unwrap().feet_needed, 35);
        assert_eq!(plan.bed_sizing, BedSizing::default());
    }

    #[test]
    fn test_deserialize_rejects_zero_footage() {
        let err = parse(
            r#"{"plantings": [{"id": "P1", "configId": "c", "fieldStartDate": "2025-04-01", "endDate": "2025-05-01", "feetNeeded": 0}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("positive footage"));
    }

    #[test]
    fn test_deserialize_rejects_sequence_without_slot() {
        let err = parse(
            r#"{
                "plantings": [{"id": "P1", "configId": "c", "fieldStartDate": "2025-04-01", "endDate": "2025-05-01", "sequenceId": "S1"}],
                "sequences": [{"id": "S1", "offsetDays": 7}]
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("without a slot"));
    }

    #[test]
    fn test_deserialize_rejects_inverted_dates() {
        let err = parse(
            r#"{"plantings": [{"id": "P1", "configId": "c", "fieldStartDate": "2025-05-01", "endDate": "2025-04-01"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("before start date"));
    }

    #[test]
    fn test_corrupted_slots_still_load() {
        let plan = parse(
            r#"{
                "plantings": [
                    {"id": "P1", "configId": "c", "fieldStartDate": "2025-04-01", "endDate": "2025-05-01", "sequenceId": "S1", "sequenceSlot": 3},
                    {"id": "P2", "configId": "c", "fieldStartDate": "2025-04-01", "endDate": "2025-05-01", "sequenceId": "S1", "sequenceSlot": 3}
                ],
                "sequences": [{"id": "S1", "offsetDays": 7}]
            }"#,
        )
        .expect("corrupted sequences must remain loadable");
        assert_eq!(plan.sequence_members("S1").len(), 2);
    }

    #[test]
    fn test_validate_unknown_sequence_reference() {
        let result = Plan::new(
            vec![in_sequence(planting("P1", "2025-04-01", "2025-05-01"), "S9", 0)],
            field_groups(),
            vec![],
            BedSizing::default(),
        );
        assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    }

    #[test]
    fn test_validate_duplicate_bed_names() {
        let mut groups = field_groups();
        groups[1].beds.push("A1".to_string());
        let result = Plan::new(vec![], groups, vec![], BedSizing::default());
        assert!(result.unwrap_err().to_string().contains("duplicate id 'A1'"));
    }

    #[test]
    fn test_validate_group_rows_share_dates() {
        let first = planting("P1", "2025-04-01", "2025-05-01");
        let mut second = planting("P2", "2025-04-02", "2025-05-01");
        second.group_id = "P1".to_string();
        let result = Plan::new(vec![first, second], field_groups(), vec![], BedSizing::default());
        assert!(result.unwrap_err().to_string().contains("disagree on dates"));
    }

    #[test]
    fn test_validate_zero_offset() {
        let result = Plan::new(vec![], field_groups(), vec![sequence("S1", 0)], BedSizing::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trips_membership() {
        let plan = Plan::new(
            vec![in_sequence(planting("P1", "2025-04-01", "2025-05-01"), "S1", 0)],
            field_groups(),
            vec![sequence("S1", 14)],
            BedSizing::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["plantings"][0]["sequenceId"], "S1");
        assert_eq!(json["plantings"][0]["sequenceSlot"], 0);
        assert_eq!(json["plantings"][0]["fieldStartDate"], "2025-04-01");
        assert!(json["plantings"][0].get("resource").is_none());

        let back: Plan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
        assert_eq!(back.planting("P1").unwrap().field_start_date, day("2025-04-01"));
    }

    #[test]
    fn test_lookup_errors() {
        let plan = Plan::default();
        assert!(matches!(plan.planting("nope"), Err(PlannerError::NotFound { .. })));
        assert!(matches!(plan.sequence("nope"), Err(PlannerError::NotFound { .. })));
        assert!(matches!(plan.bed("Z1"), Err(PlannerError::NotFound { .. })));
        assert!(matches!(plan.resource_group("nope"), Err(PlannerError::NotFound { .. })));
    }
}

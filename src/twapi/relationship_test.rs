use super::relationship::*;

#[test]
fn test_legacy_user_groups_encoding_order() {
    let groups = LegacyUserGroups {
        user_ids: vec![1, 2],
        company_ids: vec![5],
        team_ids: vec![9],
    };
    assert_eq!(groups.to_string(), "1,2,c5,t9");
    assert_eq!(serde_json::to_string(&groups).unwrap(), "\"1,2,c5,t9\"");
}

#[test]
fn test_legacy_user_groups_empty_encodes_to_empty_string() {
    let groups = LegacyUserGroups::default();
    assert!(groups.is_empty());
    assert_eq!(groups.to_string(), "");
}

#[test]
fn test_legacy_user_groups_single_class_has_no_stray_commas() {
    let groups = LegacyUserGroups {
        user_ids: vec![7],
        ..Default::default()
    };
    assert_eq!(groups.to_string(), "7");

    let teams_only = LegacyUserGroups {
        team_ids: vec![3, 4],
        ..Default::default()
    };
    assert_eq!(teams_only.to_string(), "t3,t4");
}

#[test]
fn test_legacy_user_groups_decode() {
    let groups: LegacyUserGroups = "1,2,c5,t9".parse().unwrap();
    assert_eq!(groups.user_ids, vec![1, 2]);
    assert_eq!(groups.company_ids, vec![5]);
    assert_eq!(groups.team_ids, vec![9]);
}

#[test]
fn test_legacy_user_groups_decode_tolerates_empty_tokens() {
    let groups: LegacyUserGroups = "1,,t9".parse().unwrap();
    assert_eq!(groups.user_ids, vec![1]);
    assert!(groups.company_ids.is_empty());
    assert_eq!(groups.team_ids, vec![9]);

    let empty: LegacyUserGroups = "".parse().unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_legacy_user_groups_bare_prefix_is_an_error() {
    let err = "c".parse::<LegacyUserGroups>().unwrap_err();
    assert_eq!(err.to_string(), "invalid company ID format: c");

    let err = "1,t".parse::<LegacyUserGroups>().unwrap_err();
    assert_eq!(err.to_string(), "invalid team ID format: t");

    let err = "x7".parse::<LegacyUserGroups>().unwrap_err();
    assert_eq!(err.to_string(), "invalid user ID format: x7");
}

#[test]
fn test_legacy_user_groups_round_trip() {
    let original = LegacyUserGroups {
        user_ids: vec![1, 2],
        company_ids: vec![5],
        team_ids: vec![9],
    };
    let decoded: LegacyUserGroups = original.to_string().parse().unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_user_groups_object_form() {
    let groups = UserGroups {
        user_ids: vec![7],
        company_ids: vec![],
        team_ids: vec![],
    };
    assert_eq!(serde_json::to_string(&groups).unwrap(), "{\"userIds\":[7]}");

    let decoded: UserGroups =
        serde_json::from_str("{\"userIds\":[1],\"companyIds\":[2],\"teamIds\":[3]}").unwrap();
    assert_eq!(decoded.user_ids, vec![1]);
    assert_eq!(decoded.company_ids, vec![2]);
    assert_eq!(decoded.team_ids, vec![3]);
}

#[test]
fn test_relationship_decodes_type_and_meta() {
    let rel: Relationship =
        serde_json::from_str("{\"id\":7,\"type\":\"users\",\"meta\":{\"name\":\"Ada\"}}").unwrap();
    assert_eq!(rel.id, 7);
    assert_eq!(rel.kind, "users");
    assert!(rel.meta.is_some());
}

#[test]
fn test_legacy_relationship_accepts_string_encoded_id() {
    let rel: LegacyRelationship =
        serde_json::from_str("{\"id\":\"12\",\"type\":\"teams\"}").unwrap();
    assert_eq!(rel.id.0, 12);
}

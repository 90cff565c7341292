use super::*;
use insta::assert_snapshot;
use std::str::FromStr;

fn size_below(name: &str, n: f64) -> Condition {
    Condition::String(
        Field::local([name]).unwrap(),
        StringCondition::Size {
            op: Comparison::Lt,
            value: n,
        },
    )
}

#[test]
fn test_single_condition_group() {
    let group = ConditionGroup::all([Condition::Boolean(map_id())]).unwrap();
    assert_eq!(render_group(&group).unwrap(), "(.map.id)");
}

#[test]
fn test_and_group() {
    let group = ConditionGroup::all([size_below("a", 5.0), size_below("b", 10.0)]).unwrap();
    assert_snapshot!(render_group(&group).unwrap(), @"(.a.size() < 5) && (.b.size() < 10)");
}

#[test]
fn test_or_group() {
    let group = ConditionGroup::any([
        size_below("a", 5.0),
        Condition::Boolean(map_id()),
        size_below("b", 1.0),
    ])
    .unwrap();
    assert_snapshot!(render_group(&group).unwrap(), @"(.a.size() < 5) || (.map.id) || (.b.size() < 1)");
}

#[test]
fn test_group_preserves_member_order() {
    let forward = ConditionGroup::all([size_below("a", 1.0), size_below("b", 1.0)]).unwrap();
    let backward = ConditionGroup::all([size_below("b", 1.0), size_below("a", 1.0)]).unwrap();
    assert_ne!(render_group(&forward).unwrap(), render_group(&backward).unwrap());
    assert!(render_group(&forward).unwrap().starts_with("(.a.size()"));
}

#[test]
fn test_nested_group() {
    let inner = ConditionGroup::any([size_below("a", 1.0), size_below("b", 2.0)]).unwrap();
    let outer = ConditionGroup::all([
        GroupMember::from(Condition::Boolean(map_id())),
        GroupMember::from(inner),
    ])
    .unwrap();
    assert_snapshot!(outer.to_rule().unwrap(), @"(.map.id) && ((.a.size() < 1) || (.b.size() < 2))");
}

#[test]
fn test_group_fails_without_partial_output() {
    let group = ConditionGroup::all([
        Condition::Boolean(map_id()),
        Condition::Boolean(Field::Update(path(&[lit("pending")]))),
    ])
    .unwrap();
    assert!(matches!(
        render_group(&group),
        Err(RenderError::MalformedCondition(_))
    ));
}

#[test]
fn test_group_from_text() {
    let text = r#"{
        "operation": "&&",
        "conditions": [
            ["doc", ["users", ["param", "uid"]], ["field", ["isAdmin"]]],
            [["field", ["updatedAt"]], "withinRequest", "minutes", 5],
            {
                "operation": "||",
                "conditions": [
                    [["field", ["tags"]], "hasAny", ["public", "shared"]],
                    [["field", ["owner"]], "==", ["param", "uid"]]
                ]
            }
        ]
    }"#;
    let group = ConditionGroup::from_str(text).unwrap();
    assert_snapshot!(
        render_group(&group).unwrap(),
        @r#"(get(/databases/$(database)/documents/users/$(uid)).data.isAdmin) && ((request.time.toMillis() - .updatedAt.seconds() * 1000) < duration.value(5, "m")) && ((.tags.set().hasAny(["public","shared"])) || (.owner == uid))"#
    );
}

#[test]
fn test_group_rejects_malformed_member() {
    let text = r#"{"operation": "||", "conditions": [[["field", ["a"]], "startsWith", "x"]]}"#;
    assert!(matches!(
        ConditionGroup::from_str(text),
        Err(RenderError::MalformedCondition(_))
    ));
}

#[test]
fn test_group_serde_round_trip() {
    let group = ConditionGroup::any([
        Condition::Boolean(map_id()),
        Condition::Map(
            map_id(),
            MapCondition::Keys {
                op: SetOperation::HasOnly,
                keys: vec!["a".to_string(), "b".to_string()],
            },
        ),
    ])
    .unwrap();
    let text = serde_json::to_string(&group).unwrap();
    let back: ConditionGroup = serde_json::from_str(&text).unwrap();
    assert_eq!(back, group);
    assert_eq!(render_group(&back).unwrap(), render_group(&group).unwrap());
}

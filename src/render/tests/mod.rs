use serde_json::{Value, json};

use super::*;
use crate::dsl;
use crate::traits::RuleExpr;
use crate::types::{LogicalOperator, TimeUnit};

mod groups;

/// Parse a tuple-form condition and render it.
fn render_tuple(value: Value) -> String {
    let condition = dsl::condition_from_value(&value).unwrap();
    render_condition(&condition).unwrap()
}

fn map_id_value() -> Value {
    json!(["field", ["map", "id"]])
}

fn map_id() -> Field {
    Field::local(["map", "id"]).unwrap()
}

fn path(segments: &[PathSegment]) -> FieldPath {
    FieldPath::new(segments.to_vec()).unwrap()
}

fn lit(name: &str) -> PathSegment {
    PathSegment::literal(name)
}

fn param(name: &str) -> PathSegment {
    PathSegment::param(name)
}

#[test]
fn test_rendering_is_deterministic() {
    let condition = Condition::Geo(
        map_id(),
        GeoCondition::DistanceTo {
            target: GeoTarget::LatLng { lat: 51.5, lng: -0.12 },
            op: Comparison::Le,
            value: 10.0,
        },
    );
    let first = render_condition(&condition).unwrap();
    let second = render_condition(&condition).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, ".map.id.distance(latlng.value(51.5, -0.12)) <= 10");
}

#[test]
fn test_rendering_from_many_threads() {
    let group = ConditionGroup::new(
        LogicalOperator::And,
        [
            Condition::Boolean(map_id()),
            Condition::Timestamp(
                map_id(),
                TimestampCondition::WithinRequest {
                    unit: TimeUnit::Seconds,
                    amount: 30.0,
                },
            ),
        ],
    )
    .unwrap();
    let expected = render_group(&group).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| render_group(&group).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

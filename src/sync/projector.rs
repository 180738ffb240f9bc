use serde_json::Value;

use crate::domain::{FeedItem, Payload, Rule};

/// Extract and rename the fields named by `rule` from `item`.
///
/// Field names match case-insensitively. Missing or null fields are left out
/// of the payload. Pairs are applied in rule order, so the last pair writing a
/// given output key wins.
pub fn project(item: &FeedItem, rule: &Rule) -> Payload {
    let mut payload = Payload::new();

    for pair in rule.pairs() {
        match item.field(&pair.source) {
            Some(Value::Null) | None => {}
            Some(value) => {
                payload.insert(pair.output.clone(), value.clone());
            }
        }
    }

    payload
}

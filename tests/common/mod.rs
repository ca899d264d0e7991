use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const AUTHORS: [&str; 6] = ["Amy", "Bob", "Chen", "Dana", "Émile", "Farah"];

/// Build a large export with randomly missing or oddly-shaped fields.
/// Returns the export and the number of edges per operation.
pub fn big_export(seed: u64, operations: usize) -> (Value, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ops = Vec::with_capacity(operations);
    let mut edge_counts = Vec::with_capacity(operations);

    for i in 0..operations {
        let edge_count = if rng.random_bool(0.15) { 0 } else { rng.random_range(1..=12) };
        let mut edges = Vec::with_capacity(edge_count);

        for j in 0..edge_count {
            let author = *AUTHORS.choose(&mut rng).unwrap();
            let mut node = serde_json::Map::new();

            match rng.random_range(0..4) {
                0 => {
                    node.insert("user".into(), json!({"markupDisplayName": author}));
                }
                1 => {
                    node.insert("author".into(), json!({"name": author}));
                }
                2 => {
                    node.insert("user".into(), json!("not-an-object"));
                }
                _ => {}
            }
            if rng.random_bool(0.8) {
                node.insert("rating".into(), json!(rng.random_range(1..=5)));
            }
            if rng.random_bool(0.7) {
                node.insert(
                    "localizedDate".into(),
                    json!({"display": format!("2024-{:02}-{:02}", (j % 12) + 1, (i % 28) + 1)}),
                );
            }
            if rng.random_bool(0.9) {
                node.insert("text".into(), json!({"full": format!("review {i}-{j}")}));
            }

            let edge = if rng.random_bool(0.05) {
                json!({"cursor": format!("c{j}")})
            } else {
                json!({"node": Value::Object(node), "cursor": format!("c{j}")})
            };
            edges.push(edge);
        }

        let mut business = json!({
            "name": format!("Business {i}"),
            "alias": format!("business-{i}"),
            "reviews": {"edges": edges},
        });
        if rng.random_bool(0.5) {
            business["reviews"]["totalCount"] = json!(edge_count * 10);
        } else if rng.random_bool(0.5) {
            business["reviewCountsByLanguage"] = json!([{"count": edge_count}, {"count": 1}]);
        }

        ops.push(json!({"data": {"business": business}}));
        edge_counts.push(edge_count);
    }

    (Value::Array(ops), edge_counts)
}

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rhi_normalize_jsonschema::{shorthand_to_schema, type_from_schema};
use serde_json::{Value, json};

/// An order with `width` line-item definitions, each referenced twice.
fn order_schema(width: usize) -> Value {
    let mut definitions = serde_json::Map::new();
    let mut properties = serde_json::Map::new();
    for i in 0..width {
        definitions.insert(
            format!("Item{i}"),
            json!({
                "type": "object",
                "properties": {
                    "sku": {"type": "string", "minLength": 1},
                    "quantity": {"type": "integer", "minimum": 1},
                    "next": {"$ref": format!("#/definitions/Item{}", (i + 1) % width)},
                },
                "required": ["sku"],
            }),
        );
        properties.insert(format!("primary{i}"), json!({"$ref": format!("#/definitions/Item{i}")}));
        properties.insert(format!("backup{i}"), json!({"$ref": format!("#/definitions/Item{i}")}));
    }
    json!({
        "type": "object",
        "definitions": definitions,
        "properties": properties,
    })
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for width in [4, 16] {
        let schema = order_schema(width);
        group.bench_function(format!("order_{width}"), |b| {
            b.iter(|| type_from_schema(black_box(&schema), Some("Order"), None))
        });
    }
    group.finish();
}

fn bench_shorthand(c: &mut Criterion) {
    let shorthand = json!({
        "$title": "Prospect",
        "name": "string|minLength:1|maxLength:255",
        "email": "string|format:email|null",
        "age?": "integer|minimum:0",
        "tags": "string[]",
        "status": "enum:new,contacted,won,lost",
        "address": {
            "street": "string",
            "zip": "string|pattern:^[0-9]{5}$",
            "country": "/Geo/Country",
        },
    });
    c.bench_function("shorthand_to_schema", |b| {
        b.iter(|| shorthand_to_schema(black_box(&shorthand)))
    });
}

criterion_group!(benches, bench_resolve, bench_shorthand);
criterion_main!(benches);

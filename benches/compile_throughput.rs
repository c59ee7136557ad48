use criterion::{criterion_group, criterion_main, Criterion};
use mockgen::spec::SchemaNode;
use mockgen::{compile_operations, load_spec_from_value, schema_to_generator, GenerationOptions, Sampler};
use serde_json::{json, Value};
use std::hint::black_box;

fn zoo_spec() -> Value {
    let animal = json!({
        "type": "object",
        "properties": {
            "id": {"type": "string", "format": "uuid"},
            "name": {"type": "string"},
            "species": {"type": "string", "enum": ["cat", "dog", "owl"]},
            "born_at": {"type": "string"},
            "weight": {"type": "integer", "minimum": 1, "maximum": 500},
            "keeperEmail": {"type": "string"},
            "tags": {"type": "array", "items": {"type": "string"}},
            "metadata": {"type": "object", "additionalProperties": {"type": "boolean"}}
        }
    });
    let mut paths = serde_json::Map::new();
    for idx in 0..50 {
        paths.insert(
            format!("/zoo/{idx}/animals/{{id}}"),
            json!({
                "get": {
                    "operationId": format!("getAnimal{idx}"),
                    "responses": {
                        "200": {"description": "ok", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Animal"}}}},
                        "404": {"description": "missing"}
                    }
                },
                "delete": {
                    "operationId": format!("deleteAnimal{idx}"),
                    "responses": {"204": {"description": "gone"}}
                }
            }),
        );
    }
    json!({
        "openapi": "3.0.0",
        "info": {"title": "Zoo", "version": "1"},
        "paths": paths,
        "components": {"schemas": {"Animal": animal}}
    })
}

fn bench_compile(c: &mut Criterion) {
    let options = GenerationOptions::default();
    let spec = match load_spec_from_value(zoo_spec(), &options) {
        Ok(spec) => spec,
        Err(err) => panic!("benchmark document should load: {err}"),
    };

    c.bench_function("compile_operations", |b| {
        b.iter(|| compile_operations(black_box(&spec.operations), black_box(&options)))
    });

    let compiled = compile_operations(&spec.operations, &options);
    c.bench_function("render_handler_code", |b| b.iter(|| black_box(&compiled).handler_code()));

    let schema: Option<&SchemaNode> = spec.components.get("Animal");
    let generator = schema_to_generator(schema, &options, None);
    c.bench_function("sample_animal", |b| {
        let mut sampler = Sampler::new(1);
        b.iter(|| sampler.sample(black_box(&generator)))
    });
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);

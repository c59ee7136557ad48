use super::expr::{Generator, LengthBound, StringFormat};
use crate::config::GenerationOptions;
use crate::spec::{AdditionalProperties, SchemaNode, SchemaType};

const DATE_FORMATS: [&str; 3] = ["date-time", "date", "time"];
const EMAIL_FORMATS: [&str; 2] = ["idn-email", "email"];
const HOSTNAME_FORMATS: [&str; 2] = ["hostname", "idn-hostname"];
const URI_FORMATS: [&str; 5] = ["uri", "uri-reference", "iri", "iri-reference", "uri-template"];
const IMAGE_KEYWORDS: [&str; 3] = ["photo", "image", "picture"];

/// Compile a schema into a value generator.
///
/// Rules are tried in order and the first match wins:
///
/// 1. no schema → `null`
/// 2. `example` → the example literal
/// 3. `type` list → pick among one generator per listed type
/// 4. reference with the schema registry enabled → registry delegation
/// 5. `enum` → pick among the literals
/// 6. `allOf` → compile the deep merge of the sub-schemas
/// 7. `oneOf` / `anyOf` → pick among the sub-schema generators
/// 8. dispatch on `type`; unknown or missing types give `null`
///
/// `key` is the name of the enclosing object property, used to pick string formats.
/// It is passed through rules that describe the same value (3, 6, 7) and dropped for
/// array items and `additionalProperties` values.
pub fn schema_to_generator(
    schema: Option<&SchemaNode>,
    options: &GenerationOptions,
    key: Option<&str>,
) -> Generator {
    let Some(schema) = schema else {
        return Generator::Null;
    };

    if let Some(example) = &schema.example {
        return Generator::Literal(example.clone());
    }

    if let Some(SchemaType::Multiple(types)) = &schema.schema_type {
        if types.is_empty() {
            return Generator::Null;
        }
        return Generator::OneOf(
            types
                .iter()
                .map(|ty| {
                    let single = SchemaNode {
                        schema_type: Some(SchemaType::Single(ty.clone())),
                        ..schema.clone()
                    };
                    schema_to_generator(Some(&single), options, key)
                })
                .collect(),
        );
    }

    if options.registry_enabled() {
        if let Some(name) = schema.reference_name() {
            return Generator::Registry(name.to_string());
        }
    }

    if let Some(values) = &schema.enum_values {
        if values.is_empty() {
            return Generator::Null;
        }
        return Generator::Enum(values.clone());
    }

    if let Some(all_of) = &schema.all_of {
        let merged = all_of
            .iter()
            .fold(SchemaNode::default(), |acc, sub| acc.merged(sub));
        return schema_to_generator(Some(&merged), options, key);
    }

    if let Some(alternatives) = schema.one_of.as_ref().or(schema.any_of.as_ref()) {
        if alternatives.is_empty() {
            return Generator::Null;
        }
        return Generator::OneOf(
            alternatives
                .iter()
                .map(|sub| schema_to_generator(Some(sub), options, key))
                .collect(),
        );
    }

    let ty = match &schema.schema_type {
        Some(SchemaType::Single(ty)) => ty.as_str(),
        _ => return Generator::Null,
    };
    match ty {
        "string" => Generator::Text(string_format(schema.format.as_deref(), key)),
        "number" | "integer" => Generator::Integer {
            min: schema.minimum,
            max: schema.maximum,
        },
        "boolean" => Generator::Boolean,
        "object" => object_generator(schema, options),
        "array" => Generator::Array {
            min: schema.min_length.unwrap_or(1),
            max: match schema.max_length {
                Some(n) => LengthBound::Declared(n),
                None => LengthBound::Configured(options.max_array_length),
            },
            items: Box::new(schema_to_generator(schema.items.as_deref(), options, None)),
        },
        _ => Generator::Null,
    }
}

fn object_generator(schema: &SchemaNode, options: &GenerationOptions) -> Generator {
    if schema.properties.is_none() {
        if let Some(AdditionalProperties::Schema(values)) = &schema.additional_properties {
            return Generator::Record(Box::new(schema_to_generator(Some(values), options, None)));
        }
    }
    Generator::Object(
        schema
            .properties
            .iter()
            .flatten()
            .map(|(name, prop)| (name.clone(), schema_to_generator(Some(prop), options, Some(name))))
            .collect(),
    )
}

/// Timestamp-like keys: `created_at`, or camelCase `createdAt`.
fn is_timestamp_key(key: &str) -> bool {
    if key.to_lowercase().ends_with("_at") {
        return true;
    }
    let Some(prefix) = key.strip_suffix("At") else {
        return false;
    };
    prefix
        .chars()
        .last()
        .is_some_and(|c| c.is_lowercase() || c.is_ascii_digit())
}

/// Pick the string kind for a `format` and property key.
///
/// See <https://json-schema.org/understanding-json-schema/reference/string.html#built-in-formats>.
pub fn string_format(format: Option<&str>, key: Option<&str>) -> StringFormat {
    let format = format.unwrap_or_default();
    let key = key.unwrap_or_default();
    let lower_key = key.to_lowercase();

    if DATE_FORMATS.contains(&format) || is_timestamp_key(key) {
        StringFormat::PastDate
    } else if format == "uuid" {
        StringFormat::Uuid
    } else if EMAIL_FORMATS.contains(&format) || lower_key.ends_with("email") {
        StringFormat::Email
    } else if HOSTNAME_FORMATS.contains(&format) {
        StringFormat::DomainName
    } else if format == "ipv4" {
        StringFormat::Ipv4
    } else if format == "ipv6" {
        StringFormat::Ipv6
    } else if URI_FORMATS.contains(&format) || lower_key.ends_with("url") {
        if IMAGE_KEYWORDS.iter().any(|kw| lower_key.contains(kw)) {
            StringFormat::ImageUrl
        } else {
            StringFormat::Url
        }
    } else if lower_key.ends_with("name") {
        StringFormat::FullName
    } else {
        StringFormat::Slug
    }
}

/// Compile a schema straight to its JavaScript expression.
pub fn transform_schema(schema: Option<&SchemaNode>, options: &GenerationOptions) -> String {
    schema_to_generator(schema, options, None).to_expression()
}

use serde_json::Value;
use std::fmt;

/// Number of entries in a map generated from `additionalProperties`.
pub const RECORD_ENTRIES: usize = 5;

/// Identifier of the module-level array length bound in the generated file.
pub const MAX_ARRAY_LENGTH_IDENT: &str = "MAX_ARRAY_LENGTH";

/// String value kinds, one per row of the format dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringFormat {
    PastDate,
    Uuid,
    Email,
    DomainName,
    Ipv4,
    Ipv6,
    ImageUrl,
    Url,
    FullName,
    Slug,
}

impl StringFormat {
    /// The faker call producing this kind of string.
    pub fn faker_call(self) -> &'static str {
        match self {
            StringFormat::PastDate => "faker.date.past()",
            StringFormat::Uuid => "faker.string.uuid()",
            StringFormat::Email => "faker.internet.email()",
            StringFormat::DomainName => "faker.internet.domainName()",
            StringFormat::Ipv4 => "faker.internet.ipv4()",
            StringFormat::Ipv6 => "faker.internet.ipv6()",
            StringFormat::ImageUrl => "faker.image.url()",
            StringFormat::Url => "faker.internet.url()",
            StringFormat::FullName => "faker.person.fullName()",
            StringFormat::Slug => "faker.lorem.slug(1)",
        }
    }
}

/// Upper bound of a generated array's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    /// Taken from the schema's `maxLength`.
    Declared(u64),
    /// Falls back to the configured `maxArrayLength`, emitted as `MAX_ARRAY_LENGTH`.
    Configured(u64),
}

impl LengthBound {
    pub fn value(self) -> u64 {
        match self {
            LengthBound::Declared(n) | LengthBound::Configured(n) => n,
        }
    }
}

/// A compiled description of how to produce a random value.
///
/// `Display` renders it as a JavaScript expression over `@faker-js/faker`; the
/// [`Sampler`](crate::sample::Sampler) evaluates it in-process.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    Null,
    /// A literal reproduced verbatim (schema `example`).
    Literal(Value),
    /// Uniform pick among alternatives (type lists, `oneOf`, `anyOf`).
    OneOf(Vec<Generator>),
    /// Delegation to the external schema registry by component name.
    Registry(String),
    /// Uniform pick among literal `enum` values.
    Enum(Vec<Value>),
    Text(StringFormat),
    Integer { min: Option<f64>, max: Option<f64> },
    Boolean,
    /// Map of [`RECORD_ENTRIES`] random word keys to generated values.
    Record(Box<Generator>),
    /// Object literal, properties in declaration order.
    Object(Vec<(String, Generator)>),
    Array {
        min: u64,
        max: LengthBound,
        items: Box<Generator>,
    },
}

impl Generator {
    pub fn is_null(&self) -> bool {
        matches!(self, Generator::Null)
    }

    /// Render as a JavaScript expression.
    pub fn to_expression(&self) -> String {
        self.to_string()
    }
}

fn json_text(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() {
        write!(f, "{n}")
    } else {
        f.write_str("undefined")
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Null => f.write_str("null"),
            Generator::Literal(value) => f.write_str(&json_text(value)),
            Generator::OneOf(options) => {
                f.write_str("faker.helpers.arrayElement([")?;
                for (idx, option) in options.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{option}")?;
                }
                f.write_str("])")
            }
            Generator::Registry(name) => write!(f, "generateMock(schemas.{name})"),
            Generator::Enum(values) => {
                let list = Value::Array(values.clone());
                write!(f, "faker.helpers.arrayElement({})", json_text(&list))
            }
            Generator::Text(format) => f.write_str(format.faker_call()),
            Generator::Integer { min, max } => match (min, max) {
                (None, None) => f.write_str("faker.number.int()"),
                (Some(lo), None) => {
                    f.write_str("faker.number.int({ min: ")?;
                    write_number(f, *lo)?;
                    f.write_str(" })")
                }
                (None, Some(hi)) => {
                    f.write_str("faker.number.int({ max: ")?;
                    write_number(f, *hi)?;
                    f.write_str(" })")
                }
                (Some(lo), Some(hi)) => {
                    f.write_str("faker.number.int({ min: ")?;
                    write_number(f, *lo)?;
                    f.write_str(", max: ")?;
                    write_number(f, *hi)?;
                    f.write_str(" })")
                }
            },
            Generator::Boolean => f.write_str("faker.datatype.boolean()"),
            Generator::Record(value) => write!(
                f,
                "Object.fromEntries(faker.helpers.uniqueArray(() => faker.lorem.word(), {RECORD_ENTRIES}).map(key => [key, {value}]))"
            ),
            Generator::Object(props) => {
                if props.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (idx, (name, value)) in props.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {value}", json_text(&Value::String(name.clone())))?;
                }
                f.write_str(" }")
            }
            Generator::Array { min, max, items } => {
                let max = match max {
                    LengthBound::Declared(n) => n.to_string(),
                    LengthBound::Configured(_) => MAX_ARRAY_LENGTH_IDENT.to_string(),
                };
                write!(
                    f,
                    "[...new Array(faker.number.int({{ min: {min}, max: {max} }})).keys()].map(_ => ({items}))"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_scalars() {
        assert_eq!(Generator::Null.to_expression(), "null");
        assert_eq!(Generator::Boolean.to_expression(), "faker.datatype.boolean()");
        assert_eq!(
            Generator::Text(StringFormat::Slug).to_expression(),
            "faker.lorem.slug(1)"
        );
        assert_eq!(
            Generator::Literal(json!({"id": 1, "tags": ["a"]})).to_expression(),
            r#"{"id":1,"tags":["a"]}"#
        );
    }

    #[test]
    fn test_render_integer_bounds() {
        let both = Generator::Integer { min: Some(2.0), max: Some(2.0) };
        assert_eq!(both.to_expression(), "faker.number.int({ min: 2, max: 2 })");
        let upper = Generator::Integer { min: None, max: Some(9.5) };
        assert_eq!(upper.to_expression(), "faker.number.int({ max: 9.5 })");
        let none = Generator::Integer { min: None, max: None };
        assert_eq!(none.to_expression(), "faker.number.int()");
    }

    #[test]
    fn test_render_enum_keeps_order_and_types() {
        let gen = Generator::Enum(vec![json!("b"), json!(1), json!(null)]);
        assert_eq!(gen.to_expression(), r#"faker.helpers.arrayElement(["b",1,null])"#);
    }

    #[test]
    fn test_render_object_quotes_keys() {
        let gen = Generator::Object(vec![
            ("id".into(), Generator::Integer { min: None, max: None }),
            ("x-\"y\"".into(), Generator::Null),
        ]);
        assert_eq!(
            gen.to_expression(),
            r#"{ "id": faker.number.int(), "x-\"y\"": null }"#
        );
        assert_eq!(Generator::Object(vec![]).to_expression(), "{}");
    }

    #[test]
    fn test_render_array_bounds() {
        let configured = Generator::Array {
            min: 1,
            max: LengthBound::Configured(20),
            items: Box::new(Generator::Boolean),
        };
        assert_eq!(
            configured.to_expression(),
            "[...new Array(faker.number.int({ min: 1, max: MAX_ARRAY_LENGTH })).keys()].map(_ => (faker.datatype.boolean()))"
        );
        let declared = Generator::Array {
            min: 3,
            max: LengthBound::Declared(3),
            items: Box::new(Generator::Null),
        };
        assert!(declared.to_expression().contains("{ min: 3, max: 3 }"));
    }

    #[test]
    fn test_render_record_and_registry() {
        let record = Generator::Record(Box::new(Generator::Boolean));
        assert_eq!(
            record.to_expression(),
            "Object.fromEntries(faker.helpers.uniqueArray(() => faker.lorem.word(), 5).map(key => [key, faker.datatype.boolean()]))"
        );
        assert_eq!(
            Generator::Registry("Pet".into()).to_expression(),
            "generateMock(schemas.Pet)"
        );
    }

    #[test]
    fn test_render_one_of() {
        let gen = Generator::OneOf(vec![Generator::Boolean, Generator::Null]);
        assert_eq!(
            gen.to_expression(),
            "faker.helpers.arrayElement([faker.datatype.boolean(), null])"
        );
    }
}

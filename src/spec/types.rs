use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// The `type` keyword: a single type name or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<SchemaNode>),
}

/// A JSON-Schema-like description of a response body.
///
/// Only the keywords the mock compiler understands are kept; everything else in the
/// source document (`required`, `description`, `nullable`, ...) is ignored on
/// deserialization. `minLength`/`maxLength` double as array length bounds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub format: Option<String>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    pub example: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub properties: Option<IndexMap<String, SchemaNode>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub items: Option<Box<SchemaNode>>,
    pub all_of: Option<Vec<SchemaNode>>,
    pub one_of: Option<Vec<SchemaNode>>,
    pub any_of: Option<Vec<SchemaNode>>,
    /// Unresolved reference pointer, e.g. `#/components/schemas/Pet`.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Component name recorded when a reference was expanded in place.
    #[serde(rename = "x-ref-name")]
    pub ref_name: Option<String>,
}

impl SchemaNode {
    pub fn of_type(ty: &str) -> Self {
        SchemaNode {
            schema_type: Some(SchemaType::Single(ty.to_string())),
            ..Default::default()
        }
    }

    /// Name of the component this node points at, if any.
    ///
    /// An unresolved `$ref` wins over an expansion marker; the name is the last `/`
    /// segment of the pointer.
    pub fn reference_name(&self) -> Option<&str> {
        if let Some(pointer) = self.reference.as_deref() {
            return pointer.rsplit('/').next().filter(|name| !name.is_empty());
        }
        self.ref_name.as_deref()
    }

    /// Deep-merge `other` on top of `self`, returning a new node.
    ///
    /// Keys present in `other` win. Nested schemas and object literals merge recursively;
    /// lists merge index by index, with `other`'s entries overriding.
    pub fn merged(&self, other: &SchemaNode) -> SchemaNode {
        SchemaNode {
            schema_type: merge_type(&self.schema_type, &other.schema_type),
            format: other.format.clone().or_else(|| self.format.clone()),
            enum_values: merge_list(&self.enum_values, &other.enum_values, merge_values),
            example: match (&self.example, &other.example) {
                (Some(base), Some(top)) => Some(merge_values(base, top)),
                (base, top) => top.clone().or_else(|| base.clone()),
            },
            minimum: other.minimum.or(self.minimum),
            maximum: other.maximum.or(self.maximum),
            min_length: other.min_length.or(self.min_length),
            max_length: other.max_length.or(self.max_length),
            properties: match (&self.properties, &other.properties) {
                (Some(base), Some(top)) => {
                    let mut out = base.clone();
                    for (name, schema) in top {
                        let merged = match out.get(name) {
                            Some(existing) => existing.merged(schema),
                            None => schema.clone(),
                        };
                        out.insert(name.clone(), merged);
                    }
                    Some(out)
                }
                (base, top) => top.clone().or_else(|| base.clone()),
            },
            additional_properties: match (&self.additional_properties, &other.additional_properties) {
                (Some(AdditionalProperties::Schema(base)), Some(AdditionalProperties::Schema(top))) => {
                    Some(AdditionalProperties::Schema(Box::new(base.merged(top))))
                }
                (base, top) => top.clone().or_else(|| base.clone()),
            },
            items: match (&self.items, &other.items) {
                (Some(base), Some(top)) => Some(Box::new(base.merged(top))),
                (base, top) => top.clone().or_else(|| base.clone()),
            },
            all_of: merge_list(&self.all_of, &other.all_of, SchemaNode::merged),
            one_of: merge_list(&self.one_of, &other.one_of, SchemaNode::merged),
            any_of: merge_list(&self.any_of, &other.any_of, SchemaNode::merged),
            reference: other.reference.clone().or_else(|| self.reference.clone()),
            ref_name: other.ref_name.clone().or_else(|| self.ref_name.clone()),
        }
    }
}

fn merge_type(base: &Option<SchemaType>, top: &Option<SchemaType>) -> Option<SchemaType> {
    match (base, top) {
        (Some(SchemaType::Multiple(base)), Some(SchemaType::Multiple(top))) => {
            let mut out = base.clone();
            for (idx, ty) in top.iter().enumerate() {
                match out.get_mut(idx) {
                    Some(slot) => *slot = ty.clone(),
                    None => out.push(ty.clone()),
                }
            }
            Some(SchemaType::Multiple(out))
        }
        (base, top) => top.clone().or_else(|| base.clone()),
    }
}

fn merge_list<T: Clone>(
    base: &Option<Vec<T>>,
    top: &Option<Vec<T>>,
    merge: impl Fn(&T, &T) -> T,
) -> Option<Vec<T>> {
    match (base, top) {
        (Some(base), Some(top)) => {
            let mut out = base.clone();
            for (idx, item) in top.iter().enumerate() {
                match out.get_mut(idx) {
                    Some(slot) => {
                        let merged = merge(slot, item);
                        *slot = merged;
                    }
                    None => out.push(item.clone()),
                }
            }
            Some(out)
        }
        (base, top) => top.clone().or_else(|| base.clone()),
    }
}

/// Deep merge of two literal values, `top` winning on conflicts.
pub fn merge_values(base: &Value, top: &Value) -> Value {
    match (base, top) {
        (Value::Object(base), Value::Object(top)) => {
            let mut out = base.clone();
            for (key, value) in top {
                let merged = match out.get(key) {
                    Some(existing) => merge_values(existing, value),
                    None => value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }
        (Value::Array(base), Value::Array(top)) => {
            let mut out = base.clone();
            for (idx, value) in top.iter().enumerate() {
                match out.get_mut(idx) {
                    Some(slot) => {
                        let merged = merge_values(slot, value);
                        *slot = merged;
                    }
                    None => out.push(value.clone()),
                }
            }
            Value::Array(out)
        }
        (_, top) => top.clone(),
    }
}

/// One documented response of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    /// Status code as written in the document (`"200"`, `"404"`).
    pub code: String,
    /// Stable identifier of the owning operation (its `operationId`).
    pub id: Option<String>,
    /// Body schema per media type.
    pub content: IndexMap<String, SchemaNode>,
}

impl ResponseEntry {
    pub fn status(&self) -> Option<u16> {
        self.code.trim().parse().ok()
    }

    /// The `application/json` body schema; other media types are not mocked.
    pub fn json_schema(&self) -> Option<&SchemaNode> {
        self.content.get("application/json")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub verb: Method,
    /// Route template in msw syntax (`/pets/:petId`).
    pub path: String,
    /// Responses in declaration order; this is the rotation order.
    pub responses: Vec<ResponseEntry>,
}

pub type OperationCollection = Vec<Operation>;

use super::expr::Generator;
use super::schema::schema_to_generator;
use crate::config::GenerationOptions;
use crate::rotation::RotationState;
use crate::spec::{Operation, ResponseEntry};
use http::Method;
use std::collections::HashSet;

/// Status code whose responses never carry a body.
pub const NO_CONTENT: u16 = 204;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
}

fn classify(c: char) -> Option<CharClass> {
    if c.is_ascii_digit() {
        Some(CharClass::Digit)
    } else if c.is_uppercase() {
        Some(CharClass::Upper)
    } else if c.is_alphabetic() {
        Some(CharClass::Lower)
    } else {
        None
    }
}

/// Split text into words: runs of letters or digits, broken at lower→upper
/// transitions, before the last capital of an acronym followed by lowercase
/// (`XMLHttp` → `XML`, `Http`), and between letters and digits.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in input.split(|c: char| classify(c).is_none()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        for idx in 1..chars.len() {
            let (Some(prev), Some(cur)) = (classify(chars[idx - 1]), classify(chars[idx])) else {
                continue;
            };
            let next = chars.get(idx + 1).and_then(|c| classify(*c));
            let boundary = match (prev, cur) {
                (CharClass::Lower, CharClass::Upper) => true,
                (CharClass::Digit, CharClass::Upper | CharClass::Lower) => true,
                (CharClass::Upper | CharClass::Lower, CharClass::Digit) => true,
                (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
                _ => false,
            };
            if boundary {
                words.push(chars[start..idx].iter().collect());
                start = idx;
            }
        }
        if start < chars.len() {
            words.push(chars[start..].iter().collect());
        }
    }
    words
}

/// camelCase conversion: first word lower-cased, later words capitalized.
///
/// ```
/// use mockgen::generator::camel_case;
///
/// assert_eq!(camel_case("get listPets200Response"), "getListPets200Response");
/// assert_eq!(camel_case("get XMLHttp_request"), "getXmlHttpRequest");
/// ```
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (idx, word) in split_words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if idx == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Accessor function name for a response, `None` when the operation has no id.
pub fn response_identifier(response: &ResponseEntry) -> Option<String> {
    let id = response.id.as_deref()?;
    let name = camel_case(&format!("get {id}{}Response", response.code));
    (!name.is_empty()).then_some(name)
}

/// One entry of a handler's response rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    /// Accessor producing the body; `None` serves `null`.
    pub accessor: Option<String>,
}

impl MockResponse {
    pub fn has_body(&self) -> bool {
        self.status != NO_CONTENT
    }

    fn to_expression(&self) -> String {
        if !self.has_body() {
            return format!("[ctx.status({})]", self.status);
        }
        let body = match &self.accessor {
            Some(name) => format!("{name}()"),
            None => "null".to_string(),
        };
        format!("[ctx.status({}), ctx.json({body})]", self.status)
    }
}

/// A mock handler for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerDef {
    pub verb: Method,
    /// Route in msw syntax (`/pets/:petId`).
    pub path: String,
    /// Responses in rotation order.
    pub responses: Vec<MockResponse>,
}

impl HandlerDef {
    /// Whether a request with `method` on `pathname` would reach this handler.
    ///
    /// `:name` segments match any non-empty segment.
    pub fn matches(&self, method: &Method, pathname: &str) -> bool {
        if *method != self.verb {
            return false;
        }
        let route: Vec<&str> = self.path.trim_end_matches('/').split('/').collect();
        let actual: Vec<&str> = pathname.trim_end_matches('/').split('/').collect();
        route.len() == actual.len()
            && route.iter().zip(&actual).all(|(expected, segment)| {
                if expected.starts_with(':') {
                    !segment.is_empty()
                } else {
                    expected == segment
                }
            })
    }

    /// Select the response for one request, advancing the rotation for `pathname`.
    pub fn respond<'a>(&'a self, pathname: &str, state: &mut RotationState) -> Option<&'a MockResponse> {
        if self.responses.is_empty() {
            return None;
        }
        let turn = state.next(pathname);
        self.responses.get(turn % self.responses.len())
    }

    /// Render the `rest.<verb>(...)` handler expression.
    pub fn to_handler_code(&self) -> String {
        let results = self
            .responses
            .iter()
            .map(MockResponse::to_expression)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "rest.{verb}(`{path}`, (req, res, ctx) => {{\n      const resultArray = [{results}];\n      return res(...resultArray[context.next(req.url.pathname) % resultArray.length]);\n    }}),",
            verb = self.verb.as_str().to_lowercase(),
            path = escape_template_literal(&self.path),
        )
    }
}

fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// A named function returning the generated body of one response.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorDef {
    pub name: String,
    pub body: Generator,
}

impl AccessorDef {
    pub fn to_code(&self) -> String {
        format!("export function {}() {{ return {} }};\n", self.name, self.body)
    }
}

/// Handlers and accessors for a whole operation collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledOperations {
    pub handlers: Vec<HandlerDef>,
    pub accessors: Vec<AccessorDef>,
}

impl CompiledOperations {
    pub fn accessor(&self, name: &str) -> Option<&AccessorDef> {
        self.accessors.iter().find(|acc| acc.name == name)
    }

    /// Handler fragment: one block per operation, in order.
    pub fn handler_code(&self) -> String {
        self.handlers
            .iter()
            .map(HandlerDef::to_handler_code)
            .collect::<Vec<_>>()
            .join("\n    ")
    }

    /// Accessor fragment: one function per identified response, in order.
    pub fn accessor_code(&self) -> String {
        self.accessors
            .iter()
            .map(AccessorDef::to_code)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compile every operation into a handler and its response accessors.
///
/// Accessor names that collide keep the first definition; later responses with the
/// same name reuse it.
pub fn compile_operations(operations: &[Operation], options: &GenerationOptions) -> CompiledOperations {
    let mut compiled = CompiledOperations::default();
    let mut seen = HashSet::new();

    for op in operations {
        let mut responses = Vec::with_capacity(op.responses.len());
        for response in &op.responses {
            let Some(status) = response.status() else {
                continue;
            };
            let accessor = response_identifier(response);
            if let Some(name) = &accessor {
                if seen.insert(name.clone()) {
                    compiled.accessors.push(AccessorDef {
                        name: name.clone(),
                        body: schema_to_generator(response.json_schema(), options, None),
                    });
                } else {
                    tracing::warn!(accessor = %name, path = %op.path, "duplicate accessor name, keeping the first");
                }
            }
            responses.push(MockResponse { status, accessor });
        }
        tracing::debug!(
            verb = %op.verb,
            path = %op.path,
            responses = responses.len(),
            "compiled operation"
        );
        compiled.handlers.push(HandlerDef {
            verb: op.verb.clone(),
            path: op.path.clone(),
            responses,
        });
    }
    compiled
}

/// Handler fragment for the mock module.
pub fn transform_to_handler_code(operations: &[Operation], options: &GenerationOptions) -> String {
    compile_operations(operations, options).handler_code()
}

/// Accessor fragment for the mock module.
pub fn transform_to_res_object(operations: &[Operation], options: &GenerationOptions) -> String {
    compile_operations(operations, options).accessor_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SchemaNode;
    use indexmap::IndexMap;

    fn response(code: &str, id: Option<&str>, schema: Option<SchemaNode>) -> ResponseEntry {
        let mut content = IndexMap::new();
        if let Some(schema) = schema {
            content.insert("application/json".to_string(), schema);
        }
        ResponseEntry {
            code: code.into(),
            id: id.map(str::to_owned),
            content,
        }
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("get listPets200Response"), vec!["get", "list", "Pets", "200", "Response"]);
        assert_eq!(split_words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert_eq!(split_words("__foo--bar__"), vec!["foo", "bar"]);
        assert_eq!(split_words("v2api"), vec!["v", "2", "api"]);
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("get list_pets200Response"), "getListPets200Response");
        assert_eq!(camel_case("get GetUserByID404Response"), "getGetUserById404Response");
        assert_eq!(camel_case("Foo Bar"), "fooBar");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_response_identifier() {
        assert_eq!(
            response_identifier(&response("200", Some("showPetById"), None)),
            Some("getShowPetById200Response".to_string())
        );
        assert_eq!(response_identifier(&response("200", None, None)), None);
    }

    #[test]
    fn test_no_content_has_no_body() {
        let resp = MockResponse { status: 204, accessor: Some("getX204Response".into()) };
        assert!(!resp.has_body());
        assert_eq!(resp.to_expression(), "[ctx.status(204)]");
        let missing = MockResponse { status: 500, accessor: None };
        assert_eq!(missing.to_expression(), "[ctx.status(500), ctx.json(null)]");
    }

    #[test]
    fn test_handler_code() {
        let op = Operation {
            verb: Method::DELETE,
            path: "/pets/:petId".into(),
            responses: vec![
                response("204", Some("deletePet"), None),
                response("404", Some("deletePet"), Some(SchemaNode::of_type("object"))),
            ],
        };
        let code = transform_to_handler_code(&[op], &GenerationOptions::default());
        assert!(code.starts_with("rest.delete(`/pets/:petId`, (req, res, ctx) => {"));
        assert!(code.contains(
            "const resultArray = [[ctx.status(204)], [ctx.status(404), ctx.json(getDeletePet404Response())]];"
        ));
        assert!(code.contains("resultArray[context.next(req.url.pathname) % resultArray.length]"));
        assert!(code.ends_with("}),"));
    }

    #[test]
    fn test_template_literal_escaping() {
        assert_eq!(escape_template_literal("/a`b/${x}"), "/a\\`b/\\${x}");
    }

    #[test]
    fn test_accessors_skip_unidentified_and_duplicates() {
        let ops = vec![
            Operation {
                verb: Method::GET,
                path: "/a".into(),
                responses: vec![
                    response("200", Some("list"), Some(SchemaNode::of_type("boolean"))),
                    response("500", None, Some(SchemaNode::of_type("boolean"))),
                ],
            },
            Operation {
                verb: Method::POST,
                path: "/b".into(),
                responses: vec![response("200", Some("list"), None)],
            },
        ];
        let compiled = compile_operations(&ops, &GenerationOptions::default());
        assert_eq!(compiled.accessors.len(), 1);
        assert_eq!(compiled.accessors[0].body, Generator::Boolean);
        assert_eq!(
            compiled.accessor_code(),
            "export function getList200Response() { return faker.datatype.boolean() };\n"
        );
        assert_eq!(compiled.handlers[1].responses[0].accessor.as_deref(), Some("getList200Response"));
    }

    #[test]
    fn test_matches_route() {
        let handler = HandlerDef {
            verb: Method::GET,
            path: "/pets/:petId".into(),
            responses: vec![],
        };
        assert!(handler.matches(&Method::GET, "/pets/42"));
        assert!(handler.matches(&Method::GET, "/pets/42/"));
        assert!(!handler.matches(&Method::POST, "/pets/42"));
        assert!(!handler.matches(&Method::GET, "/pets"));
        assert!(!handler.matches(&Method::GET, "/pets//"));
    }

    #[test]
    fn test_respond_rotates() {
        let handler = HandlerDef {
            verb: Method::GET,
            path: "/x".into(),
            responses: vec![
                MockResponse { status: 200, accessor: None },
                MockResponse { status: 404, accessor: None },
            ],
        };
        let mut state = RotationState::new();
        let statuses: Vec<u16> = (0..5)
            .filter_map(|_| handler.respond("/x", &mut state).map(|r| r.status))
            .collect();
        assert_eq!(statuses, vec![200, 404, 200, 404, 200]);
    }
}

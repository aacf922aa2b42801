//! Fixed catalog of the six BDL query tools
//!
//! The catalog is const data: each [`ToolSpec`] carries the MCP-facing
//! schema (name, bilingual description, parameter kinds) and the dispatch
//! metadata (upstream endpoint, per-parameter query key renames, the
//! optional path parameter). Defined once, read-only for the process
//! lifetime.

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Primitive kind of a tool parameter, mirrored into the JSON Schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    IntegerArray,
}

/// One accepted parameter of a tool.
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Fixed enumeration of legal values, when the upstream API defines one.
    pub allowed: Option<&'static [&'static str]>,
    /// Upstream query key when it differs from the tool argument name
    /// (BDL uses kebab-case where MCP arguments use snake_case).
    pub query_key: Option<&'static str>,
}

/// One entry in the tool catalog.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Upstream path, with at most one `{param}` placeholder.
    pub endpoint: &'static str,
    pub params: &'static [ParamSpec],
    pub required: &'static [&'static str],
    /// Parameter substituted into the endpoint path instead of the query.
    pub path_param: Option<&'static str>,
}

/// Ephemeral outbound request shape: upstream path plus renamed,
/// serialized query pairs. Built fresh per call, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub path: String,
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

const LANG_VALUES: &[&str] = &["pl", "en"];

const LANG: ParamSpec = ParamSpec {
    name: "lang",
    kind: ParamKind::String,
    allowed: Some(LANG_VALUES),
    query_key: None,
};

const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "get_aggregates",
        description: "Pobiera listę poziomów agregacji danych / Get list of aggregation levels",
        endpoint: "/aggregates",
        params: &[
            ParamSpec {
                name: "sort",
                kind: ParamKind::String,
                allowed: Some(&["Id", "-Id", "Name", "-Name"]),
                query_key: None,
            },
            LANG,
        ],
        required: &[],
        path_param: None,
    },
    ToolSpec {
        name: "get_subjects",
        description: "Pobiera listę tematów (kategorii danych) / Get list of subjects",
        endpoint: "/subjects",
        params: &[
            ParamSpec {
                name: "parent_id",
                kind: ParamKind::String,
                allowed: None,
                query_key: Some("parent-id"),
            },
            ParamSpec {
                name: "page",
                kind: ParamKind::Integer,
                allowed: None,
                query_key: None,
            },
            ParamSpec {
                name: "page_size",
                kind: ParamKind::Integer,
                allowed: None,
                query_key: Some("page-size"),
            },
            LANG,
        ],
        required: &[],
        path_param: None,
    },
    ToolSpec {
        name: "get_units",
        description: "Pobiera listę jednostek terytorialnych / Get list of territorial units",
        endpoint: "/units",
        params: &[
            ParamSpec {
                name: "level",
                kind: ParamKind::Integer,
                allowed: None,
                query_key: None,
            },
            ParamSpec {
                name: "parent_id",
                kind: ParamKind::String,
                allowed: None,
                query_key: Some("parent-id"),
            },
            ParamSpec {
                name: "name",
                kind: ParamKind::String,
                allowed: None,
                query_key: None,
            },
            LANG,
        ],
        required: &[],
        path_param: None,
    },
    ToolSpec {
        name: "search_units",
        description: "Wyszukuje jednostki terytorialne / Search territorial units",
        endpoint: "/units/search",
        params: &[
            ParamSpec {
                name: "name",
                kind: ParamKind::String,
                allowed: None,
                query_key: None,
            },
            ParamSpec {
                name: "level",
                kind: ParamKind::Integer,
                allowed: None,
                query_key: None,
            },
            LANG,
        ],
        required: &["name"],
        path_param: None,
    },
    ToolSpec {
        name: "get_variables",
        description: "Pobiera listę zmiennych statystycznych / Get list of variables",
        endpoint: "/variables",
        params: &[
            ParamSpec {
                name: "subject_id",
                kind: ParamKind::String,
                allowed: None,
                query_key: Some("subject-id"),
            },
            ParamSpec {
                name: "level",
                kind: ParamKind::Integer,
                allowed: None,
                query_key: None,
            },
            ParamSpec {
                name: "year",
                kind: ParamKind::IntegerArray,
                allowed: None,
                query_key: None,
            },
            LANG,
        ],
        required: &[],
        path_param: None,
    },
    ToolSpec {
        name: "get_data_by_variable",
        description: "Pobiera dane dla zmiennej / Get data for a variable",
        endpoint: "/data/by-variable/{var_id}",
        params: &[
            ParamSpec {
                name: "var_id",
                kind: ParamKind::Integer,
                allowed: None,
                query_key: None,
            },
            ParamSpec {
                name: "unit_id",
                kind: ParamKind::String,
                allowed: None,
                query_key: Some("unit-id"),
            },
            ParamSpec {
                name: "year",
                kind: ParamKind::IntegerArray,
                allowed: None,
                query_key: None,
            },
            LANG,
        ],
        required: &["var_id"],
        path_param: Some("var_id"),
    },
];

// Rendered once; the catalog never changes after startup.
static DESCRIPTORS: Lazy<Vec<Value>> =
    Lazy::new(|| TOOLS.iter().map(ToolSpec::descriptor).collect());

/// The full catalog, in its fixed wire order.
pub fn tools() -> &'static [ToolSpec] {
    TOOLS
}

/// Exact, case-sensitive lookup by tool name.
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// MCP tool descriptors (name, description, inputSchema) in catalog order.
pub fn list_descriptors() -> &'static [Value] {
    &DESCRIPTORS
}

impl ParamSpec {
    fn schema(&self) -> Value {
        let mut schema = match self.kind {
            ParamKind::String => json!({ "type": "string" }),
            ParamKind::Integer => json!({ "type": "integer" }),
            ParamKind::IntegerArray => json!({
                "type": "array",
                "items": { "type": "integer" },
            }),
        };
        if let Some(allowed) = self.allowed {
            schema["enum"] = json!(allowed);
        }
        schema
    }
}

impl ToolSpec {
    /// MCP-facing descriptor: name, description, inputSchema.
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            properties.insert(param.name.to_string(), param.schema());
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }
        schema
    }

    /// Translate tool arguments into the outbound path and query pairs.
    ///
    /// Required parameters are validated before renaming. Only declared
    /// parameters are forwarded; unknown argument keys are dropped. Absent
    /// optionals are omitted entirely. Array values expand into repeated
    /// query keys. The path parameter, when the tool has one, is
    /// substituted into the endpoint instead of the query.
    pub fn upstream_query(&self, args: &Map<String, Value>) -> Result<UpstreamQuery, TranslateError> {
        for name in self.required {
            match args.get(*name) {
                Some(value) if !value.is_null() => {}
                _ => return Err(TranslateError::MissingParameter(name)),
            }
        }

        let mut path = self.endpoint.to_string();
        let mut params = Vec::new();

        for param in self.params {
            let Some(value) = args.get(param.name) else {
                continue;
            };

            if self.path_param == Some(param.name) {
                path = path.replace(&format!("{{{}}}", param.name), &scalar_text(value));
                continue;
            }

            let key = param.query_key.unwrap_or(param.name);
            match value {
                Value::Array(items) => {
                    for item in items {
                        params.push((key.to_string(), scalar_text(item)));
                    }
                }
                other => params.push((key.to_string(), scalar_text(other))),
            }
        }

        Ok(UpstreamQuery { path, params })
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

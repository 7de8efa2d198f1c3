use crate::Context;
use crate::JsonMap;
use crate::document::QueryDocument;
use crate::request::RequestKey;
use crate::request::RequestValidationError;
use serde_json::Value;

type Result<T> = std::result::Result<T, RequestValidationError>;

/// A GraphQL request as submitted by a caller, before it becomes an
/// [`Operation`](crate::operation::Operation).
#[derive(Clone, Debug)]
pub struct GraphQLRequest {
    pub context: Context,
    pub extensions: JsonMap,
    pub operation_name: Option<String>,
    pub query: QueryDocument,
    pub variables: JsonMap,
}
impl GraphQLRequest {
    pub fn new(query: QueryDocument) -> Self {
        Self {
            context: Context::default(),
            extensions: JsonMap::new(),
            operation_name: None,
            query,
            variables: JsonMap::new(),
        }
    }

    /// Validate and decode a raw request object. Only the keys named by
    /// [`RequestKey`] are accepted.
    pub fn from_json(raw: &Value) -> Result<Self> {
        let Value::Object(fields) = raw else {
            return Err(RequestValidationError::NotAnObject);
        };

        for key in fields.keys() {
            if RequestKey::from_key(key).is_none() {
                return Err(RequestValidationError::IllegalKey {
                    key: key.to_string(),
                });
            }
        }

        let query = match fields.get(RequestKey::Query.as_str()) {
            Some(Value::String(source)) => QueryDocument::parse(source)?,
            Some(Value::Null) | None => return Err(RequestValidationError::MissingQuery),
            Some(_) => return Err(RequestValidationError::InvalidFieldType {
                key: RequestKey::Query,
                expected: "a string",
            }),
        };

        let operation_name = match fields.get(RequestKey::OperationName.as_str()) {
            Some(Value::String(name)) => Some(name.to_string()),
            Some(Value::Null) | None => None,
            Some(_) => return Err(RequestValidationError::InvalidFieldType {
                key: RequestKey::OperationName,
                expected: "a string",
            }),
        };

        Ok(Self {
            context: object_field(fields, RequestKey::Context)?.into(),
            extensions: object_field(fields, RequestKey::Extensions)?,
            operation_name,
            query,
            variables: object_field(fields, RequestKey::Variables)?,
        })
    }

    pub fn with_context(mut self, context: impl Into<Context>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_extensions(mut self, extensions: JsonMap) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables(mut self, variables: JsonMap) -> Self {
        self.variables = variables;
        self
    }
}
impl From<QueryDocument> for GraphQLRequest {
    fn from(query: QueryDocument) -> Self {
        Self::new(query)
    }
}

fn object_field(fields: &JsonMap, key: RequestKey) -> Result<JsonMap> {
    match fields.get(key.as_str()) {
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(Value::Null) | None => Ok(JsonMap::new()),
        Some(_) => Err(RequestValidationError::InvalidFieldType {
            key,
            expected: "an object",
        }),
    }
}

mod client_fields;
mod document_parse_error;
mod operation_kind;
mod query_document;
mod selection_walk;
mod value_conversion;

#[cfg(test)]
mod tests;

pub(crate) use client_fields::ClientRootField;
pub use document_parse_error::DocumentParseError;
pub use operation_kind::OperationKind;
pub use query_document::Ast;
pub use query_document::QueryDocument;
pub(crate) use query_document::QueryDocumentData;
pub(crate) use selection_walk::FragmentDef;
pub(crate) use selection_walk::Selections;
pub(crate) use value_conversion::graphql_value_to_json;

use crate::document::QueryDocument;
use crate::document::query_document;
use crate::document::selection_walk;
use crate::document::selection_walk::Selections;
use graphql_parser::query::Definition;
use graphql_parser::query::Selection;
use graphql_parser::query::Value;

const CLIENT_DIRECTIVE: &str = "client";

/// A root field of an operation that is marked `@client` and must be
/// resolved locally rather than by the server.
#[derive(Clone, Debug)]
pub(crate) struct ClientRootField {
    pub(crate) arguments: Vec<(String, Value<'static, String>)>,
    pub(crate) field_name: String,
    pub(crate) response_key: String,
    pub(crate) selection_set: Selections,
}

fn is_client_field(selection: &Selection<'static, String>) -> bool {
    matches!(
        selection,
        Selection::Field(field)
            if selection_walk::has_directive(&field.directives, CLIENT_DIRECTIVE)
    )
}

impl QueryDocument {
    /// The `@client` root fields of the selected operation, in selection
    /// order.
    pub(crate) fn client_root_fields(
        &self,
        operation_name: Option<&str>,
    ) -> Vec<ClientRootField> {
        let Some(op) = self.select_operation(operation_name) else {
            return vec![];
        };

        selection_walk::selection_set_of(op).items.iter().filter_map(|selection| {
            match selection {
                Selection::Field(field)
                    if selection_walk::has_directive(&field.directives, CLIENT_DIRECTIVE) =>
                    Some(ClientRootField {
                        arguments: field.arguments.clone(),
                        field_name: field.name.clone(),
                        response_key: field.alias.clone().unwrap_or_else(|| field.name.clone()),
                        selection_set: field.selection_set.clone(),
                    }),
                _ => None,
            }
        }).collect()
    }

    /// A copy of this document with every `@client` root field removed from
    /// the selected operation, along with the variable definitions and
    /// fragments that were only used by those fields.
    ///
    /// Returns `None` when nothing would be left to send to a server.
    pub(crate) fn without_client_root_fields(
        &self,
        operation_name: Option<&str>,
    ) -> Option<QueryDocument> {
        let selected = self.select_operation(operation_name)?;
        let op_index = self.ast().definitions.iter().position(|def| matches!(
            def,
            Definition::Operation(op) if std::ptr::eq(op, selected)
        ))?;

        let mut ast = self.ast().clone();
        if let Some(Definition::Operation(op)) = ast.definitions.get_mut(op_index) {
            let selection_set = selection_walk::selection_set_of_mut(op);
            selection_set.items.retain(|selection| !is_client_field(selection));
            if selection_set.items.is_empty() {
                return None;
            }
        }

        query_document::prune_unused_definitions(&mut ast, op_index);
        QueryDocument::from_ast(ast).ok()
    }
}

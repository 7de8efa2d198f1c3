use crate::document::DocumentParseError;
use crate::document::OperationKind;
use crate::document::selection_walk;
use crate::document::selection_walk::FragmentDef;
use crate::document::selection_walk::OperationDef;
use graphql_parser::query::Definition;
use graphql_parser::query::Document;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;
use std::sync::Weak;

/// The owned `graphql-parser` AST backing a [`QueryDocument`].
pub type Ast = Document<'static, String>;

pub(crate) struct QueryDocumentData {
    ast: Ast,
    printed: String,
}

/// An immutable, parsed GraphQL executable document.
///
/// Cloning a [`QueryDocument`] is cheap and preserves its *identity*: two
/// clones of the same parsed document are [`QueryDocument::ptr_eq()`], while
/// parsing the same source text twice produces two distinct documents. Links
/// that memoize per-document work (e.g. persisted query hashing) key their
/// caches on this identity.
#[derive(Clone)]
pub struct QueryDocument {
    inner: Arc<QueryDocumentData>,
}
impl QueryDocument {
    /// Parse an executable document containing at least one operation.
    pub fn parse(source: impl AsRef<str>) -> Result<Self, DocumentParseError> {
        let ast =
            graphql_parser::parse_query::<String>(source.as_ref())
                .map_err(|err| DocumentParseError::Syntax {
                    message: err.to_string(),
                })?
                .into_static();

        Self::from_ast(ast)
    }

    /// Wrap an already-parsed AST. The document is printed once here; that
    /// printed form is what gets hashed and sent over the wire.
    pub fn from_ast(ast: Ast) -> Result<Self, DocumentParseError> {
        let has_operation =
            ast.definitions
                .iter()
                .any(|def| matches!(def, Definition::Operation(_)));
        if !has_operation {
            return Err(DocumentParseError::NoOperations);
        }

        let printed = ast.to_string();
        Ok(Self {
            inner: Arc::new(QueryDocumentData { ast, printed }),
        })
    }

    pub fn ast(&self) -> &Ast {
        &self.inner.ast
    }

    /// The canonical printed form of this document.
    pub fn print(&self) -> &str {
        self.inner.printed.as_str()
    }

    /// Returns `true` if both handles refer to the same parsed document.
    pub fn ptr_eq(&self, other: &QueryDocument) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    pub(crate) fn downgrade(&self) -> Weak<QueryDocumentData> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn is_referenced_by(&self, weak: &Weak<QueryDocumentData>) -> bool {
        weak.upgrade()
            .is_some_and(|data| Arc::ptr_eq(&data, &self.inner))
    }

    pub(crate) fn operations(&self) -> impl Iterator<Item = &OperationDef> {
        self.inner.ast.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
    }

    pub(crate) fn fragments(&self) -> IndexMap<&str, &FragmentDef> {
        self.inner.ast.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(fragment) => Some((fragment.name.as_str(), fragment)),
            Definition::Operation(_) => None,
        }).collect()
    }

    /// Selects the operation named `operation_name`, falling back to the
    /// first operation in the document.
    pub(crate) fn select_operation(
        &self,
        operation_name: Option<&str>,
    ) -> Option<&OperationDef> {
        operation_name
            .filter(|name| !name.is_empty())
            .and_then(|name| self.operations().find(|op| {
                selection_walk::operation_name_of(op) == Some(name)
            }))
            .or_else(|| self.operations().next())
    }

    /// The name of the first named operation in this document, if any.
    pub fn operation_name(&self) -> Option<&str> {
        self.operations().find_map(selection_walk::operation_name_of)
    }

    /// Names of every operation in document order (`None` for anonymous
    /// operations).
    pub fn operation_names(&self) -> Vec<Option<&str>> {
        self.operations().map(selection_walk::operation_name_of).collect()
    }

    pub fn operation_kind(&self, operation_name: Option<&str>) -> Option<OperationKind> {
        self.select_operation(operation_name)
            .map(selection_walk::operation_kind_of)
    }

    /// Returns `true` if any operation in this document is a mutation.
    pub fn has_mutations(&self) -> bool {
        self.operations().any(|op| {
            selection_walk::operation_kind_of(op) == OperationKind::Mutation
        })
    }

    /// The named input type (with list and non-null wrappers removed) that
    /// `variable` is declared with on the selected operation.
    pub fn variable_type_name(
        &self,
        operation_name: Option<&str>,
        variable: &str,
    ) -> Option<&str> {
        let op = self.select_operation(operation_name)?;
        selection_walk::variable_definitions_of(op)
            .iter()
            .find(|def| def.name == variable)
            .map(|def| selection_walk::named_type_of(&def.var_type))
    }

    /// Returns `true` if the directive `name` is applied to any selection in
    /// any operation or fragment of this document.
    pub fn uses_directive(&self, name: &str) -> bool {
        self.inner.ast.definitions.iter().any(|def| match def {
            Definition::Operation(op) =>
                selection_walk::selections_use_directive(selection_walk::selection_set_of(op), name),
            Definition::Fragment(fragment) =>
                selection_walk::selections_use_directive(&fragment.selection_set, name),
        })
    }

    /// Produce a standalone document containing only the operation named
    /// `operation_name` and the fragments it (transitively) uses.
    pub fn extract_operation(&self, operation_name: &str) -> Option<QueryDocument> {
        let op = self.operations().find(|op| {
            selection_walk::operation_name_of(op) == Some(operation_name)
        })?;

        let fragments = self.fragments();
        let used = selection_walk::used_fragment_names(
            &fragments,
            selection_walk::selection_set_of(op),
        );

        let mut definitions = vec![Definition::Operation(op.clone())];
        definitions.extend(
            fragments.values()
                .filter(|fragment| used.contains(fragment.name.as_str()))
                .map(|fragment| Definition::Fragment((*fragment).clone())),
        );

        QueryDocument::from_ast(Document { definitions }).ok()
    }
}
impl fmt::Debug for QueryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QueryDocument")
            .field(&self.inner.printed)
            .finish()
    }
}
impl fmt::Display for QueryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.printed)
    }
}
impl PartialEq for QueryDocument {
    /// Documents compare by their printed form; use
    /// [`QueryDocument::ptr_eq()`] to compare identity.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.printed == other.inner.printed
    }
}

/// Drops variable definitions of the operation at `op_index` that are no
/// longer referenced, then drops fragments that no operation uses.
pub(crate) fn prune_unused_definitions(ast: &mut Ast, op_index: usize) {
    let fragments: IndexMap<String, FragmentDef> =
        ast.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(fragment) =>
                Some((fragment.name.clone(), fragment.clone())),
            Definition::Operation(_) => None,
        }).collect();
    let fragment_refs: IndexMap<&str, &FragmentDef> =
        fragments.iter().map(|(name, def)| (name.as_str(), def)).collect();

    if let Some(Definition::Operation(op)) = ast.definitions.get_mut(op_index) {
        let selection_set = selection_walk::selection_set_of(op);
        let mut used_variables = IndexSet::new();
        selection_walk::collect_variable_usages(selection_set, &mut used_variables);
        selection_walk::collect_directive_variables(
            selection_walk::directives_of(op),
            &mut used_variables,
        );
        for name in selection_walk::used_fragment_names(&fragment_refs, selection_set) {
            if let Some(fragment) = fragment_refs.get(name.as_str()) {
                selection_walk::collect_variable_usages(
                    &fragment.selection_set,
                    &mut used_variables,
                );
            }
        }

        if let Some(var_defs) = selection_walk::variable_definitions_of_mut(op) {
            var_defs.retain(|def| used_variables.contains(&def.name));
        }
    }

    let mut used_fragments = IndexSet::new();
    for def in &ast.definitions {
        if let Definition::Operation(op) = def {
            used_fragments.extend(selection_walk::used_fragment_names(
                &fragment_refs,
                selection_walk::selection_set_of(op),
            ));
        }
    }
    ast.definitions.retain(|def| match def {
        Definition::Fragment(fragment) => used_fragments.contains(&fragment.name),
        Definition::Operation(_) => true,
    });
}

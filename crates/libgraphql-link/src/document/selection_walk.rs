use crate::document::OperationKind;
use graphql_parser::query::Directive;
use graphql_parser::query::FragmentDefinition;
use graphql_parser::query::OperationDefinition;
use graphql_parser::query::Selection;
use graphql_parser::query::SelectionSet;
use graphql_parser::query::Type;
use graphql_parser::query::Value;
use graphql_parser::query::VariableDefinition;
use indexmap::IndexMap;
use indexmap::IndexSet;

pub(crate) type OperationDef = OperationDefinition<'static, String>;
pub(crate) type FragmentDef = FragmentDefinition<'static, String>;
pub(crate) type Selections = SelectionSet<'static, String>;

pub(crate) fn operation_kind_of(op: &OperationDef) -> OperationKind {
    match op {
        OperationDefinition::SelectionSet(_)
            | OperationDefinition::Query(_) => OperationKind::Query,
        OperationDefinition::Mutation(_) => OperationKind::Mutation,
        OperationDefinition::Subscription(_) => OperationKind::Subscription,
    }
}

pub(crate) fn operation_name_of(op: &OperationDef) -> Option<&str> {
    match op {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => query.name.as_deref(),
        OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        OperationDefinition::Subscription(sub) => sub.name.as_deref(),
    }
}

pub(crate) fn selection_set_of(op: &OperationDef) -> &Selections {
    match op {
        OperationDefinition::SelectionSet(selection_set) => selection_set,
        OperationDefinition::Query(query) => &query.selection_set,
        OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        OperationDefinition::Subscription(sub) => &sub.selection_set,
    }
}

pub(crate) fn selection_set_of_mut(op: &mut OperationDef) -> &mut Selections {
    match op {
        OperationDefinition::SelectionSet(selection_set) => selection_set,
        OperationDefinition::Query(query) => &mut query.selection_set,
        OperationDefinition::Mutation(mutation) => &mut mutation.selection_set,
        OperationDefinition::Subscription(sub) => &mut sub.selection_set,
    }
}

pub(crate) fn variable_definitions_of(
    op: &OperationDef,
) -> &[VariableDefinition<'static, String>] {
    match op {
        OperationDefinition::SelectionSet(_) => &[],
        OperationDefinition::Query(query) => &query.variable_definitions,
        OperationDefinition::Mutation(mutation) => &mutation.variable_definitions,
        OperationDefinition::Subscription(sub) => &sub.variable_definitions,
    }
}

pub(crate) fn variable_definitions_of_mut(
    op: &mut OperationDef,
) -> Option<&mut Vec<VariableDefinition<'static, String>>> {
    match op {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => Some(&mut query.variable_definitions),
        OperationDefinition::Mutation(mutation) => Some(&mut mutation.variable_definitions),
        OperationDefinition::Subscription(sub) => Some(&mut sub.variable_definitions),
    }
}

pub(crate) fn directives_of(op: &OperationDef) -> &[Directive<'static, String>] {
    match op {
        OperationDefinition::SelectionSet(_) => &[],
        OperationDefinition::Query(query) => &query.directives,
        OperationDefinition::Mutation(mutation) => &mutation.directives,
        OperationDefinition::Subscription(sub) => &sub.directives,
    }
}

/// Unwraps list and non-null wrappers down to the named type.
pub(crate) fn named_type_of<'a>(ty: &'a Type<'static, String>) -> &'a str {
    match ty {
        Type::NamedType(name) => name.as_str(),
        Type::ListType(inner) | Type::NonNullType(inner) => named_type_of(inner),
    }
}

pub(crate) fn has_directive(
    directives: &[Directive<'static, String>],
    name: &str,
) -> bool {
    directives.iter().any(|directive| directive.name == name)
}

/// Returns `true` if `name` is applied anywhere within `selection_set`.
pub(crate) fn selections_use_directive(selection_set: &Selections, name: &str) -> bool {
    selection_set.items.iter().any(|selection| match selection {
        Selection::Field(field) =>
            has_directive(&field.directives, name)
                || selections_use_directive(&field.selection_set, name),
        Selection::FragmentSpread(spread) => has_directive(&spread.directives, name),
        Selection::InlineFragment(inline) =>
            has_directive(&inline.directives, name)
                || selections_use_directive(&inline.selection_set, name),
    })
}

/// Names of fragments spread directly within `selection_set` (not
/// transitively).
pub(crate) fn collect_fragment_spreads(
    selection_set: &Selections,
    out: &mut IndexSet<String>,
) {
    for selection in &selection_set.items {
        match selection {
            Selection::Field(field) =>
                collect_fragment_spreads(&field.selection_set, out),
            Selection::FragmentSpread(spread) => {
                out.insert(spread.fragment_name.clone());
            },
            Selection::InlineFragment(inline) =>
                collect_fragment_spreads(&inline.selection_set, out),
        }
    }
}

/// Every fragment reachable from `selection_set`, following spreads inside
/// fragments as well. Spreads of unknown fragments are ignored.
pub(crate) fn used_fragment_names(
    fragments: &IndexMap<&str, &FragmentDef>,
    selection_set: &Selections,
) -> IndexSet<String> {
    let mut pending = IndexSet::new();
    collect_fragment_spreads(selection_set, &mut pending);

    let mut used = IndexSet::new();
    while let Some(name) = pending.pop() {
        if used.contains(&name) {
            continue;
        }
        if let Some(fragment) = fragments.get(name.as_str()) {
            let mut nested = IndexSet::new();
            collect_fragment_spreads(&fragment.selection_set, &mut nested);
            pending.extend(nested.into_iter().filter(|n| !used.contains(n)));
        }
        used.insert(name);
    }
    used
}

pub(crate) fn collect_directive_variables(
    directives: &[Directive<'static, String>],
    out: &mut IndexSet<String>,
) {
    for directive in directives {
        for (_, value) in &directive.arguments {
            collect_value_variables(value, out);
        }
    }
}

/// Names of variables referenced anywhere within `selection_set` (field
/// arguments and directive arguments), not following fragment spreads.
pub(crate) fn collect_variable_usages(
    selection_set: &Selections,
    out: &mut IndexSet<String>,
) {
    for selection in &selection_set.items {
        match selection {
            Selection::Field(field) => {
                for (_, value) in &field.arguments {
                    collect_value_variables(value, out);
                }
                collect_directive_variables(&field.directives, out);
                collect_variable_usages(&field.selection_set, out);
            },
            Selection::FragmentSpread(spread) =>
                collect_directive_variables(&spread.directives, out),
            Selection::InlineFragment(inline) => {
                collect_directive_variables(&inline.directives, out);
                collect_variable_usages(&inline.selection_set, out);
            },
        }
    }
}

fn collect_value_variables(
    value: &Value<'static, String>,
    out: &mut IndexSet<String>,
) {
    match value {
        Value::Variable(name) => {
            out.insert(name.clone());
        },
        Value::List(items) =>
            items.iter().for_each(|item| collect_value_variables(item, out)),
        Value::Object(fields) =>
            fields.values().for_each(|field| collect_value_variables(field, out)),
        _ => (),
    }
}

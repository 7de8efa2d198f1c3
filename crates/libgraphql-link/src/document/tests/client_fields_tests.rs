use crate::document::DocumentParseError;
use crate::document::QueryDocument;

type Result<T> = std::result::Result<T, DocumentParseError>;

#[test]
fn finds_client_root_fields_with_aliases() -> Result<()> {
    let doc = QueryDocument::parse(concat!(
        "query Q($id: ID!) {\n",
        "  loggedIn: isLoggedIn @client\n",
        "  cartItem(id: $id) @client { id quantity }\n",
        "  user(id: $id) { name }\n",
        "}\n",
    ))?;

    let fields = doc.client_root_fields(None);
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].response_key, "loggedIn");
    assert_eq!(fields[0].field_name, "isLoggedIn");
    assert_eq!(fields[1].response_key, "cartItem");
    assert_eq!(fields[1].arguments.len(), 1);
    assert_eq!(fields[1].selection_set.items.len(), 2);
    Ok(())
}

#[test]
fn documents_without_client_fields_report_none() -> Result<()> {
    let doc = QueryDocument::parse("query Q { user { name } }")?;
    assert!(doc.client_root_fields(None).is_empty());
    Ok(())
}

#[test]
fn removing_client_fields_prunes_variables_and_fragments() -> Result<()> {
    let doc = QueryDocument::parse(concat!(
        "query Q($cartId: ID!, $userId: ID!) {\n",
        "  cart(id: $cartId) @client { ...CartFields }\n",
        "  user(id: $userId) { ...UserFields }\n",
        "}\n",
        "fragment CartFields on Cart { id }\n",
        "fragment UserFields on User { name }\n",
    ))?;

    let server_doc = doc.without_client_root_fields(None).expect("server fields remain");
    let printed = server_doc.print();
    assert!(printed.contains("user(id: $userId)"));
    assert!(printed.contains("$userId: ID!"));
    assert!(!printed.contains("cartId"));
    assert!(!printed.contains("@client"));
    assert!(!printed.contains("CartFields"));
    assert!(printed.contains("fragment UserFields"));
    Ok(())
}

#[test]
fn removing_every_root_field_leaves_nothing_to_send() -> Result<()> {
    let doc = QueryDocument::parse("query Q { isLoggedIn @client }")?;
    assert!(doc.without_client_root_fields(None).is_none());
    Ok(())
}

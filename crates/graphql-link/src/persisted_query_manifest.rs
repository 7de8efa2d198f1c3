use crate::ManifestOperation;
use libgraphql_link::document::OperationKind;
use libgraphql_link::document::QueryDocument;
use libgraphql_link::links::persisted_queries::sha256_hash;

const MANIFEST_FORMAT: &str = "apollo-persisted-query-manifest";
const MANIFEST_VERSION: u32 = 1;

/// A list of operations a server can safelist, each keyed by the hash a
/// persisted query link sends for it.
///
/// Every named operation becomes its own entry whose body is a standalone
/// document holding the operation and the fragments it uses.
#[derive(Debug, serde::Serialize)]
pub(crate) struct PersistedQueryManifest {
    format: &'static str,
    version: u32,
    operations: Vec<ManifestOperation>,
}
impl PersistedQueryManifest {
    pub(crate) fn new() -> Self {
        Self {
            format: MANIFEST_FORMAT,
            version: MANIFEST_VERSION,
            operations: vec![],
        }
    }

    /// Add every operation in `document`, returning how many were new.
    ///
    /// Anonymous operations cannot be listed, and two different operations
    /// may not share a name.
    pub(crate) fn add_document(&mut self, document: &QueryDocument) -> anyhow::Result<usize> {
        let mut added = 0;
        for name in document.operation_names() {
            let Some(name) = name else {
                anyhow::bail!("Anonymous operations cannot be added to a manifest");
            };
            let Some(operation) = document.extract_operation(name) else {
                continue;
            };

            let body = operation.print().to_string();
            if let Some(existing) = self.operations.iter().find(|op| op.name == name) {
                if existing.body != body {
                    anyhow::bail!("Found multiple operations named `{name}`");
                }
                continue;
            }

            self.operations.push(ManifestOperation {
                id: sha256_hash(&body),
                kind: operation.operation_kind(None).unwrap_or(OperationKind::Query),
                name: name.to_string(),
                body,
            });
            added += 1;
        }
        Ok(added)
    }

    pub(crate) fn operations(&self) -> &[ManifestOperation] {
        &self.operations
    }
}

use libgraphql_link::document::OperationKind;

/// One entry of a [`PersistedQueryManifest`](crate::PersistedQueryManifest).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub(crate) struct ManifestOperation {
    pub body: String,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OperationKind,
}

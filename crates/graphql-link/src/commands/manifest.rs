use crate::Cli;
use crate::CommandResult;
use crate::PersistedQueryManifest;
use crate::RunnableCommand;
use crate::graphql_files;
use crate::output_utils;
use anyhow::Context;
use libgraphql_link::document::QueryDocument;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ManifestCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             GraphQL files whose operations should be listed.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for ManifestCmd {
    pub async fn run(self, _cli: &Cli) -> CommandResult {
        let found = graphql_files::find_graphql_files(
            &self.file_or_dir_paths,
            &self.graphql_file_exts,
        );
        let mut errors = found.errors;
        log::debug!("Found {} GraphQL files.", found.file_paths.len());

        let mut manifest = PersistedQueryManifest::new();
        for path in &found.file_paths {
            let added =
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {path:#?}"))
                    .and_then(|source| {
                        QueryDocument::parse(source)
                            .with_context(|| format!("Failed to parse {path:#?}"))
                    })
                    .and_then(|document| {
                        manifest.add_document(&document)
                            .with_context(|| format!("Invalid operations in {path:#?}"))
                    });
            match added {
                Ok(added) => log::trace!("Added {added} operations from {path:#?}."),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Failed to generate a persisted query manifest: {errors:#?}",
                output_utils::RED_X,
            ));
        }

        match serde_json::to_string_pretty(&manifest) {
            Ok(json) => {
                log::info!(
                    "{} Listed {} operations from {} files (skipped {} non-graphql files).",
                    output_utils::GREEN_CHECK,
                    manifest.operations().len(),
                    found.file_paths.len(),
                    found.num_non_graphql_files,
                );
                CommandResult::stdout(format_args!("{json}"))
            },
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to serialize the manifest: {err}",
                output_utils::RED_X,
            )),
        }
    }
}

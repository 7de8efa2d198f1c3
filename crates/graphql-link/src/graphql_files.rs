use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// GraphQL files found at or under a set of paths.
#[derive(Debug, Default)]
pub(crate) struct GraphQLFiles {
    pub errors: Vec<anyhow::Error>,
    pub file_paths: Vec<PathBuf>,
    pub num_non_graphql_files: usize,
}

/// Recursively collect the files at or under `paths` whose extension is one
/// of `exts`. A single file path given explicitly is always included.
pub(crate) fn find_graphql_files(paths: &[PathBuf], exts: &[String]) -> GraphQLFiles {
    let mut found = GraphQLFiles::default();

    // Normalize the set of file extensions to filter with
    let graphql_file_exts: HashSet<String> =
        exts.iter()
            .map(|ext| ext.trim_start_matches('.').to_owned())
            .collect();

    log::debug!("Scanning {} input paths...", paths.len());
    for path in paths {
        for entry in WalkDir::new(path.as_path()).follow_links(true) {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if !entry.file_type().is_file() {
                        log::trace!("Skipping non-file: {path:#?}.");
                        continue;
                    }
                    log::trace!("Found file at {path:#?}.");
                    let is_graphql =
                        path.extension()
                            .map(|ext| ext.to_string_lossy())
                            .is_some_and(|ext| graphql_file_exts.contains(ext.as_ref()));
                    if !is_graphql {
                        found.num_non_graphql_files += 1;
                        continue;
                    }
                    match std::fs::canonicalize(path) {
                        Ok(path) => found.file_paths.push(path),
                        Err(err) => found.errors.push(err.into()),
                    }
                },

                Err(err) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {path:#?}."
                    );
                    found.errors.push(err.into());
                },
            }
        }
    }

    // A single explicitly named file is presumed to be GraphQL even if its
    // extension isn't one of `exts`.
    if found.file_paths.is_empty()
        && let [only_path] = paths
        && only_path.is_file() {
        log::warn!(
            "Proceeding with {only_path:#?} even though it doesn't match any \
            of the --graphql-file-exts ({}).",
            graphql_file_exts.iter()
                .map(|ext| format!("`.{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        match std::fs::canonicalize(only_path) {
            Ok(path) => {
                found.num_non_graphql_files = found.num_non_graphql_files.saturating_sub(1);
                found.file_paths.push(path);
            },
            Err(err) => found.errors.push(err.into()),
        }
    }

    found.file_paths.sort();
    found.file_paths.dedup();
    found
}

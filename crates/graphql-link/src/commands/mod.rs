mod execute;
mod manifest;

use crate::Cli;
use crate::CommandResult;
use execute::ExecuteCmd;
use manifest::ManifestCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-link")]
pub(crate) enum CommandEnum {
    /// Execute an operation against a GraphQL endpoint through a link chain.
    Execute(Box<ExecuteCmd>),

    /// Print a persisted query manifest for the operations in a set of files.
    Manifest(Box<ManifestCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Execute(cmd) => cmd.run(&cli).await,
            Self::Manifest(cmd) => cmd.run(&cli).await,
        }
    }
}

use crate::Cli;
use crate::CommandResult;

/// A subcommand of `graphql-link`. Commands write their output through the
/// returned [`CommandResult`] rather than printing directly.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: &Cli) -> CommandResult;
}

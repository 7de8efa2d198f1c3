use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use anyhow::Context;
use futures::StreamExt;
use libgraphql_link::Link;
use libgraphql_link::document::QueryDocument;
use libgraphql_link::execute_with_context;
use libgraphql_link::from;
use libgraphql_link::links::http::HttpLink;
use libgraphql_link::links::http::HttpLinkOptions;
use libgraphql_link::links::metrics::MetricsLink;
use libgraphql_link::links::persisted_queries::PersistedQueryLink;
use libgraphql_link::links::remove_typename::RemoveTypenameFromVariablesLink;
use libgraphql_link::links::retry::AttemptsOptions;
use libgraphql_link::links::retry::DelayOptions;
use libgraphql_link::links::retry::RetryLink;
use libgraphql_link::operation::ExecuteContext;
use libgraphql_link::request::GraphQLRequest;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ExecuteCmd {
    #[arg(
        help="Sent to the server in the `apollographql-client-name` header.",
        long,
    )]
    client_name: Option<String>,

    #[arg(
        help="Sent to the server in the `apollographql-client-version` header.",
        long,
    )]
    client_version: Option<String>,

    #[arg(help="URL of the GraphQL endpoint.", long)]
    endpoint: String,

    #[arg(
        help="Send hashed (persisted) queries with GET. Requires \
             --persisted-queries.",
        long,
        requires="persisted_queries",
    )]
    get_for_hashed_queries: bool,

    #[arg(
        help="Extra request header in `Name: value` form. May be repeated.",
        long="header",
        short='H',
    )]
    headers: Vec<String>,

    #[arg(
        help="Which operation in the query file to execute.",
        long,
    )]
    operation_name: Option<String>,

    #[arg(
        help="Send a hash of the query first, and the full text only if the \
             server does not recognize it.",
        long,
    )]
    persisted_queries: bool,

    #[arg(help="Path to the GraphQL document to execute.", long)]
    query_file: PathBuf,

    #[arg(
        default_value_t=0,
        help="How many times to retry after a network or server error.",
        long,
    )]
    retry_attempts: u32,

    #[arg(help="Operation variables as a JSON object.", long)]
    variables: Option<String>,
}
impl ExecuteCmd {
    fn build_request(&self) -> anyhow::Result<GraphQLRequest> {
        let source =
            std::fs::read_to_string(&self.query_file)
                .with_context(|| format!("Failed to read {:#?}", self.query_file))?;
        let mut request = GraphQLRequest::new(QueryDocument::parse(source)?);

        if let Some(variables) = &self.variables {
            let variables =
                serde_json::from_str::<Value>(variables)
                    .context("--variables is not valid JSON")?;
            let Value::Object(variables) = variables else {
                anyhow::bail!("--variables must be a JSON object");
            };
            request = request.with_variables(variables);
        }
        if let Some(operation_name) = &self.operation_name {
            request = request.with_operation_name(operation_name.clone());
        }
        Ok(request)
    }

    fn build_chain(&self, metrics: &MetricsLink) -> anyhow::Result<Link> {
        let mut http_options = HttpLinkOptions::new(self.endpoint.clone());
        for header in &self.headers {
            let Some((name, value)) = header.split_once(':') else {
                anyhow::bail!("Invalid --header `{header}`: expected `Name: value`");
            };
            http_options = http_options.with_header(name.trim(), value.trim());
        }

        let mut links = vec![
            RemoveTypenameFromVariablesLink::new().into_link(),
            metrics.clone().into_link(),
        ];
        if self.retry_attempts > 0 {
            links.push(RetryLink::new(
                DelayOptions::default(),
                AttemptsOptions::default().with_max(self.retry_attempts + 1),
            ).into_link());
        }
        if self.persisted_queries {
            links.push(
                PersistedQueryLink::builder()
                    .use_sha256()
                    .use_get_for_hashed_queries(self.get_for_hashed_queries)
                    .build()?
                    .into_link(),
            );
        }
        links.push(HttpLink::new(http_options).into_link());

        Ok(from(links))
    }

    fn execute_context(&self) -> ExecuteContext {
        let mut execute_context = ExecuteContext::new();
        execute_context.client_name = self.client_name.clone();
        execute_context.client_version = self.client_version.clone();
        execute_context
    }
}

#[inherent::inherent]
impl RunnableCommand for ExecuteCmd {
    pub async fn run(self, _cli: &Cli) -> CommandResult {
        let metrics = MetricsLink::new();
        let prepared =
            self.build_request()
                .and_then(|request| Ok((request, self.build_chain(&metrics)?)));
        let (request, chain) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} {err:#}",
                output_utils::RED_X,
            )),
        };
        log::debug!("Executing through link chain:\n{chain}");

        let observable = execute_with_context(&chain, request, self.execute_context());
        let mut results = observable.stream();
        let mut outputs = vec![];
        let mut failure: Option<anyhow::Error> = None;
        while let Some(event) = results.next().await {
            let output =
                event.map_err(anyhow::Error::from)
                    .and_then(|result| Ok(serde_json::to_string_pretty(&result)?));
            match output {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    failure = Some(err);
                    break;
                },
            }
        }
        log::debug!("{:?}", metrics.snapshot());

        let stdout = outputs.join("\n");
        match failure {
            Some(err) => CommandResult::partial_failure(stdout, format_args!(
                "{} Operation failed: {err:#}",
                output_utils::RED_X,
            )),
            None => CommandResult::stdout(format_args!("{stdout}")),
        }
    }
}

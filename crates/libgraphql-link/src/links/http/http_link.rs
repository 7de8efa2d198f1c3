use crate::Link;
use crate::LinkError;
use crate::link::TerminatingRequestHandler;
use crate::links::http::HttpLinkOptions;
use crate::links::http::MultipartDecoder;
use crate::links::http::PreparedRequest;
use crate::links::http::response::parse_response;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;

/// Sends operations to a GraphQL server over HTTP.
///
/// A JSON response becomes a single result. A `multipart/mixed` response
/// (incremental delivery) is decoded part by part as it arrives, one result
/// per part. Failed transports, unsuccessful status codes and bodies that
/// are not GraphQL responses end the stream with a [`LinkError`].
///
/// Nothing is sent until the returned stream is consumed, and dropping the
/// stream aborts the request.
#[derive(Clone, Debug)]
pub struct HttpLink {
    client: reqwest::Client,
    options: Arc<HttpLinkOptions>,
}
impl HttpLink {
    pub fn new(options: HttpLinkOptions) -> Self {
        Self {
            client: options.client.clone().unwrap_or_default(),
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &HttpLinkOptions {
        &self.options
    }

    pub fn into_link(self) -> Link {
        Link::from_terminating_handler(self).named("http")
    }
}

#[inherent::inherent]
impl TerminatingRequestHandler for HttpLink {
    pub fn request(&self, operation: Operation) -> Option<Observable<FetchResult>> {
        let prepared = PreparedRequest::new(&self.options, &operation);
        let client = self.client.clone();
        let operation_name = operation.operation_name().to_string();

        Some(Observable::new(move || {
            let client = client.clone();
            let operation_name = operation_name.clone();
            let prepared = prepared.clone();

            async_stream::stream! {
                tracing::debug!(
                    operation_name = operation_name.as_str(),
                    method = %prepared.method,
                    uri = prepared.uri.as_str(),
                    "sending operation",
                );
                let response = match prepared.send(&client).await {
                    Ok(response) => response,
                    Err(err) => {
                        yield Err(LinkError::network(err.to_string()));
                        return;
                    },
                };

                let status_code = response.status().as_u16();
                let decoder =
                    if status_code < 300 {
                        response.headers()
                            .get(CONTENT_TYPE)
                            .and_then(|value| value.to_str().ok())
                            .and_then(MultipartDecoder::from_content_type)
                    } else {
                        None
                    };

                let Some(mut decoder) = decoder else {
                    match response.text().await {
                        Ok(body) => {
                            yield parse_response(status_code, body, &operation_name);
                        },
                        Err(err) => {
                            yield Err(LinkError::network(err.to_string()));
                        },
                    }
                    return;
                };

                let mut chunks = response.bytes_stream();
                while let Some(chunk) = chunks.next().await {
                    let chunk = match chunk {
                        Ok(chunk) => chunk,
                        Err(err) => {
                            yield Err(LinkError::network(err.to_string()));
                            return;
                        },
                    };
                    for part in decoder.push(&chunk) {
                        match part.and_then(FetchResult::from_value) {
                            Ok(result) => {
                                yield Ok(result);
                            },
                            Err(err) => {
                                yield Err(LinkError::ServerParse {
                                    status_code,
                                    message: err.to_string(),
                                    body: String::new(),
                                });
                                return;
                            },
                        }
                    }
                    if decoder.is_finished() {
                        return;
                    }
                }
            }
        }))
    }
}
impl From<HttpLink> for Link {
    fn from(link: HttpLink) -> Self {
        link.into_link()
    }
}

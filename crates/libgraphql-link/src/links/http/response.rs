use crate::LinkError;
use crate::result::FetchResult;
use serde_json::Value;

/// Interpret a complete (non-multipart) response body.
pub(crate) fn parse_response(
    status_code: u16,
    body: String,
    operation_name: &str,
) -> Result<FetchResult, LinkError> {
    let parsed = serde_json::from_str::<Value>(&body);
    if status_code >= 300 {
        return Err(LinkError::Server {
            status_code,
            message: format!("Response not successful: Received status code {status_code}"),
            result: parsed.ok(),
            body,
        });
    }

    let value = match parsed {
        Ok(value) => value,
        Err(err) => return Err(LinkError::ServerParse {
            status_code,
            message: err.to_string(),
            body,
        }),
    };
    if value.get("data").is_none() && value.get("errors").is_none() {
        return Err(LinkError::Server {
            status_code,
            message: format!("Server response was missing for query '{operation_name}'."),
            result: Some(value),
            body,
        });
    }

    FetchResult::from_value(value).map_err(|err| LinkError::ServerParse {
        status_code,
        message: err.to_string(),
        body,
    })
}

use serde_json::Value;

const DEFAULT_BOUNDARY: &str = "-";
const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Incrementally splits a `multipart/mixed` response body into the JSON
/// payloads of its parts.
///
/// Chunks may split a part (or a boundary) anywhere. Empty-object parts are
/// heartbeats and are skipped; a part wrapping its result in `payload` is
/// unwrapped.
#[derive(Debug)]
pub(crate) struct MultipartDecoder {
    buffer: Vec<u8>,
    delimiter: Vec<u8>,
    finished: bool,
}
impl MultipartDecoder {
    pub(crate) fn new(boundary: &str) -> Self {
        let mut delimiter = b"\r\n--".to_vec();
        delimiter.extend_from_slice(boundary.as_bytes());
        Self {
            // Lets a body that opens directly with its first boundary match
            // the CRLF-prefixed delimiter.
            buffer: b"\r\n".to_vec(),
            delimiter,
            finished: false,
        }
    }

    /// A decoder for a response with the given `content-type`, or `None` if
    /// it is not `multipart/mixed`.
    pub(crate) fn from_content_type(content_type: &str) -> Option<Self> {
        let mut params = content_type.split(';').map(str::trim);
        let mime = params.next()?;
        if !mime.eq_ignore_ascii_case("multipart/mixed") {
            return None;
        }

        let boundary = params.find_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("boundary")
                .then(|| value.trim().trim_matches('"'))
        }).unwrap_or(DEFAULT_BOUNDARY);
        Some(Self::new(boundary))
    }

    /// Returns `true` once the closing boundary has been seen.
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed the next chunk of the body, returning the payload of every part
    /// it completed.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<Result<Value, serde_json::Error>> {
        if self.finished {
            return vec![];
        }
        self.buffer.extend_from_slice(chunk);

        let mut parts = vec![];
        loop {
            let Some(start) = find(&self.buffer, &self.delimiter) else {
                break;
            };
            let after = start + self.delimiter.len();
            if self.buffer.len() < after + 2 {
                break;
            }
            if &self.buffer[after..after + 2] == b"--" {
                self.finished = true;
                self.buffer.clear();
                break;
            }

            let Some(len) = find(&self.buffer[after..], &self.delimiter) else {
                break;
            };
            let end = after + len;
            if let Some(part) = decode_part(&self.buffer[after..end]) {
                parts.push(part);
            }
            self.buffer.drain(..end);
        }
        parts
    }
}

fn decode_part(part: &[u8]) -> Option<Result<Value, serde_json::Error>> {
    let body = match find(part, HEADERS_END) {
        Some(index) => &part[index + HEADERS_END.len()..],
        None => part,
    };
    let body = body.trim_ascii();
    if body.is_empty() {
        return None;
    }

    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(err) => return Some(Err(err)),
    };
    match value {
        Value::Object(fields) if fields.is_empty() => None,
        Value::Object(mut fields) if fields.contains_key("payload") =>
            match fields.remove("payload") {
                Some(Value::Null) | None => None,
                Some(payload) => Some(Ok(payload)),
            },
        value => Some(Ok(value)),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

use crate::links::http::MultipartDecoder;
use serde_json::Value;
use serde_json::json;

const BODY: &str = concat!(
    "\r\n---\r\n",
    "content-type: application/json; charset=utf-8\r\n\r\n",
    "{\"data\":{\"user\":{\"id\":1}},\"hasNext\":true}",
    "\r\n---\r\n",
    "content-type: application/json; charset=utf-8\r\n\r\n",
    "{\"incremental\":[{\"data\":{\"bio\":\"x\"},\"path\":[\"user\"]}],\"hasNext\":false}",
    "\r\n-----\r\n",
);

fn values(parts: Vec<Result<Value, serde_json::Error>>) -> Vec<Value> {
    parts.into_iter().map(|part| part.unwrap()).collect()
}

#[test]
fn decodes_every_part_of_a_complete_body() {
    let mut decoder = MultipartDecoder::new("-");
    let parts = values(decoder.push(BODY.as_bytes()));

    assert_eq!(parts, vec![
        json!({ "data": { "user": { "id": 1 } }, "hasNext": true }),
        json!({ "incremental": [{ "data": { "bio": "x" }, "path": ["user"] }], "hasNext": false }),
    ]);
    assert!(decoder.is_finished());
}

#[test]
fn chunk_boundaries_do_not_matter() {
    let mut decoder = MultipartDecoder::new("-");
    let mut parts = vec![];
    for byte in BODY.as_bytes() {
        parts.extend(values(decoder.push(std::slice::from_ref(byte))));
    }

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["hasNext"], json!(true));
    assert_eq!(parts[1]["hasNext"], json!(false));
    assert!(decoder.is_finished());
}

#[test]
fn a_part_is_only_emitted_once_the_next_boundary_arrives() {
    let mut decoder = MultipartDecoder::new("graphql");
    assert!(decoder.push(b"--graphql\r\ncontent-type: application/json\r\n\r\n{\"data\":{}}").is_empty());

    let parts = values(decoder.push(b"\r\n--graphql--"));
    assert_eq!(parts, vec![json!({ "data": {} })]);
    assert!(decoder.is_finished());
    assert!(decoder.push(b"\r\n--graphql\r\n\r\n{\"data\":1}").is_empty());
}

#[test]
fn heartbeats_are_skipped_and_payloads_unwrapped() {
    let mut decoder = MultipartDecoder::new("graphql");
    let parts = values(decoder.push(concat!(
        "--graphql\r\ncontent-type: application/json\r\n\r\n{}",
        "\r\n--graphql\r\ncontent-type: application/json\r\n\r\n{\"payload\":{\"data\":{\"n\":1}}}",
        "\r\n--graphql\r\ncontent-type: application/json\r\n\r\n{\"payload\":null}",
        "\r\n--graphql--\r\n",
    ).as_bytes()));

    assert_eq!(parts, vec![json!({ "data": { "n": 1 } })]);
}

#[test]
fn malformed_parts_are_reported() {
    let mut decoder = MultipartDecoder::new("-");
    let parts = decoder.push(b"\r\n---\r\n\r\n{not json\r\n-----");
    assert_eq!(parts.len(), 1);
    assert!(parts[0].is_err());
}

mod content_type {
    use super::*;

    #[test]
    fn reads_quoted_and_bare_boundaries() {
        let mut quoted =
            MultipartDecoder::from_content_type("multipart/mixed; boundary=\"graphql\"; deferSpec=20220824")
                .unwrap();
        assert_eq!(values(quoted.push(b"--graphql\r\n\r\n{\"data\":1}\r\n--graphql--")).len(), 1);

        let mut bare = MultipartDecoder::from_content_type("Multipart/Mixed;boundary=abc").unwrap();
        assert_eq!(values(bare.push(b"--abc\r\n\r\n{\"data\":1}\r\n--abc--")).len(), 1);
    }

    #[test]
    fn defaults_the_boundary_to_a_dash() {
        let mut decoder = MultipartDecoder::from_content_type("multipart/mixed").unwrap();
        assert_eq!(values(decoder.push(BODY.as_bytes())).len(), 2);
    }

    #[test]
    fn other_content_types_are_not_multipart() {
        assert!(MultipartDecoder::from_content_type("application/json").is_none());
        assert!(MultipartDecoder::from_content_type("application/graphql-response+json").is_none());
    }
}

use std::fs;

use sast_utils::{read_structured_file, ErrorKind};
use serde_json::json;
use tracing::Span;

#[test]
fn nested_document_is_returned_whole() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("doc.json");
    fs::write(&p, r#"{"a": [1,2,3]}"#).unwrap();

    let v = read_structured_file(&p, &Span::none()).unwrap();
    assert_eq!(v, json!({"a": [1, 2, 3]}));
}

#[test]
fn broken_document_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("doc.json");
    fs::write(&p, "{bad").unwrap();

    let err = read_structured_file(&p, &Span::none()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn directory_is_not_a_document() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(read_structured_file(tmp.path(), &Span::none()).is_err());
}

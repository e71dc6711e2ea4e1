use std::{error::Error, time::Duration};

use docent_core::{Document, DocumentError, EmbeddingError};

#[test]
fn error_display_for_construction() {
    let err = DocumentError::Construction("missing required field 'content'".to_string());
    assert_eq!(
        format!("{err}"),
        "Document construction failed: missing required field 'content'"
    );
}

#[test]
fn error_display_for_encoding() {
    let err =
        DocumentError::Encoding("reranking_score NaN is not representable in JSON".to_string());
    assert_eq!(
        format!("{err}"),
        "Document encoding failed: reranking_score NaN is not representable in JSON"
    );
}

#[test]
fn decode_error_keeps_serde_source() {
    let err = Document::from_json("not json").unwrap_err();
    assert!(format!("{err}").starts_with("Document decode failed: "));
    let source = err.source().expect("decode error should expose its source");
    assert!(source.downcast_ref::<serde_json::Error>().is_some());
}

#[test]
fn embedding_error_display_for_rate_limited() {
    let err = EmbeddingError::RateLimited {
        retry_after: Some(Duration::from_secs(2)),
    };
    assert_eq!(format!("{err}"), "Embedding rate limited (retry_after=2s)");
}

#[test]
fn embedding_error_display_for_timeout() {
    let err = EmbeddingError::Timeout(Duration::from_millis(750));
    assert_eq!(format!("{err}"), "Embedding timeout after 750ms");
}

#[test]
fn embedding_error_display_for_other() {
    let err = EmbeddingError::Other("network".to_string().into());
    assert_eq!(format!("{err}"), "Embedding error: network");
    assert!(err.source().is_some());
}

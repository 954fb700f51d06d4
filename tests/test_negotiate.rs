//! ネゴシエーションのテスト
//!
//! ブラウザが実際に送る Accept 系ヘッダーを使い、
//! 種別ごとの選択結果とデフォルト値へのフォールバックを確認する。

use shiguredo_negotiate::NegotiateError;
use shiguredo_negotiate::negotiate::{self, NegotiationKind};

/// Chrome が送る Accept ヘッダー (signed-exchange の綴りはそのまま)
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8,appliation/signed-exchange;v=b3;q=0.9";

const ACCEPT_ENCODING: &str = "deflate, gzip;q=0.9, *;q=0.5";

const ACCEPT_LANGUAGE: &str = "en-GB,en-US;q=0.9,en;q=0.8";

const EMPTY: [&str; 0] = [];

// ========================================
// Accept
// ========================================

#[test]
fn content() {
    assert_eq!(
        negotiate::content(BROWSER_ACCEPT, &["text/html"]).unwrap(),
        "text/html"
    );
}

#[test]
fn content_multiple() {
    assert_eq!(
        negotiate::content(BROWSER_ACCEPT, &["application/xml", "text/html"]).unwrap(),
        "text/html"
    );
}

#[test]
fn content_params() {
    assert_eq!(
        negotiate::content(
            BROWSER_ACCEPT,
            &["text/plain", "appliation/signed-exchange;v=b3"]
        )
        .unwrap(),
        "appliation/signed-exchange"
    );
}

#[test]
fn content_params_not_match() {
    // v=b2 は一致しないので */* により先頭の対応値になる
    assert_eq!(
        negotiate::content(
            BROWSER_ACCEPT,
            &["text/plain", "appliation/signed-exchange;v=b2"]
        )
        .unwrap(),
        "text/plain"
    );
}

#[test]
fn content_params_default() {
    assert_eq!(
        negotiate::content("text/html", &["text/plain"]).unwrap(),
        "text/plain"
    );
}

#[test]
fn content_wildcard_subtype() {
    assert_eq!(
        negotiate::content("image/*, text/html;q=0.5", &["text/html", "image/webp"]).unwrap(),
        "image/webp"
    );
}

#[test]
fn content_exact_match_beats_subtype_match() {
    // 同じ q 値なら具体的な text/html が text/* より先に評価される
    assert_eq!(
        negotiate::content("text/*, text/html", &["text/plain", "text/html"]).unwrap(),
        "text/html"
    );
}

#[test]
fn content_empty_accept() {
    assert_eq!(
        negotiate::content("", &["application/json", "text/html"]).unwrap(),
        "application/json"
    );
    assert_eq!(
        negotiate::content_strict("", &["application/json", "text/html"]).unwrap(),
        None
    );
}

#[test]
fn content_strict_no_match() {
    assert_eq!(
        negotiate::content_strict("text/html", &["application/json"]).unwrap(),
        None
    );
    assert_eq!(
        negotiate::content_strict(BROWSER_ACCEPT, &["application/json"]).unwrap(),
        Some("application/json".to_string())
    );
}

#[test]
fn content_empty() {
    assert_eq!(
        negotiate::content(BROWSER_ACCEPT, &EMPTY),
        Err(NegotiateError::NoSupportedValues)
    );
    assert_eq!(
        negotiate::content_strict(BROWSER_ACCEPT, &EMPTY),
        Err(NegotiateError::NoSupportedValues)
    );
}

// ========================================
// Accept-Encoding
// ========================================

#[test]
fn encoding() {
    assert_eq!(
        negotiate::encoding(ACCEPT_ENCODING, &["deflate"]).unwrap(),
        "deflate"
    );
}

#[test]
fn encoding_multiple() {
    assert_eq!(
        negotiate::encoding(ACCEPT_ENCODING, &["gzip", "deflate"]).unwrap(),
        "deflate"
    );
}

#[test]
fn encoding_quality() {
    assert_eq!(
        negotiate::encoding("deflate;q=0.9, gzip, *;q=0.5", &["gzip", "deflate"]).unwrap(),
        "gzip"
    );
}

#[test]
fn encoding_default() {
    assert_eq!(negotiate::encoding(ACCEPT_ENCODING, &["any"]).unwrap(), "any");
}

#[test]
fn encoding_empty() {
    assert_eq!(
        negotiate::encoding(ACCEPT_ENCODING, &EMPTY).unwrap(),
        "identity"
    );
}

#[test]
fn encoding_owned_values() {
    let supported = vec!["br".to_string(), "gzip".to_string()];
    assert_eq!(negotiate::encoding("gzip, br;q=0.8", &supported).unwrap(), "gzip");
}

// ========================================
// Accept-Language
// ========================================

#[test]
fn language() {
    assert_eq!(
        negotiate::language(ACCEPT_LANGUAGE, &["en-GB"]).unwrap(),
        "en-GB"
    );
}

#[test]
fn language_multiple() {
    assert_eq!(
        negotiate::language(ACCEPT_LANGUAGE, &["en-GB", "en-US", "en"]).unwrap(),
        "en-GB"
    );
}

#[test]
fn language_quality() {
    assert_eq!(
        negotiate::language("ru-RU;q=0.9,en-US,en;q=0.8", &["ru-RU", "en-US", "en"]).unwrap(),
        "en-US"
    );
}

#[test]
fn language_locales() {
    // en-US は en-GB と先頭サブタグ en で一致する
    assert_eq!(
        negotiate::language("ru-RU;q=0.9,en-US,en;q=0.8", &["ru-RU", "en-GB", "en"]).unwrap(),
        "en-GB"
    );
}

#[test]
fn language_empty() {
    assert_eq!(
        negotiate::language(ACCEPT_LANGUAGE, &EMPTY),
        Err(NegotiateError::NoSupportedValues)
    );
}

// ========================================
// 種別指定
// ========================================

#[test]
fn negotiate_by_header_name() {
    let cases = [
        ("Accept", BROWSER_ACCEPT, vec!["application/xml", "text/html"], "text/html"),
        ("Accept-Encoding", ACCEPT_ENCODING, vec!["gzip", "deflate"], "deflate"),
        ("Accept-Language", ACCEPT_LANGUAGE, vec!["ja", "en"], "en"),
    ];

    for (header, accepted, supported, expected) in cases {
        let kind: NegotiationKind = header.parse().unwrap();
        assert_eq!(kind.header_name(), header);
        assert_eq!(
            negotiate::negotiate(kind, accepted, &supported).unwrap(),
            expected
        );
    }
}

#[test]
fn negotiate_is_idempotent() {
    let supported = ["ru-RU", "en-GB", "en"];
    let first = negotiate::language("ru-RU;q=0.9,en-US,en;q=0.8", &supported).unwrap();
    for _ in 0..3 {
        assert_eq!(
            negotiate::language("ru-RU;q=0.9,en-US,en;q=0.8", &supported).unwrap(),
            first
        );
    }
}

//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// q 値
// ========================================

/// ミリ単位の q 値を文字列にする (1000 -> "1", 500 -> "0.5")
pub fn qvalue_string(value: u16) -> String {
    if value >= 1000 {
        return "1".to_string();
    }
    if value == 0 {
        return "0".to_string();
    }

    let mut frac = format!("{:03}", value);
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("0.{}", frac)
}

/// 値に q パラメータを付ける (1 の場合は省略)
pub fn with_qvalue(value: &str, q: u16) -> String {
    if q >= 1000 {
        value.to_string()
    } else {
        format!("{};q={}", value, qvalue_string(q))
    }
}

// ========================================
// メディアタイプ
// ========================================

/// type/subtype (ワイルドカードなし)
pub fn media_type() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}", "[a-z0-9+.-]{1,8}").prop_map(|(t, s)| format!("{}/{}", t, s))
}

/// */* / type/* / type/subtype
pub fn media_range() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*/*".to_string()),
        "[a-z]{1,8}".prop_map(|t| format!("{}/*", t)),
        media_type(),
    ]
}

// ========================================
// コンテンツコーディング
// ========================================

/// 一般的なコンテンツコーディング
pub fn coding() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("gzip"),
        Just("deflate"),
        Just("br"),
        Just("zstd"),
        Just("compress"),
    ]
}

// ========================================
// 言語タグ生成 (BCP 47/RFC 5646)
// ========================================

/// 先頭サブタグ: ALPHA のみ (1-8 文字)
pub fn language_primary_subtag() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,8}".prop_map(|s| s)
}

/// 後続サブタグ: ALPHA / DIGIT (1-8 文字)
pub fn language_subsequent_subtag() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,8}".prop_map(|s| s)
}

/// 言語タグ: primary-subtag *("-" subtag)
pub fn language_tag() -> impl Strategy<Value = String> {
    (
        language_primary_subtag(),
        proptest::collection::vec(language_subsequent_subtag(), 0..=2),
    )
        .prop_map(|(primary, rest)| {
            if rest.is_empty() {
                primary
            } else {
                format!("{}-{}", primary, rest.join("-"))
            }
        })
}

// ========================================
// ヘッダー
// ========================================

/// 値と q 値の組からヘッダーを組み立てる
pub fn header_of(items: &[(String, u16)]) -> String {
    items
        .iter()
        .map(|(value, q)| with_qvalue(value, *q))
        .collect::<Vec<_>>()
        .join(", ")
}

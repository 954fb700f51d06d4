//! コンテンツネゴシエーション (RFC 7231 Section 5.3)
//!
//! ## 概要
//!
//! クライアントの Accept 系ヘッダーと、サーバーが対応している値の一覧から、
//! q 値に従って最適な値を 1 つ選択します。
//!
//! | 種類 | ヘッダー | 照合方法 |
//! |------|----------|----------|
//! | [`content`] | Accept | 完全一致 + サブタイプ (`text/*`) |
//! | [`encoding`] | Accept-Encoding | 完全一致のみ、`identity` を常に候補に追加 |
//! | [`language`] | Accept-Language | 完全一致 + 先頭サブタグ (`en-US` と `en-GB`) |
//!
//! 一致しない場合は対応値の先頭を返します。
//! [`content_strict`] のみ、一致しない場合に `None` を返します。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_negotiate::negotiate::{self, NegotiateError};
//!
//! let accept = "text/html,application/xml;q=0.9,*/*;q=0.8";
//! assert_eq!(negotiate::content(accept, &["application/json"]).unwrap(), "application/json");
//! assert_eq!(negotiate::content_strict("text/html", &["application/json"]).unwrap(), None);
//!
//! let empty: [&str; 0] = [];
//! assert_eq!(negotiate::language("en", &empty), Err(NegotiateError::NoSupportedValues));
//! assert_eq!(negotiate::encoding("br", &empty).unwrap(), "identity");
//! ```

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use crate::accept::{RankedEntry, parse_header};

/// 常に受け入れ可能なコンテンツコーディング
pub const IDENTITY: &str = "identity";

/// ネゴシエーションエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiateError {
    /// 対応値が 1 つも指定されていない
    NoSupportedValues,
    /// 不明なネゴシエーション種別
    UnknownKind(String),
}

impl fmt::Display for NegotiateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiateError::NoSupportedValues => write!(f, "no supported values supplied"),
            NegotiateError::UnknownKind(kind) => write!(f, "unknown negotiation kind: {}", kind),
        }
    }
}

impl std::error::Error for NegotiateError {}

/// 照合オプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// `type/subtype` として比較し、サブタイプの `*` を許可する
    pub enforce_types: bool,
    /// 一致しない場合にデフォルト値を返さない
    pub strict: bool,
    /// 言語タグの先頭サブタグだけで比較する
    pub match_locales: bool,
}

impl MatchOptions {
    /// Accept 用
    pub fn content(strict: bool) -> Self {
        MatchOptions {
            enforce_types: true,
            strict,
            match_locales: false,
        }
    }

    /// Accept-Encoding 用
    pub fn encoding() -> Self {
        MatchOptions::default()
    }

    /// Accept-Language 用
    pub fn language() -> Self {
        MatchOptions {
            enforce_types: false,
            strict: false,
            match_locales: true,
        }
    }
}

/// ネゴシエーション種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationKind {
    /// Accept
    Content,
    /// Accept-Encoding
    Encoding,
    /// Accept-Language
    Language,
}

impl NegotiationKind {
    /// 種別に対応する照合オプション (strict なし)
    pub fn options(self) -> MatchOptions {
        match self {
            NegotiationKind::Content => MatchOptions::content(false),
            NegotiationKind::Encoding => MatchOptions::encoding(),
            NegotiationKind::Language => MatchOptions::language(),
        }
    }

    /// 種別に対応するリクエストヘッダー名
    pub fn header_name(self) -> &'static str {
        match self {
            NegotiationKind::Content => "Accept",
            NegotiationKind::Encoding => "Accept-Encoding",
            NegotiationKind::Language => "Accept-Language",
        }
    }
}

impl fmt::Display for NegotiationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiationKind::Content => write!(f, "content"),
            NegotiationKind::Encoding => write!(f, "encoding"),
            NegotiationKind::Language => write!(f, "language"),
        }
    }
}

impl FromStr for NegotiationKind {
    type Err = NegotiateError;

    /// 種別名またはヘッダー名 (大文字小文字は区別しない)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "content" | "accept" => Ok(NegotiationKind::Content),
            "encoding" | "accept-encoding" => Ok(NegotiationKind::Encoding),
            "language" | "accept-language" => Ok(NegotiationKind::Language),
            _ => Err(NegotiateError::UnknownKind(s.to_string())),
        }
    }
}

/// コンテンツタイプをネゴシエーション
///
/// 一致しない場合は `supported` の先頭を返す。
pub fn content<S: AsRef<str>>(accepted: &str, supported: &[S]) -> Result<String, NegotiateError> {
    best_match(accepted, supported, MatchOptions::content(false)).map(Option::unwrap_or_default)
}

/// コンテンツタイプをネゴシエーション (デフォルト値なし)
///
/// 一致しない場合、および `accepted` が空の場合は `None` を返す。
pub fn content_strict<S: AsRef<str>>(
    accepted: &str,
    supported: &[S],
) -> Result<Option<String>, NegotiateError> {
    best_match(accepted, supported, MatchOptions::content(true))
}

/// コンテンツコーディングをネゴシエーション
///
/// 候補の末尾に `identity` を追加するため失敗しない。
pub fn encoding<S: AsRef<str>>(accepted: &str, supported: &[S]) -> Result<String, NegotiateError> {
    let mut candidates: Vec<&str> = supported.iter().map(AsRef::as_ref).collect();
    candidates.push(IDENTITY);
    best_match(accepted, &candidates, MatchOptions::encoding()).map(Option::unwrap_or_default)
}

/// 言語をネゴシエーション
pub fn language<S: AsRef<str>>(accepted: &str, supported: &[S]) -> Result<String, NegotiateError> {
    best_match(accepted, supported, MatchOptions::language()).map(Option::unwrap_or_default)
}

/// 種別を指定してネゴシエーション (strict なし)
pub fn negotiate<S: AsRef<str>>(
    kind: NegotiationKind,
    accepted: &str,
    supported: &[S],
) -> Result<String, NegotiateError> {
    match kind {
        NegotiationKind::Content => content(accepted, supported),
        NegotiationKind::Encoding => encoding(accepted, supported),
        NegotiationKind::Language => language(accepted, supported),
    }
}

/// 最適な対応値を選択
///
/// - `supported` が空の場合は [`NegotiateError::NoSupportedValues`]
/// - `accepted` が空、または一致しない場合はデフォルト値
///   (strict なら `None`、そうでなければ `supported` の先頭)
/// - `accepted` の `*` / `*/*` は、重複除去後の最初の対応エントリに一致する
pub fn best_match<S: AsRef<str>>(
    accepted: &str,
    supported: &[S],
    options: MatchOptions,
) -> Result<Option<String>, NegotiateError> {
    let first = supported
        .first()
        .ok_or(NegotiateError::NoSupportedValues)?
        .as_ref();
    let default = if options.strict {
        None
    } else {
        Some(first.to_string())
    };

    if accepted.is_empty() {
        return Ok(default);
    }

    let accepted = parse_header(accepted);
    let supported = parse_supported(supported);

    for a in accepted.iter().filter(|a| !a.is_rejected()) {
        if a.is_any() {
            return Ok(supported.first().map(|b| b.value().to_string()).or(default));
        }

        if let Some(b) = supported.iter().find(|b| matches(a, b, options)) {
            return Ok(Some(b.value().to_string()));
        }
    }

    Ok(default)
}

/// 2 つのエントリが一致するか
pub fn matches(a: &RankedEntry, b: &RankedEntry, options: MatchOptions) -> bool {
    if a.value() == b.value() {
        return match_parameters(a.params(), b.params());
    }

    if options.enforce_types {
        return match_sub_types(a.value(), b.value());
    }

    if options.match_locales {
        return match_locales(a.value(), b.value());
    }

    false
}

/// パラメータが一致するか
///
/// 件数が等しく、`b` のすべてのキーが `a` に同じ値で存在する場合に一致。
pub fn match_parameters(a: &BTreeMap<String, String>, b: &BTreeMap<String, String>) -> bool {
    if a.len() != b.len() {
        return false;
    }

    b.iter().all(|(name, value)| a.get(name) == Some(value))
}

/// `type/subtype` を比較
///
/// type は完全一致が必要。どちらかの subtype が `*` なら一致。
pub fn match_sub_types(a: &str, b: &str) -> bool {
    let (a_type, a_sub_type) = split_media_type(a);
    let (b_type, b_sub_type) = split_media_type(b);

    if a_type != b_type {
        return false;
    }

    if a_sub_type == Some("*") || b_sub_type == Some("*") {
        return true;
    }

    a_sub_type == b_sub_type
}

/// 言語タグを先頭サブタグ (最初の `-` より前) で比較
pub fn match_locales(a: &str, b: &str) -> bool {
    primary_subtag(a) == primary_subtag(b)
}

// 重複を除いた対応値をパースし、指定順に連結する (再ソートはしない)
fn parse_supported<S: AsRef<str>>(supported: &[S]) -> Vec<RankedEntry> {
    let mut seen: Vec<&str> = Vec::with_capacity(supported.len());
    for value in supported.iter().map(AsRef::as_ref) {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }

    seen.into_iter().flat_map(parse_header).collect()
}

fn split_media_type(value: &str) -> (&str, Option<&str>) {
    match value.split_once('/') {
        Some((media_type, sub_type)) => (media_type, Some(sub_type)),
        None => (value, None),
    }
}

fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

//! Accept 系ヘッダーパース (RFC 7231 Section 5.3)
//!
//! ## 概要
//!
//! Accept / Accept-Encoding / Accept-Language 形式のヘッダーを、
//! 優先度順に並んだ [`RankedEntry`] の一覧に変換します。
//!
//! パースは寛容で、失敗しません。
//!
//! - 不正なパラメータ (`=` を含まないもの) は無視する
//! - 数値として解釈できない q 値は 0 (拒否) として扱う
//! - 空のセグメントも値が空文字列のエントリになる
//!
//! ## 並び順
//!
//! 1. q 値の降順
//! 2. 値に含まれる `*` の数の昇順 (具体的な値が優先)
//! 3. パラメータ数の降順 (パラメータが多いほど具体的)
//!
//! 以上で決まらない場合は元の順序を保つ。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_negotiate::accept::parse_header;
//!
//! let entries = parse_header("text/*;q=0.5, text/html;level=1;q=0.5, */*;q=0.1, text/plain");
//! let values: Vec<&str> = entries.iter().map(|e| e.value()).collect();
//! assert_eq!(values, ["text/plain", "text/html", "text/*", "*/*"]);
//! assert_eq!(entries[1].params().get("level").map(String::as_str), Some("1"));
//! ```

use core::cmp::Ordering;
use core::fmt;
use std::collections::BTreeMap;

/// 品質パラメータ名
const QUALITY_PARAM: &str = "q";

/// q 値が無い場合の品質
const DEFAULT_QUALITY: f64 = 1.0;

/// 優先度付きのヘッダー値
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    value: String,
    quality: f64,
    params: BTreeMap<String, String>,
}

impl RankedEntry {
    /// q 値 1、パラメータなしのエントリを作成
    pub fn new(value: impl Into<String>) -> Self {
        RankedEntry {
            value: value.into().trim().to_string(),
            quality: DEFAULT_QUALITY,
            params: BTreeMap::new(),
        }
    }

    /// q 値を設定 (0 - 1 に丸める)
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = clamp_quality(quality);
        self
    }

    /// パラメータを追加
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// 値 (前後の空白は除去済み)
    pub fn value(&self) -> &str {
        &self.value
    }

    /// q 値 (0.0 - 1.0)
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// q を除いたパラメータ
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// 値に含まれる `*` の数
    pub fn wildcard_count(&self) -> usize {
        self.value.matches('*').count()
    }

    /// 明示的に拒否されている (q=0) か
    pub fn is_rejected(&self) -> bool {
        self.quality == 0.0
    }

    /// `*` または `*/*` か
    pub fn is_any(&self) -> bool {
        self.value == "*" || self.value == "*/*"
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        for (name, value) in &self.params {
            if needs_quoting(value) {
                write!(f, ";{}=\"{}\"", name, value)?;
            } else {
                write!(f, ";{}={}", name, value)?;
            }
        }
        if self.quality < DEFAULT_QUALITY {
            write!(f, ";q={}", self.quality)?;
        }
        Ok(())
    }
}

/// ヘッダーを優先度順のエントリ一覧にパース
///
/// 戻り値は常に 1 件以上。
pub fn parse_header(header: &str) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = header.split(',').map(parse_segment).collect();
    entries.sort_by(compare_rank);
    entries
}

/// q 値をパース
///
/// 数値として解釈できない値や有限でない値は 0 になる。
pub fn parse_quality(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(q) if q.is_finite() => clamp_quality(q),
        _ => 0.0,
    }
}

fn parse_segment(segment: &str) -> RankedEntry {
    let mut pieces = segment.split(';');
    let value = pieces.next().unwrap_or_default().trim().to_string();

    let mut params = BTreeMap::new();
    for pair in pieces {
        if let Some((name, value)) = parse_parameter(pair) {
            params.insert(name, value);
        }
    }

    let quality = params
        .remove(QUALITY_PARAM)
        .map_or(DEFAULT_QUALITY, |q| parse_quality(&q));

    RankedEntry {
        value,
        quality,
        params,
    }
}

// name=value / name="value" / name='value'
fn parse_parameter(pair: &str) -> Option<(String, String)> {
    // 名前は最低 1 文字必要なので、先頭文字の `=` は区切りとみなさない
    let first_len = pair.chars().next()?.len_utf8();
    let eq = pair[first_len..].find('=')? + first_len;

    let name = pair[..eq].trim();
    let value = strip_quotes(&pair[eq + 1..]).trim();

    Some((name.to_string(), value.to_string()))
}

fn strip_quotes(input: &str) -> &str {
    for quote in ['"', '\''] {
        if input.len() >= 2 && input.starts_with(quote) && input.ends_with(quote) {
            return &input[1..input.len() - 1];
        }
    }
    input
}

fn compare_rank(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.quality
        .partial_cmp(&a.quality)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.wildcard_count().cmp(&b.wildcard_count()))
        .then_with(|| b.params.len().cmp(&a.params.len()))
}

fn clamp_quality(quality: f64) -> f64 {
    if quality.is_nan() || quality <= 0.0 {
        // -0.0 も 0 に揃える
        return 0.0;
    }
    quality.min(1.0)
}

fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'0'..=b'9' | b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.bytes().any(|b| !is_token_char(b))
}

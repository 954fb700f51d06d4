//! # shiguredo_negotiate
//!
//! 依存なしの HTTP コンテンツネゴシエーションライブラリ (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: リクエスト/レスポンスオブジェクトを持たず、文字列だけを扱う
//! - **ステートレス**: キャッシュなし、呼び出しごとに入力をパースする
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_negotiate::negotiate;
//!
//! // Accept
//! let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
//! assert_eq!(negotiate::content(accept, &["text/html"]).unwrap(), "text/html");
//!
//! // Accept-Encoding
//! let encoding = negotiate::encoding("deflate;q=0.9, gzip, *;q=0.5", &["gzip", "deflate"]).unwrap();
//! assert_eq!(encoding, "gzip");
//!
//! // Accept-Language
//! let language = negotiate::language("ru-RU;q=0.9,en-US,en;q=0.8", &["ru-RU", "en-GB", "en"]).unwrap();
//! assert_eq!(language, "en-GB");
//! ```

pub mod accept;
pub mod negotiate;

pub use accept::{RankedEntry, parse_header};
pub use negotiate::{MatchOptions, NegotiateError, NegotiationKind};

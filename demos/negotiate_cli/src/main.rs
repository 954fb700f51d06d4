//! コマンドラインからネゴシエーションを試す例
//!
//! 使い方:
//!   cargo run -p negotiate_cli -- --accept "text/html,*/*;q=0.8" application/json text/html
//!   cargo run -p negotiate_cli -- -k encoding -a "br, gzip;q=0.9" gzip
//!   cargo run -p negotiate_cli -- -k accept-language -a "en-US,en;q=0.8" ja en-GB
//!
//! 選択された値を標準出力に表示する。
//! --strict で一致しなかった場合は何も表示せず終了コード 1 で終了する。

use shiguredo_negotiate::accept::parse_header;
use shiguredo_negotiate::negotiate::{self, NegotiationKind};

struct CliOptions {
    kind: NegotiationKind,
    accepted: String,
    strict: bool,
    ranked: bool,
    supported: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    if options.ranked {
        println!("{}: {}", options.kind.header_name(), options.accepted);
        for (i, entry) in parse_header(&options.accepted).iter().enumerate() {
            println!("  {}. {}", i + 1, entry);
        }
    }

    if options.strict {
        if options.kind != NegotiationKind::Content {
            return Err("--strict is only available for content negotiation".into());
        }
        match negotiate::content_strict(&options.accepted, &options.supported)? {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("No acceptable value");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let value = negotiate::negotiate(options.kind, &options.accepted, &options.supported)?;
    println!("{}", value);

    Ok(())
}

fn parse_args() -> Result<CliOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "negotiate_cli";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --kind オプション
    let kind: NegotiationKind = noargs::opt("kind")
        .short('k')
        .doc("Negotiation kind: content, encoding, language (or the request header name)")
        .default("content")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --accept オプション (省略時は空ヘッダー)
    let accepted: String = noargs::opt("accept")
        .short('a')
        .doc("Accept header value sent by the client")
        .default("")
        .take(&mut args)
        .then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // --strict フラグ
    let strict: bool = noargs::flag("strict")
        .doc("Do not fall back to the first supported value (content only)")
        .take(&mut args)
        .is_present();

    // --ranked フラグ
    let ranked: bool = noargs::flag("ranked")
        .doc("Print the parsed header entries in priority order")
        .take(&mut args)
        .is_present();

    // 位置引数: 対応値
    let mut supported = Vec::new();
    while let Some(value) = noargs::arg("[SUPPORTED]...")
        .doc("Values supported by the server, in preference order")
        .take(&mut args)
        .present_and_then(|a| Ok::<_, &str>(a.value().to_string()))
        .map_err(|e| format!("{:?}", e))?
    {
        supported.push(value);
    }

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(CliOptions {
        kind,
        accepted,
        strict,
        ranked,
        supported,
    })
}

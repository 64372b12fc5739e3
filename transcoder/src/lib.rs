//! # ipadic-transcoder
//!
//! MeCab IPADIC形式の辞書ソースを、単純なタブ区切り(TSV)ファイルに変換するライブラリです。
//!
//! ## 概要
//!
//! IPADICのソースはEUC-JPで記述された単語CSV、連接コスト行列(`matrix.def`)、
//! 文字定義(`char.def`)、未知語定義(`unk.def`)から構成されます。
//! このライブラリはそれぞれを1行ずつデコードし、必要なフィールドだけを取り出して
//! UTF-8のTSVとして書き出します。単語の読みはカタカナからひらがなに変換されます。
//!
//! すべてのソースは共通の [`pipeline::transcode()`] で処理され、ソースごとの違いは
//! [`rules`] モジュールの [`RecordRule`](pipeline::RecordRule) 実装だけが持ちます。
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ipadic_transcoder::observer::NullObserver;
//! use ipadic_transcoder::pipeline::transcode;
//! use ipadic_transcoder::rules::{MappingRule, MatrixRule};
//!
//! let matrix_def = "2 2\n0 0 100\n\n1 1 -50\n";
//! let mut out = vec![];
//! transcode(&MatrixRule, matrix_def.as_bytes(), &mut out, &mut NullObserver)?;
//! assert_eq!(String::from_utf8(out)?, "2\t2\n0\t0\t100\n1\t1\t-50\n");
//!
//! let char_def = "0x4E00..0x9FFF KANJI # cjk ideographs\n0x3041 HIRAGANA\n";
//! let mut out = vec![];
//! transcode(&MappingRule, char_def.as_bytes(), &mut out, &mut NullObserver)?;
//! assert_eq!(String::from_utf8(out)?, "0x4E00\t0x9FFF\tKANJI\n0x3041\t\tHIRAGANA\n");
//! # Ok(())
//! # }
//! ```

/// ソースファイルのデコード
pub mod codec;

/// 辞書ディレクトリ単位の変換
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// カタカナからひらがなへの変換
pub mod kana;

/// 進捗と診断イベントの通知
pub mod observer;

/// 汎用のレコード変換パイプライン
pub mod pipeline;

/// 出力されるレコードの型
pub mod record;

/// ソースごとの抽出規則
pub mod rules;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod tests;

// Re-exports
pub use dictionary::{transcode_dictionary, DictionarySources, OutputPaths, Report};
pub use errors::TranscodeError;
pub use observer::{Event, Observer, SourceKind};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

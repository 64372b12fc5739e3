//! エラー型の定義
//!
//! このモジュールは、変換処理で使用されるすべてのエラー型を定義します。
//! レコード単位で回復できる事象(フィールド不足、デコード時の置換)はエラーではなく、
//! [`Event`](crate::observer::Event) としてオブザーバーに通知されます。

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// 変換処理専用のResult型
///
/// エラー型としてデフォルトで[`TranscodeError`]を使用します。
pub type Result<T, E = TranscodeError> = std::result::Result<T, E>;

/// 変換処理のエラー型
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// 入力ディレクトリが存在しない
    ///
    /// 実行全体が中断され、出力は一切生成されません。
    #[error("Input directory '{}' does not exist.", .0.display())]
    MissingInputDirectory(PathBuf),

    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// ヘッダ行が不正
    ///
    /// `matrix.def`の1行目が2つの整数で構成されていない場合に発生します。
    #[error("{name}: malformed header: {msg}")]
    MalformedHeader {
        /// ソースファイルの名前
        name: &'static str,
        /// エラーメッセージ
        msg: String,
    },

    /// レコード行が不正
    ///
    /// `matrix.def`の2行目以降が3つの整数で構成されていない場合に発生します。
    #[error("{name}: malformed record at line {line}: {msg}")]
    MalformedRecord {
        /// ソースファイルの名前
        name: &'static str,
        /// 1始まりの行番号
        line: usize,
        /// エラーメッセージ
        msg: String,
    },

    /// 厳格なデコードポリシーでの不正なバイト列
    #[error("{name}: invalid {encoding} byte sequence at line {line}")]
    Decode {
        /// ソースファイルの名前
        name: &'static str,
        /// 宣言されたエンコーディング名
        encoding: &'static str,
        /// 1始まりの行番号
        line: usize,
    },

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// 一時ファイルの永続化エラー
    ///
    /// [`tempfile::PersistError`]のエラーバリアント。
    #[error(transparent)]
    PathPersist(#[from] tempfile::PersistError),
}

impl TranscodeError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// ヘッダ不正エラーを生成します
    pub(crate) fn malformed_header<S>(name: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::MalformedHeader {
            name,
            msg: msg.into(),
        }
    }

    /// レコード不正エラーを生成します
    ///
    /// # 引数
    ///
    /// * `name` - ソースファイルの名前
    /// * `line` - 1始まりの行番号
    /// * `msg` - エラーメッセージ
    pub(crate) fn malformed_record<S>(name: &'static str, line: usize, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::MalformedRecord {
            name,
            line,
            msg: msg.into(),
        }
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

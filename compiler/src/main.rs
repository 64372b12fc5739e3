//! IPADIC辞書ソース変換ツールのメインエントリーポイント
//!
//! サブコマンドを指定しない場合は、ディレクトリ全体を変換します(`all`と同じ)。
//! 個別のソースファイルだけを変換するサブコマンドも提供します。

mod all;
mod convert;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use ipadic_transcoder::TranscodeError;
use thiserror::Error;
use tracing::error;

use crate::all::AllError;

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "compile", version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Option<Command>,

    /// サブコマンドを省略した場合の引数
    #[clap(flatten)]
    all: all::Args,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// Converts every source file in an IPADIC directory (the default).
    All(all::Args),

    /// Converts word CSV files only.
    Lexicon(convert::LexiconArgs),

    /// Converts matrix.def only.
    Matrix(convert::MatrixArgs),

    /// Converts char.def only.
    Char(convert::CharArgs),

    /// Converts unk.def only.
    Unk(convert::UnkArgs),
}

/// 実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum CompileError {
    /// 全体変換中のエラー
    #[error(transparent)]
    All(#[from] AllError),
    /// 単一ソースの変換中のエラー
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

fn run(cli: Cli) -> Result<(), CompileError> {
    match cli.command.unwrap_or(Command::All(cli.all)) {
        Command::All(args) => Ok(all::run(args)?),
        Command::Lexicon(args) => Ok(convert::run_lexicon(args)?),
        Command::Matrix(args) => Ok(convert::run_matrix(args)?),
        Command::Char(args) => Ok(convert::run_char(args)?),
        Command::Unk(args) => Ok(convert::run_unk(args)?),
    }
}

/// メイン関数
///
/// 失敗した場合はエラーをログに出力し、0以外の終了ステータスを返します。
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

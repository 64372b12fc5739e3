//! 辞書ディレクトリ全体の変換
//!
//! IPADICのソースディレクトリに含まれる単語CSV、`matrix.def`、`char.def`、`unk.def`を
//! それぞれのTSVファイルに変換します。

use std::path::PathBuf;

use clap::Parser;
use ipadic_transcoder::dictionary::{self, OutputPaths, StreamOutcome};
use ipadic_transcoder::TranscodeError;
use tracing::info;

use crate::logging::LogObserver;

/// 全体変換コマンドの引数
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "all",
    about = "Converts every IPADIC source file in a directory into TSV files"
)]
pub struct Args {
    /// Directory containing the MeCab IPADIC source files.
    #[clap(short = 'i', long, default_value = dictionary::DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Output file for the word entries.
    #[clap(short = 'o', long, default_value = "combined_dictionary.tsv")]
    pub output_file: PathBuf,

    /// Output file for the connection cost matrix.
    #[clap(short = 'm', long, default_value = "cost_matrix.tsv")]
    pub matrix_output: PathBuf,

    /// Output file for the character categories.
    #[clap(short = 'c', long, default_value = "char_categories.tsv")]
    pub char_categories_output: PathBuf,

    /// Output file for the character mappings.
    #[clap(short = 'p', long, default_value = "char_mappings.tsv")]
    pub char_mappings_output: PathBuf,

    /// Output file for the unknown word definitions.
    #[clap(short = 'u', long, default_value = "unk_data.tsv")]
    pub unk_output: PathBuf,
}

impl Args {
    fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            lexicon: self.output_file.clone(),
            matrix: self.matrix_output.clone(),
            char_categories: self.char_categories_output.clone(),
            char_mappings: self.char_mappings_output.clone(),
            unknown: self.unk_output.clone(),
        }
    }
}

/// 全体変換中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum AllError {
    /// 変換を開始できなかった
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// 一部の出力の生成に失敗した
    #[error("{0} of the outputs could not be produced")]
    StreamsFailed(usize),
}

/// 全体変換コマンドを実行する
///
/// # エラー
///
/// 入力ディレクトリが存在しない場合、または1つ以上の出力の生成に失敗した場合に
/// `AllError`を返します。失敗しなかった出力はそのまま保存されます。
pub fn run(args: Args) -> Result<(), AllError> {
    let outputs = args.output_paths();
    let report = dictionary::transcode_dictionary(&args.input_dir, &outputs, &mut LogObserver)?;

    let written = report
        .outcomes()
        .iter()
        .filter(|(_, outcome)| matches!(outcome, StreamOutcome::Written { .. }))
        .count();
    let failed = report.failures().count();
    if failed > 0 {
        return Err(AllError::StreamsFailed(failed));
    }

    info!(
        "Dictionary conversion complete. {written} outputs saved from {}",
        args.input_dir.display()
    );
    Ok(())
}

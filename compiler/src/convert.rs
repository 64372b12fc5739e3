//! 単一ソースの変換
//!
//! ディレクトリ全体ではなく、指定されたソースファイルだけを変換するサブコマンドです。

use std::path::PathBuf;

use clap::Parser;
use ipadic_transcoder::dictionary;
use ipadic_transcoder::rules::{MatrixRule, UnkRule};
use ipadic_transcoder::TranscodeError;

use crate::logging::LogObserver;

/// 単語CSV変換コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "lexicon",
    about = "Converts word CSV files into a single TSV file"
)]
pub struct LexiconArgs {
    /// Word CSV files (*.csv). They are processed in file name order.
    #[clap(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file for the word entries.
    #[clap(short = 'o', long, default_value = "combined_dictionary.tsv")]
    pub output: PathBuf,
}

/// 連接コスト行列変換コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "matrix", about = "Converts matrix.def into a TSV file")]
pub struct MatrixArgs {
    /// Matrix definition file (matrix.def).
    #[clap(short = 'i', long)]
    pub input: PathBuf,

    /// Output file for the connection cost matrix.
    #[clap(short = 'o', long, default_value = "cost_matrix.tsv")]
    pub output: PathBuf,
}

/// 文字定義変換コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "char",
    about = "Converts char.def into category and mapping TSV files"
)]
pub struct CharArgs {
    /// Character definition file (char.def).
    #[clap(short = 'i', long)]
    pub input: PathBuf,

    /// Output file for the character categories.
    #[clap(short = 'c', long, default_value = "char_categories.tsv")]
    pub categories_output: PathBuf,

    /// Output file for the character mappings.
    #[clap(short = 'p', long, default_value = "char_mappings.tsv")]
    pub mappings_output: PathBuf,
}

/// 未知語定義変換コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "unk", about = "Converts unk.def into a TSV file")]
pub struct UnkArgs {
    /// Unknown word definition file (unk.def).
    #[clap(short = 'i', long)]
    pub input: PathBuf,

    /// Output file for the unknown word definitions.
    #[clap(short = 'o', long, default_value = "unk_data.tsv")]
    pub output: PathBuf,
}

/// 単語CSVを変換する
pub fn run_lexicon(mut args: LexiconArgs) -> Result<(), TranscodeError> {
    args.inputs
        .sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
    dictionary::convert_lexicons(&args.inputs, &args.output, &mut LogObserver)?;
    Ok(())
}

/// `matrix.def`を変換する
pub fn run_matrix(args: MatrixArgs) -> Result<(), TranscodeError> {
    dictionary::convert_file(&MatrixRule, &args.input, &args.output, &mut LogObserver)?;
    Ok(())
}

/// `char.def`を変換する
pub fn run_char(args: CharArgs) -> Result<(), TranscodeError> {
    dictionary::convert_char_def(
        &args.input,
        &args.categories_output,
        &args.mappings_output,
        &mut LogObserver,
    )?;
    Ok(())
}

/// `unk.def`を変換する
pub fn run_unk(args: UnkArgs) -> Result<(), TranscodeError> {
    dictionary::convert_file(&UnkRule, &args.input, &args.output, &mut LogObserver)?;
    Ok(())
}

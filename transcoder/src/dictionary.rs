//! 辞書ディレクトリ単位の変換
//!
//! このモジュールは、IPADICのソースディレクトリからファイルを探索し、
//! 各ソースを対応する出力ファイルへ変換する処理を提供します。
//!
//! 出力は書き込み先と同じディレクトリの一時ファイルに書き出され、
//! 変換が成功した場合にのみ最終的なパスへ移動されます。
//! そのため、失敗したストリームが中途半端な出力を残すことはありません。

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::errors::{Result, TranscodeError};
use crate::observer::{Event, Observer, SourceKind};
use crate::pipeline::{self, RecordRule, StreamStats};
use crate::rules::{CategoryRule, MappingRule, MatrixRule, UnkRule, WordRule};

/// IPADICの標準的な配布ディレクトリ名
pub const DEFAULT_INPUT_DIR: &str = "mecab-ipadic-2.7.0-20070801";

/// 入力ディレクトリで見つかったソースファイル
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionarySources {
    dir: PathBuf,
    lexicons: Vec<PathBuf>,
    matrix: Option<PathBuf>,
    char_def: Option<PathBuf>,
    unk_def: Option<PathBuf>,
}

impl DictionarySources {
    /// ディレクトリを探索します。
    ///
    /// `*.csv`はファイル名の辞書順に並べられます。ドットで始まるファイルは対象外です。
    /// `matrix.def`、`char.def`、`unk.def`は存在しない場合`None`になります。
    ///
    /// # エラー
    ///
    /// ディレクトリが存在しない場合は[`TranscodeError::MissingInputDirectory`]を返します。
    pub fn discover<P>(dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TranscodeError::MissingInputDirectory(dir.to_path_buf()));
        }

        let mut lexicons = vec![];
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with('.') || !name.ends_with(".csv") {
                continue;
            }
            if entry.path().is_file() {
                lexicons.push(entry.path());
            }
        }
        // Enumeration order is filesystem dependent.
        lexicons.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let existing = |name: &str| {
            let path = dir.join(name);
            path.is_file().then_some(path)
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            lexicons,
            matrix: existing("matrix.def"),
            char_def: existing("char.def"),
            unk_def: existing("unk.def"),
        })
    }

    /// 入力ディレクトリ
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 単語CSVファイル(処理順)
    pub fn lexicons(&self) -> &[PathBuf] {
        &self.lexicons
    }

    /// `matrix.def`
    pub fn matrix(&self) -> Option<&Path> {
        self.matrix.as_deref()
    }

    /// `char.def`
    pub fn char_def(&self) -> Option<&Path> {
        self.char_def.as_deref()
    }

    /// `unk.def`
    pub fn unk_def(&self) -> Option<&Path> {
        self.unk_def.as_deref()
    }
}

/// 5種類の出力ファイルのパス
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub lexicon: PathBuf,
    pub matrix: PathBuf,
    pub char_categories: PathBuf,
    pub char_mappings: PathBuf,
    pub unknown: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            lexicon: PathBuf::from("combined_dictionary.tsv"),
            matrix: PathBuf::from("cost_matrix.tsv"),
            char_categories: PathBuf::from("char_categories.tsv"),
            char_mappings: PathBuf::from("char_mappings.tsv"),
            unknown: PathBuf::from("unk_data.tsv"),
        }
    }
}

impl OutputPaths {
    /// すべての出力を同じディレクトリに既定のファイル名で配置します。
    pub fn in_dir<P>(dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        let defaults = Self::default();
        Self {
            lexicon: dir.join(defaults.lexicon),
            matrix: dir.join(defaults.matrix),
            char_categories: dir.join(defaults.char_categories),
            char_mappings: dir.join(defaults.char_mappings),
            unknown: dir.join(defaults.unknown),
        }
    }

    /// 種類に対応する出力パス
    pub fn path(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Lexicon => &self.lexicon,
            SourceKind::Matrix => &self.matrix,
            SourceKind::CharCategories => &self.char_categories,
            SourceKind::CharMappings => &self.char_mappings,
            SourceKind::Unknown => &self.unknown,
        }
    }

    /// 出力先の親ディレクトリをすべて作成します。
    pub fn prepare(&self) -> Result<()> {
        for kind in SourceKind::ALL {
            create_parent_dir(self.path(kind))?;
        }
        Ok(())
    }
}

/// ストリームごとの結果
#[derive(Debug)]
pub enum StreamOutcome {
    /// 出力ファイルを書き出した
    Written { path: PathBuf, stats: StreamStats },
    /// ソースファイルが存在しないため省略した
    Missing,
    /// 変換に失敗し、出力を破棄した
    Failed(TranscodeError),
}

/// ディレクトリ全体の変換結果
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<(SourceKind, StreamOutcome)>,
}

impl Report {
    /// 処理順に並んだ各ストリームの結果
    pub fn outcomes(&self) -> &[(SourceKind, StreamOutcome)] {
        &self.outcomes
    }

    /// 種類に対応する結果
    pub fn outcome(&self, kind: SourceKind) -> Option<&StreamOutcome> {
        self.outcomes
            .iter()
            .find_map(|(k, outcome)| (*k == kind).then_some(outcome))
    }

    /// 書き出しに成功したストリームの集計
    pub fn stats(&self, kind: SourceKind) -> Option<StreamStats> {
        match self.outcome(kind)? {
            StreamOutcome::Written { stats, .. } => Some(*stats),
            _ => None,
        }
    }

    /// 失敗したストリーム
    pub fn failures(&self) -> impl Iterator<Item = (SourceKind, &TranscodeError)> {
        self.outcomes.iter().filter_map(|(kind, outcome)| match outcome {
            StreamOutcome::Failed(e) => Some((*kind, e)),
            _ => None,
        })
    }

    /// 失敗したストリームがない場合に`true`を返します。
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// 辞書ディレクトリ全体を変換します。
///
/// 単語CSV、`matrix.def`、`char.def`(カテゴリと対応の2ストリーム)、`unk.def`の順に処理します。
/// 任意のソースが存在しない場合は[`Event::SourceMissing`]を通知して省略し、
/// 1つのストリームの失敗は他のストリームの処理を妨げません。
///
/// # 引数
///
/// * `input_dir` - IPADICのソースディレクトリ
/// * `outputs` - 出力先
/// * `observer` - イベントの通知先
///
/// # エラー
///
/// 入力ディレクトリが存在しない場合、または出力ディレクトリを作成できない場合にエラーを返します。
/// ストリーム単位の失敗は[`Report`]に記録されます。
pub fn transcode_dictionary<P, O>(
    input_dir: P,
    outputs: &OutputPaths,
    observer: &mut O,
) -> Result<Report>
where
    P: AsRef<Path>,
    O: Observer + ?Sized,
{
    let sources = DictionarySources::discover(input_dir)?;
    outputs.prepare()?;

    let mut report = Report::default();
    for kind in SourceKind::ALL {
        let output = outputs.path(kind);
        let result = match kind {
            SourceKind::Lexicon => Some(convert_lexicons(sources.lexicons(), output, observer)),
            SourceKind::Matrix => sources
                .matrix()
                .map(|input| convert_file(&MatrixRule, input, output, observer)),
            SourceKind::CharCategories => sources
                .char_def()
                .map(|input| convert_file(&CategoryRule, input, output, observer)),
            SourceKind::CharMappings => sources
                .char_def()
                .map(|input| convert_file(&MappingRule, input, output, observer)),
            SourceKind::Unknown => sources
                .unk_def()
                .map(|input| convert_file(&UnkRule, input, output, observer)),
        };

        let outcome = match result {
            Some(Ok(stats)) => StreamOutcome::Written {
                path: output.to_path_buf(),
                stats,
            },
            Some(Err(e)) => {
                observer.notify(&Event::StreamFailed {
                    kind,
                    message: e.to_string(),
                });
                StreamOutcome::Failed(e)
            }
            None => {
                observer.notify(&Event::SourceMissing {
                    kind,
                    path: sources.dir().join(kind.source_name()),
                });
                StreamOutcome::Missing
            }
        };
        report.outcomes.push((kind, outcome));
    }

    Ok(report)
}

/// 単語CSVファイル群を1つの出力に連結して変換します。
///
/// 入力は与えられた順に処理されます。
pub fn convert_lexicons<P, O>(inputs: &[P], output: &Path, observer: &mut O) -> Result<StreamStats>
where
    P: AsRef<Path>,
    O: Observer + ?Sized,
{
    let stats = write_atomically(output, |wtr| {
        let mut stats = StreamStats::default();
        for input in inputs {
            stats += transcode_source(&WordRule, input.as_ref(), wtr, observer)?;
        }
        Ok(stats)
    })?;
    observer.notify(&Event::StreamFinished {
        kind: SourceKind::Lexicon,
        path: output.to_path_buf(),
        stats,
    });
    Ok(stats)
}

/// 1つのソースファイルを規則に従って変換します。
///
/// # エラー
///
/// 読み書きに失敗した場合、または規則がレコードを不正と判断した場合にエラーを返します。
/// その場合`output`は作成も変更もされません。
pub fn convert_file<Rule, O>(
    rule: &Rule,
    input: &Path,
    output: &Path,
    observer: &mut O,
) -> Result<StreamStats>
where
    Rule: RecordRule + ?Sized,
    O: Observer + ?Sized,
{
    let stats = write_atomically(output, |wtr| {
        transcode_source(rule, input, wtr, observer)
    })?;
    observer.notify(&Event::StreamFinished {
        kind: rule.kind(),
        path: output.to_path_buf(),
        stats,
    });
    Ok(stats)
}

/// `char.def`からカテゴリ定義と文字コード対応の2つの出力を生成します。
///
/// ソースは2回読み込まれます。
pub fn convert_char_def<O>(
    input: &Path,
    categories_output: &Path,
    mappings_output: &Path,
    observer: &mut O,
) -> Result<(StreamStats, StreamStats)>
where
    O: Observer + ?Sized,
{
    let categories = convert_file(&CategoryRule, input, categories_output, observer)?;
    let mappings = convert_file(&MappingRule, input, mappings_output, observer)?;
    Ok((categories, mappings))
}

fn transcode_source<Rule, W, O>(
    rule: &Rule,
    input: &Path,
    wtr: &mut W,
    observer: &mut O,
) -> Result<StreamStats>
where
    Rule: RecordRule + ?Sized,
    W: Write + ?Sized,
    O: Observer + ?Sized,
{
    observer.notify(&Event::SourceStarted {
        kind: rule.kind(),
        path: input.to_path_buf(),
    });
    let rdr = BufReader::new(File::open(input)?);
    pipeline::transcode(rule, rdr, wtr, observer)
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(fs::create_dir_all(dir)?),
        _ => Ok(()),
    }
}

/// `output`と同じディレクトリの一時ファイルに書き出し、成功した場合のみ移動します。
fn write_atomically<F>(output: &Path, f: F) -> Result<StreamStats>
where
    F: FnOnce(&mut dyn Write) -> Result<StreamStats>,
{
    if output.file_name().is_none() {
        return Err(TranscodeError::invalid_argument(
            "output",
            format!("'{}' does not name a file", output.display()),
        ));
    }
    create_parent_dir(output)?;
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    let stats = {
        let mut wtr = BufWriter::new(temp_file.as_file_mut());
        let stats = f(&mut wtr)?;
        wtr.flush()?;
        stats
    };
    temp_file.persist(output)?;
    Ok(stats)
}

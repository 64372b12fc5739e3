//! 汎用のレコード変換パイプライン
//!
//! すべてのソースは「デコード → 行の選択 → 分割 → フィールド数の検査 → 射影 → 出力」
//! という同じ流れで処理されます。ソースごとの違いは [`RecordRule`] の実装に閉じ込められ、
//! 制御フローは [`transcode()`] だけが持ちます。

use std::io::{self, BufRead, Write};
use std::ops::AddAssign;

use crate::codec::{Codec, LineReader};
use crate::errors::{Result, TranscodeError};
use crate::observer::{Event, Observer, SourceKind};
use crate::utils;

/// フィールドの区切り方
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// 引用符を考慮したカンマ区切り
    Csv,
    /// 空白文字の連続による区切り
    Whitespace,
}

impl Delimiter {
    /// 行をフィールドに分割します。
    pub fn split(&self, text: &str) -> Vec<String> {
        match self {
            Self::Csv => utils::parse_csv_row(text),
            Self::Whitespace => text.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// レコードに要求されるフィールド数
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// 指定数以上
    AtLeast(usize),
    /// 指定数ちょうど
    Exactly(usize),
}

impl Arity {
    /// フィールド数が条件を満たすかどうかを返します。
    pub const fn accepts(&self, n: usize) -> bool {
        match *self {
            Self::AtLeast(m) => n >= m,
            Self::Exactly(m) => n == m,
        }
    }

    /// 要求されるフィールド数を返します。
    pub const fn required(&self) -> usize {
        match *self {
            Self::AtLeast(m) | Self::Exactly(m) => m,
        }
    }
}

/// フィールド数が条件を満たさない場合の扱い
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mismatch {
    /// レコードを読み飛ばして続行します。
    Skip,
    /// ストリーム全体を失敗させます。
    Fail,
}

/// 分割済みのレコード
#[derive(Debug, PartialEq, Eq)]
pub struct Record {
    /// 1始まりの物理行番号
    pub line: usize,
    /// 選択されたレコードの中での0始まりの順番
    pub index: usize,
    /// フィールド
    pub fields: Vec<String>,
}

/// タブ区切りの1行として書き出せる値
pub trait TsvRow {
    /// 改行まで含めた1行を書き出します。
    fn write_tsv<W>(&self, wtr: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized;
}

/// ソースごとの抽出規則
pub trait RecordRule {
    /// 1レコードから生成される出力
    type Entry: TsvRow;

    /// 出力ストリームの種類
    fn kind(&self) -> SourceKind;

    /// エラーメッセージに使用されるソース名
    fn name(&self) -> &'static str {
        self.kind().source_name()
    }

    /// ソースのエンコーディングとデコードポリシー
    fn codec(&self) -> Codec;

    /// フィールドの区切り方
    fn delimiter(&self) -> Delimiter;

    /// `index`番目のレコードに要求されるフィールド数
    fn arity(&self, index: usize) -> Arity;

    /// フィールド数が条件を満たさない場合の扱い
    fn mismatch(&self) -> Mismatch {
        Mismatch::Skip
    }

    /// 処理対象の行であれば、分割すべき部分を返します。
    ///
    /// デフォルトでは空白のみの行を除外します。
    fn select<'a>(&self, line: &'a str) -> Option<&'a str> {
        (!line.trim().is_empty()).then_some(line)
    }

    /// [`Mismatch::Fail`]の場合に返すエラー
    fn mismatch_error(&self, record: &Record, arity: Arity) -> TranscodeError {
        TranscodeError::malformed_record(
            self.name(),
            record.line,
            format!(
                "expected {} fields, found {}",
                arity.required(),
                record.fields.len()
            ),
        )
    }

    /// フィールド数の条件を満たしたレコードを出力に変換します。
    fn project(&self, record: Record) -> Result<Self::Entry>;

    /// 入力の終端で呼ばれます。`records`は選択されたレコードの総数です。
    fn finish(&self, _records: usize) -> Result<()> {
        Ok(())
    }
}

/// ストリームごとの集計
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// 書き出した行数
    pub written: usize,
    /// フィールド不足で読み飛ばしたレコード数
    pub skipped: usize,
    /// 置換文字を含むことになった行数
    pub replaced: usize,
}

impl AddAssign for StreamStats {
    fn add_assign(&mut self, rhs: Self) {
        self.written += rhs.written;
        self.skipped += rhs.skipped;
        self.replaced += rhs.replaced;
    }
}

/// 規則に従って1つのソースを変換し、`wtr`に書き出します。
///
/// # 引数
///
/// * `rule` - 抽出規則
/// * `rdr` - ソースのリーダー
/// * `wtr` - 出力先
/// * `observer` - イベントの通知先
///
/// # 戻り値
///
/// このソースについての集計
///
/// # エラー
///
/// 読み書きに失敗した場合、または規則がレコードを不正と判断した場合にエラーを返します。
/// エラー時に`wtr`へ書き出し済みの内容は呼び出し側で破棄する必要があります。
pub fn transcode<Rule, R, W, O>(
    rule: &Rule,
    rdr: R,
    wtr: &mut W,
    observer: &mut O,
) -> Result<StreamStats>
where
    Rule: RecordRule + ?Sized,
    R: BufRead,
    W: Write + ?Sized,
    O: Observer + ?Sized,
{
    let kind = rule.kind();
    let delimiter = rule.delimiter();
    let mut lines = LineReader::new(rdr, rule.codec(), rule.name());
    let mut stats = StreamStats::default();
    let mut index = 0;

    while let Some(line) = lines.next_line()? {
        if line.replaced {
            stats.replaced += 1;
            observer.notify(&Event::DecodeReplaced {
                kind,
                line: line.number,
            });
        }
        let Some(body) = rule.select(&line.text) else {
            continue;
        };
        let record = Record {
            line: line.number,
            index,
            fields: delimiter.split(body),
        };
        index += 1;

        let arity = rule.arity(record.index);
        if !arity.accepts(record.fields.len()) {
            match rule.mismatch() {
                Mismatch::Skip => {
                    stats.skipped += 1;
                    observer.notify(&Event::RecordSkipped {
                        kind,
                        line: record.line,
                        fields: record.fields.len(),
                        required: arity.required(),
                    });
                    continue;
                }
                Mismatch::Fail => return Err(rule.mismatch_error(&record, arity)),
            }
        }

        rule.project(record)?.write_tsv(wtr)?;
        stats.written += 1;
    }
    rule.finish(index)?;

    Ok(stats)
}

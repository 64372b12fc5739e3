//! IPADICの各ソースファイルに対する抽出規則
//!
//! | 規則 | ソース | コーデック | 区切り | フィールド数 | 不足時 |
//! |---|---|---|---|---|---|
//! | [`WordRule`] | `*.csv` | EUC-JP(置換) | CSV | 12以上 | 読み飛ばし |
//! | [`MatrixRule`] | `matrix.def` | UTF-8(厳格) | 空白 | 2(1行目)/3 | 失敗 |
//! | [`CategoryRule`] | `char.def` | EUC-JP(置換) | 空白 | 4以上 | 読み飛ばし |
//! | [`MappingRule`] | `char.def` | EUC-JP(置換) | 空白 | 2以上 | 読み飛ばし |
//! | [`UnkRule`] | `unk.def` | EUC-JP(置換) | CSV | 4以上 | 読み飛ばし |

use std::mem;
use std::str::FromStr;

use crate::codec::Codec;
use crate::errors::{Result, TranscodeError};
use crate::kana;
use crate::observer::SourceKind;
use crate::pipeline::{Arity, Delimiter, Mismatch, Record, RecordRule};
use crate::record::{CharCategory, CharMapping, MatrixLine, UnkEntry, WordEntry};
use crate::utils;

/// 単語CSVのうち読みが格納されているフィールドの位置
const READING_FIELD: usize = 11;

/// 単語CSV(`*.csv`)の規則
#[derive(Clone, Copy, Debug, Default)]
pub struct WordRule;

impl RecordRule for WordRule {
    type Entry = WordEntry;

    fn kind(&self) -> SourceKind {
        SourceKind::Lexicon
    }

    fn codec(&self) -> Codec {
        Codec::euc_jp_lenient()
    }

    fn delimiter(&self) -> Delimiter {
        Delimiter::Csv
    }

    fn arity(&self, _index: usize) -> Arity {
        Arity::AtLeast(READING_FIELD + 1)
    }

    fn project(&self, record: Record) -> Result<WordEntry> {
        let mut fields = record.fields;
        Ok(WordEntry {
            reading: kana::katakana_to_hiragana(&fields[READING_FIELD]),
            surface: mem::take(&mut fields[0]),
            left_id: mem::take(&mut fields[1]),
            right_id: mem::take(&mut fields[2]),
            cost: mem::take(&mut fields[3]),
        })
    }
}

/// 連接コスト行列(`matrix.def`)の規則
///
/// 1行目は2つの整数、以降は3つの整数でなければならず、違反した時点で失敗します。
#[derive(Clone, Copy, Debug, Default)]
pub struct MatrixRule;

impl MatrixRule {
    fn parse<T>(record: &Record, i: usize) -> Result<T>
    where
        T: FromStr,
    {
        let field = &record.fields[i];
        field.parse().map_err(|_| {
            let msg = format!("{field:?} is not a valid integer");
            if record.index == 0 {
                TranscodeError::malformed_header("matrix.def", msg)
            } else {
                TranscodeError::malformed_record("matrix.def", record.line, msg)
            }
        })
    }
}

impl RecordRule for MatrixRule {
    type Entry = MatrixLine;

    fn kind(&self) -> SourceKind {
        SourceKind::Matrix
    }

    fn codec(&self) -> Codec {
        Codec::utf8_strict()
    }

    fn delimiter(&self) -> Delimiter {
        Delimiter::Whitespace
    }

    fn arity(&self, index: usize) -> Arity {
        if index == 0 {
            Arity::Exactly(2)
        } else {
            Arity::Exactly(3)
        }
    }

    fn mismatch(&self) -> Mismatch {
        Mismatch::Fail
    }

    fn mismatch_error(&self, record: &Record, arity: Arity) -> TranscodeError {
        let msg = format!(
            "expected {} integers, found {} fields",
            arity.required(),
            record.fields.len()
        );
        if record.index == 0 {
            TranscodeError::malformed_header(self.name(), msg)
        } else {
            TranscodeError::malformed_record(self.name(), record.line, msg)
        }
    }

    fn project(&self, record: Record) -> Result<MatrixLine> {
        if record.index == 0 {
            Ok(MatrixLine::Header {
                num_left: Self::parse(&record, 0)?,
                num_right: Self::parse(&record, 1)?,
            })
        } else {
            Ok(MatrixLine::Entry {
                left_id: Self::parse(&record, 0)?,
                right_id: Self::parse(&record, 1)?,
                cost: Self::parse(&record, 2)?,
            })
        }
    }

    fn finish(&self, records: usize) -> Result<()> {
        if records == 0 {
            return Err(TranscodeError::malformed_header(
                self.name(),
                "the file has no header line",
            ));
        }
        Ok(())
    }
}

/// `char.def`のカテゴリ定義行の規則
#[derive(Clone, Copy, Debug, Default)]
pub struct CategoryRule;

impl RecordRule for CategoryRule {
    type Entry = CharCategory;

    fn kind(&self) -> SourceKind {
        SourceKind::CharCategories
    }

    fn codec(&self) -> Codec {
        Codec::euc_jp_lenient()
    }

    fn delimiter(&self) -> Delimiter {
        Delimiter::Whitespace
    }

    fn arity(&self, _index: usize) -> Arity {
        Arity::AtLeast(4)
    }

    fn select<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("0x") {
            return None;
        }
        Some(utils::strip_comment(line))
    }

    fn project(&self, record: Record) -> Result<CharCategory> {
        let mut fields = record.fields;
        Ok(CharCategory {
            name: mem::take(&mut fields[0]),
            invoke: mem::take(&mut fields[1]),
            group: mem::take(&mut fields[2]),
            length: mem::take(&mut fields[3]),
        })
    }
}

/// `char.def`の文字コード対応行(`0x`で始まる行)の規則
#[derive(Clone, Copy, Debug, Default)]
pub struct MappingRule;

impl RecordRule for MappingRule {
    type Entry = CharMapping;

    fn kind(&self) -> SourceKind {
        SourceKind::CharMappings
    }

    fn codec(&self) -> Codec {
        Codec::euc_jp_lenient()
    }

    fn delimiter(&self) -> Delimiter {
        Delimiter::Whitespace
    }

    fn arity(&self, _index: usize) -> Arity {
        Arity::AtLeast(2)
    }

    fn select<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = line.trim();
        line.starts_with("0x").then(|| utils::strip_comment(line))
    }

    fn project(&self, record: Record) -> Result<CharMapping> {
        let mut fields = record.fields.into_iter();
        let range = fields.next().unwrap_or_default();
        let (start, end) = match range.split_once("..") {
            Some((start, end)) => (start.to_string(), Some(end.to_string())),
            None => (range, None),
        };
        Ok(CharMapping {
            start,
            end,
            categories: fields.collect(),
        })
    }
}

/// 未知語定義(`unk.def`)の規則
#[derive(Clone, Copy, Debug, Default)]
pub struct UnkRule;

impl RecordRule for UnkRule {
    type Entry = UnkEntry;

    fn kind(&self) -> SourceKind {
        SourceKind::Unknown
    }

    fn codec(&self) -> Codec {
        Codec::euc_jp_lenient()
    }

    fn delimiter(&self) -> Delimiter {
        Delimiter::Csv
    }

    fn arity(&self, _index: usize) -> Arity {
        Arity::AtLeast(4)
    }

    fn project(&self, record: Record) -> Result<UnkEntry> {
        let mut fields = record.fields;
        Ok(UnkEntry {
            category: mem::take(&mut fields[0]),
            left_id: mem::take(&mut fields[1]),
            right_id: mem::take(&mut fields[2]),
            cost: mem::take(&mut fields[3]),
        })
    }
}

//! 出力されるレコードの型
//!
//! 各型はソースの1行から生成され、直ちにタブ区切りの1行として書き出されます。

use std::io::{self, Write};

use crate::pipeline::TsvRow;

/// 単語エントリ
///
/// 出力順は `reading, left_id, right_id, cost, surface` です。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    /// 表層形
    pub surface: String,
    /// 左文脈ID
    pub left_id: String,
    /// 右文脈ID
    pub right_id: String,
    /// 生起コスト
    pub cost: String,
    /// ひらがなに変換された読み
    pub reading: String,
}

impl TsvRow for WordEntry {
    fn write_tsv<W>(&self, wtr: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        writeln!(
            wtr,
            "{}\t{}\t{}\t{}\t{}",
            self.reading, self.left_id, self.right_id, self.cost, self.surface
        )
    }
}

/// `matrix.def`の1行
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixLine {
    /// 1行目: 左右の文脈IDの数
    Header { num_left: u32, num_right: u32 },
    /// 2行目以降: 連接コスト
    Entry {
        left_id: u32,
        right_id: u32,
        cost: i32,
    },
}

impl TsvRow for MatrixLine {
    fn write_tsv<W>(&self, wtr: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        match *self {
            Self::Header {
                num_left,
                num_right,
            } => writeln!(wtr, "{num_left}\t{num_right}"),
            Self::Entry {
                left_id,
                right_id,
                cost,
            } => writeln!(wtr, "{left_id}\t{right_id}\t{cost}"),
        }
    }
}

/// 文字カテゴリの定義
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharCategory {
    pub name: String,
    pub invoke: String,
    pub group: String,
    pub length: String,
}

impl TsvRow for CharCategory {
    fn write_tsv<W>(&self, wtr: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        writeln!(
            wtr,
            "{}\t{}\t{}\t{}",
            self.name, self.invoke, self.group, self.length
        )
    }
}

/// 文字コード(または範囲)とカテゴリの対応
///
/// 範囲でない場合も終端の列は空文字列として出力され、列数は変わりません。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharMapping {
    /// 先頭のコードポイント(`0x`付き16進表記のまま)
    pub start: String,
    /// 範囲の終端。単一のコードポイントの場合は`None`
    pub end: Option<String>,
    /// カテゴリ名(1つ以上)
    pub categories: Vec<String>,
}

impl TsvRow for CharMapping {
    fn write_tsv<W>(&self, wtr: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        write!(wtr, "{}\t{}", self.start, self.end.as_deref().unwrap_or(""))?;
        for category in &self.categories {
            write!(wtr, "\t{category}")?;
        }
        writeln!(wtr)
    }
}

/// 未知語定義
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnkEntry {
    pub category: String,
    pub left_id: String,
    pub right_id: String,
    pub cost: String,
}

impl TsvRow for UnkEntry {
    fn write_tsv<W>(&self, wtr: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        writeln!(
            wtr,
            "{}\t{}\t{}\t{}",
            self.category, self.left_id, self.right_id, self.cost
        )
    }
}

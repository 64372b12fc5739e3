//! 変換処理の進捗と診断イベントの通知
//!
//! ライブラリはコンソールに直接出力しません。処理中の事象はすべて [`Event`] として
//! [`Observer`] に渡され、表示方法は呼び出し側が決定します。

use std::fmt;
use std::path::PathBuf;

use crate::pipeline::StreamStats;

/// 出力ストリームの種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// 単語エントリ(`*.csv`)
    Lexicon,
    /// 連接コスト行列(`matrix.def`)
    Matrix,
    /// 文字カテゴリ定義(`char.def`)
    CharCategories,
    /// 文字コードとカテゴリの対応(`char.def`)
    CharMappings,
    /// 未知語定義(`unk.def`)
    Unknown,
}

impl SourceKind {
    /// すべての種類を処理順に並べたもの
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Lexicon,
        SourceKind::Matrix,
        SourceKind::CharCategories,
        SourceKind::CharMappings,
        SourceKind::Unknown,
    ];

    /// 入力となるソースファイルの名前を返します。
    pub const fn source_name(&self) -> &'static str {
        match self {
            Self::Lexicon => "*.csv",
            Self::Matrix => "matrix.def",
            Self::CharCategories | Self::CharMappings => "char.def",
            Self::Unknown => "unk.def",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Lexicon => "lexicon",
            Self::Matrix => "matrix",
            Self::CharCategories => "char categories",
            Self::CharMappings => "char mappings",
            Self::Unknown => "unknown words",
        };
        f.write_str(s)
    }
}

/// 変換中に発生する事象
///
/// 行番号は直前の [`Event::SourceStarted`] が示すファイル内での1始まりの番号です。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// ソースファイルの処理を開始した
    SourceStarted { kind: SourceKind, path: PathBuf },
    /// 任意のソースファイルが存在しないため、そのストリームを省略した
    SourceMissing { kind: SourceKind, path: PathBuf },
    /// フィールド数が不足しているレコードを読み飛ばした
    RecordSkipped {
        kind: SourceKind,
        line: usize,
        fields: usize,
        required: usize,
    },
    /// 不正なバイト列を置換文字に置き換えた
    DecodeReplaced { kind: SourceKind, line: usize },
    /// 出力ストリームを書き終えた
    StreamFinished {
        kind: SourceKind,
        path: PathBuf,
        stats: StreamStats,
    },
    /// 出力ストリームの生成に失敗し、出力を破棄した
    StreamFailed { kind: SourceKind, message: String },
}

/// イベントの受け手
pub trait Observer {
    /// イベントを受け取ります。
    fn notify(&mut self, event: &Event);
}

impl<O> Observer for &mut O
where
    O: Observer + ?Sized,
{
    fn notify(&mut self, event: &Event) {
        (**self).notify(event)
    }
}

/// すべてのイベントを無視するオブザーバー
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn notify(&mut self, _event: &Event) {}
}

/// 受け取ったイベントを順に記録するオブザーバー
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// 空の記録を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録されたイベントを返します。
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// 読み飛ばされたレコードの行番号を種類ごとに返します。
    pub fn skipped_lines(&self, kind: SourceKind) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::RecordSkipped { kind: k, line, .. } if *k == kind => Some(*line),
                _ => None,
            })
            .collect()
    }
}

impl Observer for EventLog {
    fn notify(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

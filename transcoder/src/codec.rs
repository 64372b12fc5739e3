//! ソースファイルのデコード
//!
//! 辞書ソースは行単位でストリーム処理されます。各物理行はバイト列として読み込まれ、
//! 宣言されたエンコーディングとデコードポリシーに従って文字列に変換されます。
//!
//! EUC-JPとUTF-8のいずれでも、マルチバイト列の中にLF(0x0A)が現れることはないため、
//! デコード前にLFで行を区切っても文字が分断されることはありません。

use std::io::BufRead;

use encoding_rs::{Encoding, EUC_JP, UTF_8};

use crate::errors::{Result, TranscodeError};

/// 不正なバイト列に対する扱い
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodePolicy {
    /// 不正なバイト列をU+FFFDに置き換えて処理を続行します。
    Replace,
    /// 不正なバイト列を[`TranscodeError::Decode`]として扱います。
    Strict,
}

/// エンコーディングとデコードポリシーの組
#[derive(Clone, Copy, Debug)]
pub struct Codec {
    encoding: &'static Encoding,
    policy: DecodePolicy,
}

impl Codec {
    /// 新しいコーデックを作成します。
    pub const fn new(encoding: &'static Encoding, policy: DecodePolicy) -> Self {
        Self { encoding, policy }
    }

    /// 置換ポリシー付きのEUC-JP。`*.csv`、`char.def`、`unk.def`で使用されます。
    pub fn euc_jp_lenient() -> Self {
        Self::new(EUC_JP, DecodePolicy::Replace)
    }

    /// 厳格なUTF-8。`matrix.def`で使用されます。
    pub fn utf8_strict() -> Self {
        Self::new(UTF_8, DecodePolicy::Strict)
    }

    /// エンコーディングを返します。
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// デコードポリシーを返します。
    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// 1行分のバイト列をデコードします。
    ///
    /// # 戻り値
    ///
    /// デコード結果と、置換が発生したかどうかの組。
    /// 厳格ポリシーで不正なバイト列が見つかった場合は`None`を返します。
    pub fn decode(&self, bytes: &[u8]) -> Option<(String, bool)> {
        match self.policy {
            DecodePolicy::Replace => {
                let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
                Some((text.into_owned(), had_errors))
            }
            DecodePolicy::Strict => self
                .encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| (text.into_owned(), false)),
        }
    }
}

/// デコード済みの1行
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedLine {
    /// 1始まりの物理行番号
    pub number: usize,
    /// 改行文字を除いた行の内容
    pub text: String,
    /// 置換文字への置き換えが発生したかどうか
    pub replaced: bool,
}

/// バイトストリームを1行ずつデコードするリーダー
pub struct LineReader<R> {
    rdr: R,
    codec: Codec,
    name: &'static str,
    buf: Vec<u8>,
    number: usize,
}

impl<R> LineReader<R>
where
    R: BufRead,
{
    /// 新しいリーダーを作成します。
    ///
    /// # 引数
    ///
    /// * `rdr` - 入力元
    /// * `codec` - 使用するコーデック
    /// * `name` - エラーメッセージに使用されるソース名
    pub fn new(rdr: R, codec: Codec, name: &'static str) -> Self {
        Self {
            rdr,
            codec,
            name,
            buf: vec![],
            number: 0,
        }
    }

    /// 次の行を読み込みます。
    ///
    /// # 戻り値
    ///
    /// 入力の終端に達した場合は`Ok(None)`を返します。
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、または厳格ポリシーで不正なバイト列が見つかった場合に
    /// エラーを返します。
    pub fn next_line(&mut self) -> Result<Option<DecodedLine>> {
        self.buf.clear();
        if self.rdr.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;

        let mut bytes = self.buf.as_slice();
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest;
        }
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }

        let (text, replaced) =
            self.codec
                .decode(bytes)
                .ok_or_else(|| TranscodeError::Decode {
                    name: self.name,
                    encoding: self.codec.encoding.name(),
                    line: self.number,
                })?;
        Ok(Some(DecodedLine {
            number: self.number,
            text,
            replaced,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn euc_jp(text: &str) -> Vec<u8> {
        EUC_JP.encode(text).0.into_owned()
    }

    #[test]
    fn test_read_euc_jp_lines() {
        let mut src = euc_jp("東京,1\r\n");
        src.extend(euc_jp("キョウト,2"));
        let mut rdr = LineReader::new(src.as_slice(), Codec::euc_jp_lenient(), "test.csv");

        let line = rdr.next_line().unwrap().unwrap();
        assert_eq!(line.number, 1);
        assert_eq!(line.text, "東京,1");
        assert!(!line.replaced);

        let line = rdr.next_line().unwrap().unwrap();
        assert_eq!(line.number, 2);
        assert_eq!(line.text, "キョウト,2");

        assert!(rdr.next_line().unwrap().is_none());
    }

    #[test]
    fn test_replace_invalid_bytes() {
        let src: &[u8] = b"a\xff\xfeb\nc\n";
        let mut rdr = LineReader::new(src, Codec::euc_jp_lenient(), "test.csv");

        let line = rdr.next_line().unwrap().unwrap();
        assert!(line.replaced);
        assert!(line.text.starts_with('a'));
        assert!(line.text.ends_with('b'));
        assert!(line.text.contains('\u{FFFD}'));

        let line = rdr.next_line().unwrap().unwrap();
        assert_eq!(line.text, "c");
        assert!(!line.replaced);
    }

    #[test]
    fn test_strict_invalid_bytes() {
        let src: &[u8] = b"5 3\n0 0 \xff\n";
        let mut rdr = LineReader::new(src, Codec::utf8_strict(), "matrix.def");

        assert_eq!(rdr.next_line().unwrap().unwrap().text, "5 3");
        match rdr.next_line() {
            Err(TranscodeError::Decode { name, line, .. }) => {
                assert_eq!(name, "matrix.def");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

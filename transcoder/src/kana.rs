//! カタカナからひらがなへの変換
//!
//! 読みフィールドはカタカナで記述されているため、出力前にひらがなへ写像します。

/// 変換対象となるカタカナの先頭(ァ)
const KATAKANA_FIRST: u32 = 0x30A1;

/// 変換対象となるカタカナの末尾(ヶ)
const KATAKANA_LAST: u32 = 0x30F6;

/// カタカナとひらがなのコードポイントの差
const KANA_OFFSET: u32 = 0x60;

/// 1文字をひらがなに写像します。
///
/// U+30A1..=U+30F6 の範囲の文字は U+3041..=U+3096 に移され、
/// それ以外の文字はそのまま返されます。
#[inline(always)]
pub fn remap_char(c: char) -> char {
    let code = u32::from(c);
    if (KATAKANA_FIRST..=KATAKANA_LAST).contains(&code) {
        // The shifted value always lies in the hiragana block.
        char::from_u32(code - KANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

/// 文字列中のカタカナをひらがなに変換します。
///
/// # 例
///
/// ```
/// use ipadic_transcoder::kana::katakana_to_hiragana;
///
/// assert_eq!(katakana_to_hiragana("トウキョウ"), "とうきょう");
/// assert_eq!(katakana_to_hiragana("ラーメン"), "らーめん");
/// ```
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars().map(remap_char).collect()
}

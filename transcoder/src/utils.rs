//! ユーティリティ関数
//!
//! CSV行の解析と、区切り文字ごとのフィールド分割を提供します。

use csv_core::ReadFieldResult;

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
/// 空行に対しては空のフィールドを1つ含むベクターを返します。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列(改行を含まない1レコード)
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # 例
///
/// ```
/// # use ipadic_transcoder::utils::parse_csv_row;
/// let fields = parse_csv_row("名詞,トスカーナ");
/// assert_eq!(fields, vec!["名詞", "トスカーナ"]);
///
/// let fields_with_quote = parse_csv_row("名詞,\"1,2-ジクロロエタン\"");
/// assert_eq!(fields_with_quote, vec!["名詞", "1,2-ジクロロエタン"]);
/// ```
pub fn parse_csv_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        let end = match result {
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::End => true,
        };
        // Only ASCII quotes are removed, so the bytes stay valid UTF-8.
        fields.push(String::from_utf8_lossy(&field).into_owned());
        field.clear();
        if end {
            break;
        }
    }
    fields
}

/// 行末のコメント(`#`以降)を取り除きます。
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_row() {
        assert_eq!(
            &["名詞", "トスカーナ"],
            parse_csv_row("名詞,トスカーナ").as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_with_quote() {
        assert_eq!(
            &["名詞", "1,2-ジクロロエタン"],
            parse_csv_row("名詞,\"1,2-ジクロロエタン\"").as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_trailing_empty_field() {
        assert_eq!(&["a", "b", ""], parse_csv_row("a,b,").as_slice());
    }

    #[test]
    fn test_parse_csv_row_long_field() {
        let long = "あ".repeat(3000);
        let row = format!("{long},x");
        let fields = parse_csv_row(&row);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], long);
        assert_eq!(fields[1], "x");
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("KANJI 1 0 2 # ideographs"), "KANJI 1 0 2");
        assert_eq!(strip_comment("0x3041 HIRAGANA"), "0x3041 HIRAGANA");
        assert_eq!(strip_comment("# only a comment"), "");
    }
}

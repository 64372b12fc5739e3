//! 変換処理のテストモジュール群
//!
//! 各抽出規則とディレクトリ単位の変換を、`resources`以下のソースを使って検証します。

mod rules;

use encoding_rs::EUC_JP;

/// テスト用のソースをEUC-JPに変換します。
pub(crate) fn euc_jp(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = EUC_JP.encode(text);
    assert!(!had_errors, "unmappable character in fixture");
    bytes.into_owned()
}

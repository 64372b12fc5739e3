use crate::errors::TranscodeError;
use crate::observer::{Event, EventLog, SourceKind};
use crate::pipeline::{transcode, RecordRule, StreamStats};
use crate::rules::*;
use crate::tests::euc_jp;

const NOUN_CSV: &str = include_str!("./resources/noun.csv");
const VERB_CSV: &str = include_str!("./resources/verb.csv");
const MATRIX_DEF: &str = include_str!("./resources/matrix.def");
const CHAR_DEF: &str = include_str!("./resources/char.def");
const UNK_DEF: &str = include_str!("./resources/unk.def");

fn run<Rule>(rule: &Rule, src: &[u8]) -> (Result<StreamStats, TranscodeError>, String, EventLog)
where
    Rule: RecordRule,
{
    let mut out = vec![];
    let mut log = EventLog::new();
    let result = transcode(rule, src, &mut out, &mut log);
    (result, String::from_utf8(out).unwrap(), log)
}

#[test]
fn test_word_rule() {
    let (result, out, log) = run(&WordRule, &euc_jp(NOUN_CSV));

    assert_eq!(
        out,
        "いっぱい\t1285\t1285\t3640\tいっぱい\n\
         とすかーな\t1293\t1293\t9117\tトスカーナ\n\
         いちにじくろろえたん\t1285\t1285\t5000\t1,2-ジクロロエタン\n\
         かげつ\t1285\t1285\t4000\tヶ月\n"
    );
    assert_eq!(result.unwrap().written, 4);
    assert!(log.events().is_empty());
}

#[test]
fn test_word_rule_outputs_five_columns() {
    let (_, out, _) = run(&WordRule, &euc_jp(NOUN_CSV));
    for line in out.lines() {
        assert_eq!(line.split('\t').count(), 5, "{line:?}");
    }
}

#[test]
fn test_word_rule_skips_underfilled_record() {
    let (result, out, log) = run(&WordRule, &euc_jp(VERB_CSV));

    assert_eq!(out, "はしる\t772\t772\t5767\t走る\n");
    assert_eq!(
        result.unwrap(),
        StreamStats {
            written: 1,
            skipped: 1,
            replaced: 0,
        }
    );
    assert_eq!(
        log.events(),
        &[Event::RecordSkipped {
            kind: SourceKind::Lexicon,
            line: 2,
            fields: 3,
            required: 12,
        }]
    );
}

#[test]
fn test_word_rule_continues_after_underfilled_record() {
    let src = "短い,1\n走る,772,772,5767,動詞,自立,*,*,五段・ラ行,基本形,走る,ハシル,ハシル\n";
    let (result, out, log) = run(&WordRule, &euc_jp(src));

    assert_eq!(out, "はしる\t772\t772\t5767\t走る\n");
    assert_eq!(result.unwrap().skipped, 1);
    assert_eq!(log.skipped_lines(SourceKind::Lexicon), vec![1]);
}

#[test]
fn test_word_rule_replaces_invalid_bytes() {
    let mut src = euc_jp("走る,772,772,5767,動詞,自立,*,*,五段・ラ行,基本形,走る,ハシ");
    src.extend_from_slice(b"\xff");
    src.extend(euc_jp("ル,ハシル\n"));
    let (result, out, log) = run(&WordRule, &src);

    assert_eq!(out, "はし\u{FFFD}る\t772\t772\t5767\t走る\n");
    assert_eq!(result.unwrap().replaced, 1);
    assert_eq!(
        log.events(),
        &[Event::DecodeReplaced {
            kind: SourceKind::Lexicon,
            line: 1,
        }]
    );
}

#[test]
fn test_matrix_rule() {
    let (result, out, _) = run(&MatrixRule, MATRIX_DEF.as_bytes());

    assert_eq!(
        out,
        "3\t3\n0\t0\t0\n0\t1\t863\n0\t2\t-3689\n1\t0\t-1\n1\t1\t200\n\
         1\t2\t-50\n2\t0\t12\n2\t1\t-2490\n2\t2\t0\n"
    );
    assert_eq!(result.unwrap().written, 10);
}

#[test]
fn test_matrix_rule_skips_blank_lines() {
    let (result, out, _) = run(&MatrixRule, b"5 3\n0 0 100\n\n4 2 -50\n");

    assert_eq!(out, "5\t3\n0\t0\t100\n4\t2\t-50\n");
    assert_eq!(result.unwrap().written, 3);
}

#[test]
fn test_matrix_rule_non_numeric_header() {
    let (result, out, _) = run(&MatrixRule, b"abc\n0 0 100\n");

    assert!(matches!(
        result,
        Err(TranscodeError::MalformedHeader { .. })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_matrix_rule_header_with_non_integer_value() {
    let (result, out, _) = run(&MatrixRule, b"5 x\n");

    assert!(matches!(
        result,
        Err(TranscodeError::MalformedHeader { .. })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_matrix_rule_empty_file() {
    let (result, _, _) = run(&MatrixRule, b"\n\n");

    assert!(matches!(
        result,
        Err(TranscodeError::MalformedHeader { .. })
    ));
}

#[test]
fn test_matrix_rule_malformed_record() {
    let (result, _, _) = run(&MatrixRule, b"5 3\n0 0 100\n\n4 2\n1 1 1\n");

    match result {
        Err(TranscodeError::MalformedRecord { name, line, .. }) => {
            assert_eq!(name, "matrix.def");
            assert_eq!(line, 4);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_matrix_rule_non_numeric_cost() {
    let (result, _, _) = run(&MatrixRule, b"5 3\n0 0 x\n");

    assert!(matches!(
        result,
        Err(TranscodeError::MalformedRecord { line: 2, .. })
    ));
}

#[test]
fn test_matrix_rule_is_strict() {
    let (result, _, _) = run(&MatrixRule, b"5 3\n0 0 \xa4\xa2\n");

    assert!(matches!(
        result,
        Err(TranscodeError::Decode { line: 2, .. })
    ));
}

#[test]
fn test_category_rule() {
    let (result, out, log) = run(&CategoryRule, &euc_jp(CHAR_DEF));

    assert_eq!(
        out,
        "DEFAULT\t0\t1\t0\n\
         SPACE\t0\t1\t0\n\
         KANJI\t0\t0\t2\n\
         SYMBOL\t1\t1\t0\n\
         NUMERIC\t1\t1\t0\n\
         ALPHA\t1\t1\t0\n\
         HIRAGANA\t0\t1\t2\n\
         KATAKANA\t1\t1\t2\n\
         KANJINUMERIC\t1\t1\t0\n"
    );
    assert_eq!(result.unwrap().written, 9);
    assert!(log.events().is_empty());
}

#[test]
fn test_category_rule_single_line() {
    let (_, out, _) = run(&CategoryRule, b"KANJI 1 0 2\n");
    assert_eq!(out, "KANJI\t1\t0\t2\n");
}

#[test]
fn test_category_rule_skips_short_line() {
    let (result, out, log) = run(&CategoryRule, b"KANJI 1 0\nKANJI 1 0 2 # ok\n");

    assert_eq!(out, "KANJI\t1\t0\t2\n");
    assert_eq!(result.unwrap().skipped, 1);
    assert_eq!(log.skipped_lines(SourceKind::CharCategories), vec![1]);
}

#[test]
fn test_mapping_rule() {
    let (result, out, _) = run(&MappingRule, &euc_jp(CHAR_DEF));

    assert_eq!(
        out,
        "0x0020\t\tSPACE\n\
         0x0009\t\tSPACE\n\
         0x0021\t0x002F\tSYMBOL\n\
         0x0030\t0x0039\tNUMERIC\n\
         0x0041\t0x005A\tALPHA\n\
         0x3041\t0x309F\tHIRAGANA\n\
         0x30A1\t0x30FF\tKATAKANA\n\
         0x30FC\t\tKATAKANA\tHIRAGANA\n\
         0x4E00\t0x9FA5\tKANJI\n\
         0x3007\t\tSYMBOL\tKANJINUMERIC\n"
    );
    assert_eq!(result.unwrap().written, 10);
}

#[test]
fn test_mapping_rule_strips_comment() {
    let (_, out, _) = run(
        &MappingRule,
        b"0x4E00..0x9FFF KANJI # cjk ideographs\n0x3041 HIRAGANA\n",
    );
    assert_eq!(out, "0x4E00\t0x9FFF\tKANJI\n0x3041\t\tHIRAGANA\n");
}

#[test]
fn test_mapping_rule_skips_code_point_without_category() {
    let (result, out, _) = run(&MappingRule, b"0x3041 # nothing\n0x3042 HIRAGANA\n");

    assert_eq!(out, "0x3042\t\tHIRAGANA\n");
    assert_eq!(result.unwrap().skipped, 1);
}

#[test]
fn test_unk_rule() {
    let (result, out, _) = run(&UnkRule, &euc_jp(UNK_DEF));

    assert_eq!(
        out,
        "DEFAULT\t5\t5\t4769\n\
         SPACE\t9\t9\t8903\n\
         KANJI\t1285\t1285\t11426\n\
         KATAKANA\t1285\t1285\t13398\n"
    );
    assert_eq!(result.unwrap().written, 4);
}

#[test]
fn test_unk_rule_quoted_fields_and_short_records() {
    let src = "\"SYM,BOL\",1,2,3\nALPHA,1,2\n";
    let (result, out, _) = run(&UnkRule, src.as_bytes());

    assert_eq!(out, "SYM,BOL\t1\t2\t3\n");
    assert_eq!(result.unwrap().skipped, 1);
}

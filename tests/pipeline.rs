use std::collections::HashMap;
use std::path::Path;

use bme_repetition::{
    execute_stage3, read_turn_table, run_pipeline, LexiconTagger, PipelineConfig, TableSchema,
    TokenOverrides, TurnAnalyzer,
};

const HEADER: &str =
    "Conv_MOD_P1_P2,BME_Turn_MOD,Tag_Turn_MOD,BME_Turn_P1,Tag_Turn_P1,BME_Turn_P2,Tag_Turn_P2";

/// Run the full pipeline over CSV text and return the output rows keyed by column
fn process(input: &str, dir: &Path) -> Vec<HashMap<String, String>> {
    let input_path = dir.join("input.csv");
    let output_path = dir.join("output.csv");
    std::fs::write(&input_path, input).unwrap();

    let table = read_turn_table(&input_path, &TableSchema::default()).unwrap();
    let analyzer = TurnAnalyzer::new(LexiconTagger::new(), TokenOverrides::default());
    let output = run_pipeline(&table, &analyzer, &PipelineConfig::default()).unwrap();
    execute_stage3(&table, &output.metrics, &output_path).unwrap();

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

#[test]
fn test_other_repetition_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = format!(
        "{HEADER}\n\
         c1,,,B_M,the cat sat,,\n\
         c1,,,,,B_M,the cat ran\n"
    );

    let rows = process(&input, dir.path());

    assert_eq!(rows[1]["P2__other_repeated_1n"], "2");
    assert_eq!(rows[1]["P2__other_nonrepeated_1n"], "1");
    assert_eq!(rows[1]["P2__other_jaccard_index_1n"], "0.5");
    assert_eq!(rows[1]["P2__other_length_1n"], "3");
    assert_eq!(
        rows[1]["P2__other_repetition_1n"],
        r#"[[["the","DET","closed"]],[["cat","NOUN","open"]]]"#
    );
    assert_eq!(rows[1]["P2__self_repeated_1n"], "0");
    assert_eq!(rows[1]["P2__self_jaccard_index_1n"], "0");

    // "the cat" is the only shared bigram
    assert_eq!(rows[1]["P2__other_repeated_2n"], "1");
    assert_eq!(rows[1]["P2_OC_other_repeated_2n"], "1");
    assert_eq!(rows[1]["P2_CC_other_repeated_2n"], "0");
    assert_eq!(rows[1]["P2__other_repeated_3n"], "0");

    // P1 has no turn on the second line
    assert_eq!(rows[1]["P1__self_repeated_1n"], "");
    assert_eq!(rows[1]["P1__self_length_1n"], "0");
}

#[test]
fn test_register_isolated_across_conversations() {
    let dir = tempfile::tempdir().unwrap();
    let input = format!(
        "{HEADER}\n\
         x,,,B_M,hi,,\n\
         y,,,B_M,hi,,\n"
    );

    let rows = process(&input, dir.path());

    assert_eq!(rows[1]["P1__self_repeated_1n"], "0");
    assert_eq!(rows[1]["P1_CC_self_repeated_1n"], "0");
}

#[test]
fn test_middle_and_end_lines_inherit_scores() {
    let dir = tempfile::tempdir().unwrap();
    let input = format!(
        "{HEADER}\n\
         c1,B_M,yes the dog,,,,\n\
         c1,M,,B_W,the dog,,\n\
         c1,E_M,,E_W,,,\n"
    );

    let rows = process(&input, dir.path());

    assert_eq!(rows[1]["P1__other_jaccard_index_1n"], "0.6666666666666666");
    assert_eq!(rows[2]["P1__other_jaccard_index_1n"], "0.6666666666666666");
    assert_eq!(rows[2]["P1__other_repeated_1n"], "2");
    assert_eq!(rows[2]["P1__other_length_1n"], "2");
    assert_eq!(rows[2]["P1__other_repetition_1n"], "");

    for row in &rows[1..] {
        assert_eq!(row["MOD__self_length_1n"], "3");
        assert_eq!(row["MOD__self_jaccard_index_1n"], "0");
    }
}

#[test]
fn test_orphan_continuation_is_marked() {
    let dir = tempfile::tempdir().unwrap();
    let input = format!(
        "{HEADER}\n\
         c1,M,,B_M,hello,,\n\
         c1,E_M,,,,,\n"
    );

    let rows = process(&input, dir.path());

    assert_eq!(rows[0]["MOD__self_repeated_1n"], "NA");
    assert_eq!(rows[1]["MOD__self_repeated_1n"], "NA");
    assert_eq!(rows[0]["P1__self_repeated_1n"], "0");
}

#[test]
fn test_input_columns_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let input = "id,Conv_MOD_P1_P2,BME_Turn_MOD,Tag_Turn_MOD,BME_Turn_P1,Tag_Turn_P1,BME_Turn_P2,Tag_Turn_P2,notes\n\
                 0,c1,B_M,\"Well, hello!\",,,,,first\n";

    let rows = process(input, dir.path());

    assert_eq!(rows[0]["id"], "0");
    assert_eq!(rows[0]["notes"], "first");
    assert_eq!(rows[0]["Tag_Turn_MOD"], "Well, hello!");
    assert_eq!(rows[0]["MOD__self_length_1n"], "2");
    assert_eq!(rows[0]["MOD__self_length_3n"], "0");
}

#[test]
fn test_rerun_is_byte_identical() {
    let input = format!(
        "{HEADER}\n\
         c1,B_M,So what do you think about the movie?,,,,\n\
         c1,,,B_M,I think the movie was great. [laugh],,\n\
         c1,,,M,,B_W,mhm the movie was long\n\
         c1,B_M,Long? Really long!,E_M,,E_W,\n\
         c2,B_M,hello again,,,,\n"
    );

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let rows = process(&input, first.path());
    process(&input, second.path());

    assert_eq!(rows.len(), 5);
    // "mhm" is forced to INTJ and matches nothing; the, movie and was do
    assert_eq!(rows[2]["P2__other_repeated_1n"], "3");
    // M and E_M lines chain back to the B_M line
    assert_eq!(rows[1]["P1__self_length_1n"], "7");
    assert_eq!(rows[2]["P1__self_length_1n"], "7");
    assert_eq!(rows[3]["P1__self_length_1n"], "7");
    assert_eq!(rows[3]["MOD__other_repeated_1n"], "2");
    // the register starts empty for the second conversation
    assert_eq!(rows[4]["MOD__self_length_1n"], "2");
    assert_eq!(rows[4]["MOD__other_nonrepeated_1n"], "0");

    let a = std::fs::read(first.path().join("output.csv")).unwrap();
    let b = std::fs::read(second.path().join("output.csv")).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

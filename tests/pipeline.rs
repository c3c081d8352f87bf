use std::fs;
use std::path::Path;

use sentiment_report::{
    report, Options, Pipeline, PipelineError, ScoredTable, Sentiment, POLARITY_COLUMN,
    SENTIMENT_COLUMN,
};

fn options(dir: &Path, csv: &str) -> Options {
    let input = dir.join("dataset.csv");
    fs::write(&input, csv).unwrap();

    Options {
        input,
        outdir: dir.join("outputs"),
    }
}

fn output_files(outdir: &Path) -> Vec<String> {
    let mut files = fs::read_dir(outdir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    files.sort();
    files
}

#[test]
fn end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(
        dir.path(),
        "id,text\n1,I love this!\n2,This is terrible.\n3,It is a table.\n",
    );

    let run = Pipeline::vader().unwrap().run(&options).unwrap();
    assert_eq!(run.text_column().name(), "text");

    let scored = ScoredTable::read_csv(fs::File::open(&run.paths().csv).unwrap()).unwrap();
    assert_eq!(scored.len(), 3);
    let sentiments = scored.records()
        .iter()
        .map(|record| record.sentiment())
        .collect::<Vec<_>>();
    assert_eq!(sentiments, vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]);
    for record in scored.records() {
        assert!((-1.0..=1.0).contains(&record.polarity()));
    }

    let csv = fs::read_to_string(&run.paths().csv).unwrap();
    let header = csv.lines().next().unwrap();
    assert_eq!(header, format!("id,text,{POLARITY_COLUMN},{SENTIMENT_COLUMN}"));

    assert_eq!(
        output_files(&options.outdir),
        vec![
            report::HISTOGRAM_CHART,
            report::DISTRIBUTION_CHART,
            report::PERCENTAGE_CHART,
            report::SUMMARY_CSV,
        ],
    );
    for chart in [&run.paths().distribution, &run.paths().histogram, &run.paths().percentage] {
        let bytes = fs::read(chart).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    let summary = run.summary().to_string();
    assert!(summary.contains("I love this!"));
    assert!(summary.starts_with("Sentiment counts:\n"));
}

#[test]
fn reruns_produce_identical_csv() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(
        dir.path(),
        "user,tweet,likes\nann,\"Great game, what a win!\",3\nbob,,0\ncid,Worst service ever.,NA\n",
    );
    let pipeline = Pipeline::vader().unwrap();

    let first = pipeline.run(&options).unwrap();
    let first_csv = fs::read(&first.paths().csv).unwrap();
    let second = pipeline.run(&options).unwrap();
    let second_csv = fs::read(&second.paths().csv).unwrap();

    assert_eq!(first_csv, second_csv);
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn tweet_column_wins_over_other_strings() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), "author,tweet\nalice,What a lovely day\n");

    let run = Pipeline::vader().unwrap().run(&options).unwrap();
    assert_eq!(run.text_column().name(), "tweet");
}

#[test]
fn creates_nested_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = options(dir.path(), "message\nok\n");
    options.outdir = dir.path().join("a").join("b");

    let run = Pipeline::vader().unwrap().run(&options).unwrap();
    assert!(run.paths().csv.starts_with(&options.outdir));
    assert!(run.paths().csv.exists());
}

#[test]
fn header_only_input() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), "id,comment\n");

    let run = Pipeline::vader().unwrap().run(&options).unwrap();
    assert_eq!(run.text_column().name(), "id");
    assert_eq!(
        fs::read_to_string(&run.paths().csv).unwrap(),
        "id,comment,Polarity,Sentiment\n",
    );
    assert_eq!(run.summary().counts().total(), 0);
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = Options {
        input: dir.path().join("missing.csv"),
        outdir: dir.path().join("outputs"),
    };

    let error = Pipeline::vader().unwrap().run(&options).unwrap_err();
    assert!(matches!(error, PipelineError::InputNotFound(_)));
    assert!(error.to_string().contains("missing.csv"));
    assert!(!options.outdir.exists());
}

#[test]
fn numeric_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), "a,b\n1,2.5\n3,4\n");

    let error = Pipeline::vader().unwrap().run(&options).unwrap_err();
    assert!(matches!(error, PipelineError::Column(_)));
    assert!(!options.outdir.exists());
}

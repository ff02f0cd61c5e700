use std::process::Command;

use paper_scout::{PaperRecord, RunResult};
use tempfile::tempdir;

fn saved_result() -> RunResult {
    RunResult {
        topic: "Transformers vs LSTM for Time Series".to_string(),
        created_at: "2024-05-01T12:00:00+00:00".to_string(),
        synthesis: "Attention wins on long horizons.".to_string(),
        data: vec![
            PaperRecord {
                title: "Informer: Beyond Efficient Transformer".to_string(),
                summary: "Long sequence forecasting.".to_string(),
                url: "http://arxiv.org/pdf/2012.07436v3".to_string(),
                authors: "Haoyi Zhou, Shanghang Zhang".to_string(),
                published: "2020-12-14".to_string(),
                analysis: Some(
                    "1. Methodology: ProbSparse attention.\n2. Key Result: SOTA.\n3. Limitation: Memory."
                        .to_string(),
                ),
            },
            PaperRecord {
                title: "A Critical Review of Recurrent Neural Networks".to_string(),
                summary: "Sequential data.".to_string(),
                url: "http://arxiv.org/pdf/1506.00019v4".to_string(),
                authors: "Zachary C. Lipton".to_string(),
                published: "2015-05-29".to_string(),
                analysis: Some("1. Methodology: Survey.".to_string()),
            },
        ],
    }
}

#[test]
fn render_prints_saved_result() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.json");
    std::fs::write(&input, serde_json::to_string_pretty(&saved_result()).unwrap()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_paper-scout"))
        .args(["render", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let synthesis = stdout
        .find("Comparative Synthesis: Transformers vs LSTM for Time Series")
        .expect("synthesis header");
    let cards = stdout.find("--- Top Selected Papers (2) ---").expect("cards");
    let table = stdout.find("--- Comparison Table ---").expect("table");
    assert!(synthesis < cards && cards < table);

    assert!(stdout.contains(" [1] Informer: Beyond Efficient Transformer"));
    assert!(stdout.contains("     Authors:   Haoyi Zhou, Shanghang Zhang"));
    assert!(stdout.contains("       2. Key Result: SOTA."));
    assert!(stdout.contains("     PDF:       http://arxiv.org/pdf/1506.00019v4"));
}

#[test]
fn render_rejects_malformed_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(&input, "{ not json").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_paper-scout"))
        .args(["render", "--input"])
        .arg(&input)
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn run_without_api_key_fails_before_any_request() {
    let output = Command::new(env!("CARGO_BIN_EXE_paper-scout"))
        .args(["run", "--topic", "rnn"])
        .env_remove("OPENAI_API_KEY")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OPENAI_API_KEY"), "stderr: {stderr}");
}

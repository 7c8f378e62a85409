//! End-to-end tests for the consolidation pipeline
//!
//! Each test builds an input directory, runs the full pipeline and reads
//! the consolidated file back.

use httpmock::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use termbase_cli::{run_pipeline, AppConfig, CliError};
use termbase_io::IoError;

fn write_csv(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn base_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        input_directory: dir.path().join("csv_files"),
        output_file: dir.path().join("consolidated.csv"),
        rate_limit_ms: 0,
        ..AppConfig::default()
    }
}

fn read_output(config: &AppConfig) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&config.output_file)
        .unwrap();
    reader
        .records()
        .map(|row| row.unwrap().iter().map(String::from).collect())
        .collect()
}

#[test]
fn test_rule_based_run_merges_duplicate_pair() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        enable_ai: false,
        ..base_config(&dir)
    };
    write_csv(
        &config.input_directory,
        "a.csv",
        "term,definition,url\nHTTP,Hypertext Transfer Protocol,\n",
    );
    write_csv(
        &config.input_directory,
        "b.csv",
        "term,definition,url\nhttp,Hypertext transfer protocol - a network protocol,\n",
    );

    let outcome = run_pipeline(&config).unwrap();

    assert!(!outcome.service_assisted);
    assert_eq!(outcome.stats.records_read, 2);
    assert_eq!(outcome.stats.duplicate_pairs, 1);
    assert_eq!(outcome.stats.final_unique, 1);
    assert_eq!(outcome.stats.api_calls, 0);

    let rows = read_output(&config);
    assert_eq!(
        rows,
        vec![
            vec!["term", "definition", "url", "sources_merged", "merge_method"],
            vec![
                "HTTP",
                "Hypertext Transfer Protocol | Hypertext transfer protocol - a network protocol",
                "",
                "2",
                "basic",
            ],
        ]
    );
}

#[test]
fn test_output_is_sorted_without_case() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        enable_ai: false,
        ..base_config(&dir)
    };
    write_csv(
        &config.input_directory,
        "terms.csv",
        "term,definition\nzebra,An animal\nApple,A fruit\nbanana,Another fruit\n",
    );

    run_pipeline(&config).unwrap();

    let terms: Vec<String> = read_output(&config)
        .into_iter()
        .skip(1)
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(terms, vec!["Apple", "banana", "zebra"]);
}

#[test]
fn test_missing_input_directory_is_created_and_fails() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        enable_ai: false,
        ..base_config(&dir)
    };

    let result = run_pipeline(&config);

    assert!(matches!(
        result,
        Err(CliError::Io(IoError::NoInput { created: true, .. }))
    ));
    assert!(config.input_directory.is_dir());
    assert!(!config.output_file.exists());
}

#[test]
fn test_invalid_threshold_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        enable_ai: false,
        similarity_threshold: 1.5,
        ..base_config(&dir)
    };

    let result = run_pipeline(&config);

    assert!(matches!(result, Err(CliError::Config(ref m)) if m.contains("1.5")));
}

#[test]
fn test_openai_backed_run() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("Authorization", "Bearer sk-e2e");
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content":
                "{\"term\": \"HTTP\", \"definition\": \"Hypertext Transfer Protocol, the web's application protocol\", \"url\": [\"https://a\", \"https://b\"], \"sources_merged\": 2, \"merge_confidence\": \"high\"}"
            }}]
        }));
    });

    let dir = TempDir::new().unwrap();
    let mut config = base_config(&dir);
    config.openai.api_key = "sk-e2e".to_string();
    config.openai.base_url = Some(server.base_url());
    write_csv(
        &config.input_directory,
        "a.csv",
        "term,definition,url\nHTTP,Hypertext Transfer Protocol,https://a\nDNS,Domain Name System,\n",
    );
    write_csv(
        &config.input_directory,
        "b.csv",
        "term,definition,url\nhttp,Hypertext transfer protocol,https://b\n",
    );

    let outcome = run_pipeline(&config).unwrap();

    mock.assert_hits(1);
    assert!(outcome.service_assisted);
    assert_eq!(outcome.stats.ai_merged, 1);
    assert_eq!(outcome.stats.api_calls, 1);
    assert!(outcome.stats.estimated_cost > 0.0);
    assert!(outcome.warnings.is_empty());

    // DNS sorts first, so its columns form the header
    let rows = read_output(&config);
    assert_eq!(rows[0], vec!["term", "definition", "url"]);
    assert_eq!(rows[1], vec!["DNS", "Domain Name System", ""]);
    assert_eq!(
        rows[2],
        vec![
            "HTTP",
            "Hypertext Transfer Protocol, the web's application protocol",
            "https://a; https://b",
        ]
    );
}

#[test]
fn test_anthropic_budget_drops_unprocessed_groups() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "ak-e2e");
        then.status(200).json_body(json!({
            "content": [{"type": "text", "text":
                "{\"term\": \"HTTP\", \"definition\": \"Hypertext Transfer Protocol\", \"url\": \"\", \"sources_merged\": 2, \"merge_confidence\": \"medium\"}"
            }]
        }));
    });

    let dir = TempDir::new().unwrap();
    let mut config = base_config(&dir);
    config.ai_provider = "anthropic".to_string();
    config.max_ai_calls = 1;
    config.anthropic.api_key = "ak-e2e".to_string();
    config.anthropic.base_url = Some(server.base_url());
    write_csv(
        &config.input_directory,
        "a.csv",
        "term,definition,url\nHTTP,Hypertext Transfer Protocol,\nDNS,Domain Name System,\nTLS,Transport Layer Security,\n",
    );
    write_csv(
        &config.input_directory,
        "b.csv",
        "term,definition,url\nhttp,Hypertext transfer protocol,\ndns,Domain name system,\n",
    );

    let outcome = run_pipeline(&config).unwrap();

    assert_eq!(outcome.stats.duplicate_pairs, 2);
    assert_eq!(outcome.stats.api_calls, 1);
    assert_eq!(outcome.stats.skipped_groups, 1);
    assert_eq!(outcome.stats.final_unique, 2);
    assert_eq!(outcome.warnings.len(), 1);

    let terms: Vec<String> = read_output(&config)
        .into_iter()
        .skip(1)
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(terms, vec!["HTTP", "TLS"]);
}

#[test]
fn test_backend_failure_still_writes_output() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(503).body("overloaded");
    });

    let dir = TempDir::new().unwrap();
    let mut config = base_config(&dir);
    config.openai.api_key = "sk-e2e".to_string();
    config.openai.base_url = Some(server.base_url());
    write_csv(
        &config.input_directory,
        "a.csv",
        "term,definition,url\nHTTP,Hypertext Transfer Protocol,\nhttp,Hypertext transfer protocol,\n",
    );

    let outcome = run_pipeline(&config).unwrap();

    assert_eq!(outcome.stats.fallback_merges, 1);
    assert_eq!(outcome.stats.api_calls, 0);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("using basic merge"));

    let rows = read_output(&config);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][4], "basic");
}

//! End-to-end tests for the commands against a mock AnkiConnect server.

mod common;

use ankijp_cli::CliError;
use common::{
    mock_action, mock_action_times, mock_anki_error, mock_anki_response, run_cli,
    setup_mock_server,
};
use wiremock::Mock;
use wiremock::matchers::{body_partial_json, method};

const NOMU: &str = r#"{
    "核心單字": "飲む",
    "詞性分類": "動詞 (五段動詞)",
    "核心意義": "喝",
    "發音": "のむ",
    "重音": "①",
    "情境例句": "毎朝コーヒーを飲みます。",
    "例句翻譯": "每天早上喝咖啡。"
}"#;

#[tokio::test]
async fn test_add_verb_card() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["日文學習"])).await;
    mock_action(
        &server,
        "modelNames",
        mock_anki_response(vec!["Basic", "Japanese Verb"]),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "addNote",
            "params": {
                "note": {
                    "deckName": "日文學習",
                    "modelName": "Japanese Verb",
                    "fields": {"核心單字": "飲む", "發音": "のむ"},
                    "tags": ["anki-japanese-cli", "verb", "japanese", "n5"]
                }
            }
        })))
        .respond_with(mock_anki_response(1496198395707_i64))
        .expect(1)
        .mount(&server)
        .await;

    let (result, out) = run_cli(&server.uri(), &["add", "verb", "--json", NOMU, "--tag", "n5"]).await;

    result.unwrap();
    assert!(out.contains("✓ 成功新增卡片 (ID: 1496198395707)"), "{}", out);
}

#[tokio::test]
async fn test_add_creates_missing_deck() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["Default"])).await;
    mock_action(&server, "createDeck", mock_anki_response(99)).await;
    mock_action(&server, "modelNames", mock_anki_response(vec!["Japanese Verb"])).await;
    mock_action(&server, "addNote", mock_anki_response(5)).await;

    let (result, out) = run_cli(
        &server.uri(),
        &["add", "verb", "--deck-name", "N5::動詞", "--json", NOMU],
    )
    .await;

    result.unwrap();
    assert!(out.contains("已建立牌組 'N5::動詞'"));
    assert!(out.contains("(ID: 5)"));
}

#[tokio::test]
async fn test_add_requires_model() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["日文學習"])).await;
    mock_action(&server, "modelNames", mock_anki_response(vec!["Basic"])).await;
    mock_action_times(&server, "addNote", mock_anki_response(1), 0).await;

    let (result, _) = run_cli(&server.uri(), &["add", "verb", "--json", NOMU]).await;

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::ModelMissing { .. }));
    assert_eq!(
        err.to_string(),
        "模型 'Japanese Verb' 不存在。請先執行 'init verb' 指令建立模型。"
    );
}

#[tokio::test]
async fn test_add_rejects_invalid_card_before_submitting() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["日文學習"])).await;
    mock_action(&server, "modelNames", mock_anki_response(vec!["Japanese Verb"])).await;
    mock_action_times(&server, "addNote", mock_anki_response(1), 0).await;

    let (result, _) = run_cli(
        &server.uri(),
        &["add", "verb", "--json", r#"{"核心單字": "飲む", "核心意義": "喝"}"#],
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "卡片 #1 驗證失敗: 動詞卡片驗證失敗: 欄位 '發音' 不能為空"
    );
}

#[tokio::test]
async fn test_add_batch_reports_partial_failure() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["日文學習"])).await;
    mock_action(&server, "modelNames", mock_anki_response(vec!["Japanese Verb"])).await;
    mock_action(
        &server,
        "addNotes",
        mock_anki_response(serde_json::json!([1001, null, 1003])),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("verbs.json");
    let cards: serde_json::Value = serde_json::from_str(NOMU).unwrap();
    std::fs::write(
        &file,
        serde_json::to_string(&vec![cards.clone(), cards.clone(), cards]).unwrap(),
    )
    .unwrap();

    let (result, out) = run_cli(
        &server.uri(),
        &["add", "verb", "--file", file.to_str().unwrap(), "--batch"],
    )
    .await;

    result.unwrap();
    assert!(out.contains("✓ 成功新增 2/3 張卡片"), "{}", out);
    assert!(out.contains("未能新增的卡片: #2"));
}

#[tokio::test]
async fn test_add_batch_names_the_bad_card() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["日文學習"])).await;
    mock_action(&server, "modelNames", mock_anki_response(vec!["Japanese Verb"])).await;
    mock_action_times(&server, "addNotes", mock_anki_response(vec![1]), 0).await;

    let input = format!("[{}, {{\"核心單字\": \"食べる\"}}]", NOMU);
    let (result, _) = run_cli(&server.uri(), &["add", "verb", "--json", &input, "--batch"]).await;

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::InvalidCard { index: 2, .. }));
}

#[tokio::test]
async fn test_add_duplicate_is_reported() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["日文學習"])).await;
    mock_action(&server, "modelNames", mock_anki_response(vec!["Japanese Verb"])).await;
    mock_action(
        &server,
        "addNote",
        mock_anki_error("cannot create note because it is a duplicate"),
    )
    .await;

    let (result, _) = run_cli(&server.uri(), &["add", "verb", "--json", NOMU]).await;

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Anki API 錯誤: cannot create note because it is a duplicate"
    );
}

#[tokio::test]
async fn test_add_missing_file() {
    let (result, _) = run_cli(
        "http://127.0.0.1:1",
        &["add", "verb", "--file", "/nonexistent/cards.json"],
    )
    .await;

    assert!(matches!(result.unwrap_err(), CliError::ReadFile { .. }));
}

#[tokio::test]
async fn test_add_without_input() {
    let (result, _) = run_cli("http://127.0.0.1:1", &["add", "verb"]).await;
    assert!(matches!(result.unwrap_err(), CliError::MissingInput));
}

#[tokio::test]
async fn test_init_invalid_type() {
    let (result, _) = run_cli("http://127.0.0.1:1", &["init", "invalid"]).await;

    let message = result.unwrap_err().to_string();
    assert!(message.contains("不支援的卡片類型"));
    for tag in ["verb", "adjective", "normal", "grammar"] {
        assert!(message.contains(tag), "{}", message);
    }
}

#[tokio::test]
async fn test_init_creates_model_and_deck() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(&server, "modelNames", mock_anki_response(vec!["Basic"])).await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "createModel",
            "params": {
                "modelName": "Japanese Verb",
                "css": ankijp_cards::CARD_CSS
            }
        })))
        .respond_with(mock_anki_response(serde_json::json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["Default"])).await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "createDeck",
            "params": {"deck": "日文動詞"}
        })))
        .respond_with(mock_anki_response(2))
        .expect(1)
        .mount(&server)
        .await;

    let (result, out) = run_cli(&server.uri(), &["init", "verb"]).await;

    result.unwrap();
    assert!(out.contains("成功建立模型 'Japanese Verb'"));
    assert!(out.contains("牌組 '日文動詞' 已就緒"));
    assert!(out.contains("初始化完成"));
}

#[tokio::test]
async fn test_init_existing_model_reports_missing_fields() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;
    mock_action(
        &server,
        "modelNames",
        mock_anki_response(vec!["Japanese Grammar"]),
    )
    .await;
    mock_action(
        &server,
        "modelFieldNames",
        mock_anki_response(vec!["文法要點", "結構形式", "意義說明", "使用時機", "例句示範", "例句翻譯"]),
    )
    .await;
    mock_action_times(&server, "createModel", mock_anki_response(1), 0).await;
    mock_action(&server, "updateModelTemplates", mock_anki_response(serde_json::Value::Null)).await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["N4"])).await;

    let (result, out) = run_cli(
        &server.uri(),
        &["init", "grammar", "--deck-name", "N4", "--update-templates"],
    )
    .await;

    result.unwrap();
    assert!(out.contains("模型 'Japanese Grammar' 已存在"));
    assert!(out.contains("缺少欄位: 情境課題, 解答範例"));
    assert!(out.contains("已更新模型 'Japanese Grammar' 的模板"));
    assert!(out.contains("牌組 'N4' 已就緒"));
}

#[tokio::test]
async fn test_init_without_anki() {
    let (result, _) = run_cli("http://127.0.0.1:1", &["init", "verb"]).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("無法連線到 Anki"));
}

#[tokio::test]
async fn test_diagnose_connected() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;

    let (result, out) = run_cli(&server.uri(), &["diagnose"]).await;

    result.unwrap();
    assert!(out.contains("已連線 ✓"));
}

#[tokio::test]
async fn test_diagnose_not_connected() {
    let (result, out) = run_cli("http://127.0.0.1:1", &["diagnose"]).await;

    assert!(matches!(result.unwrap_err(), CliError::NotConnected));
    assert!(out.contains("未連線 ✗"));
    assert!(out.contains("2055492159"));
}

#[tokio::test]
async fn test_preview_front() {
    let (result, out) = run_cli(
        "http://127.0.0.1:1",
        &["preview", "verb", "--json", NOMU, "--side", "front"],
    )
    .await;

    result.unwrap();
    assert!(out.contains("--- 正面 ---"));
    assert!(out.contains("飲む"));
    assert!(!out.contains("--- 背面 ---"));
}

#[tokio::test]
async fn test_card_type_is_case_insensitive() {
    let (result, out) = run_cli(
        "http://127.0.0.1:1",
        &["preview", "Verb", "--json", NOMU, "--side", "back"],
    )
    .await;

    result.unwrap();
    assert!(out.contains("--- 背面 ---"));
    assert!(out.contains("毎朝コーヒーを飲みます。"));
}

#[tokio::test]
async fn test_config_writes_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.toml");
    let path_arg = path.to_string_lossy().into_owned();

    let cli = <ankijp_cli::Cli as clap::Parser>::try_parse_from([
        "anki-japanese-cli",
        "--config",
        &path_arg,
        "config",
    ])
    .unwrap();
    let mut out = Vec::new();
    ankijp_cli::commands::run(cli, &mut out).await.unwrap();

    let written = ankijp_cli::Config::from_file(&path).unwrap();
    assert_eq!(written, ankijp_cli::Config::default());
    assert!(String::from_utf8(out).unwrap().contains("設定檔案已建立於"));

    std::fs::write(&path, "[anki]\ndeck_name = \"mine\"\n").unwrap();
    let cli = <ankijp_cli::Cli as clap::Parser>::try_parse_from([
        "anki-japanese-cli",
        "--config",
        &path_arg,
        "config",
    ])
    .unwrap();
    let mut out = Vec::new();
    ankijp_cli::commands::run(cli, &mut out).await.unwrap();

    assert!(String::from_utf8(out).unwrap().contains("設定檔案已存在於"));
    assert_eq!(
        ankijp_cli::Config::from_file(&path).unwrap().anki.deck_name,
        "mine"
    );
}

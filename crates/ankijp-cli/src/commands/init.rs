//! `init`: create the model and deck for a card type.

use std::collections::HashMap;
use std::io::Write;

use ankijp::{AnkiClient, CreateModelParams};
use ankijp_cards::{ModelDefinition, validate_card_type};
use tracing::{info, warn};

use crate::cli::InitArgs;
use crate::error::Result;

pub(crate) async fn run(client: &AnkiClient, args: &InitArgs, out: &mut dyn Write) -> Result<()> {
    let card_type = validate_card_type(&args.card_type)?;
    writeln!(out, "正在初始化{}卡片...", card_type.display_name())?;

    client.ping().await?;
    writeln!(out, "已連線到 Anki Connect")?;

    let model = card_type.model_definition();
    if client.models().exists(&model.name).await? {
        writeln!(out, "模型 '{}' 已存在", model.name)?;

        let remote = client.models().field_names(&model.name).await?;
        let missing: Vec<&str> = model
            .fields
            .iter()
            .filter(|field| !remote.contains(field))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            warn!(model = %model.name, ?missing, "Model is missing fields");
            writeln!(out, "警告: 模型 '{}' 缺少欄位: {}", model.name, missing.join(", "))?;
        }

        if args.update_templates {
            let templates: HashMap<&str, (&str, &str)> = model
                .templates
                .iter()
                .map(|t| (t.name.as_str(), (t.front.as_str(), t.back.as_str())))
                .collect();
            client
                .models()
                .update_templates(&model.name, templates)
                .await?;
            writeln!(out, "已更新模型 '{}' 的模板", model.name)?;
        }
    } else {
        client.models().create(create_params(&model)).await?;
        info!(model = %model.name, "Created model");
        writeln!(out, "成功建立模型 '{}'", model.name)?;
    }

    let deck = args
        .deck_name
        .as_deref()
        .unwrap_or(card_type.default_deck());
    client.decks().ensure_exists(deck).await?;
    writeln!(out, "牌組 '{}' 已就緒", deck)?;

    writeln!(out, "初始化完成")?;
    Ok(())
}

fn create_params(model: &ModelDefinition) -> CreateModelParams {
    let mut params = CreateModelParams::new(&model.name).css(&model.css);
    for field in &model.fields {
        params = params.field(field);
    }
    for template in &model.templates {
        params = params.template(&template.name, &template.front, &template.back);
    }
    params
}

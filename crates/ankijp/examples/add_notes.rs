//! Example: Adding notes to Anki.
//!
//! Checks the connection, makes sure a deck exists, then adds one note and a
//! small batch. Rejected batch entries are reported by index.
//!
//! Run with: cargo run -p ankijp --example add_notes

use ankijp::{AnkiClient, NoteBuilder, REJECTED_NOTE_ID, format_error};

const DECK: &str = "日文單字";
const MODEL: &str = "Japanese Normal Word";

#[tokio::main]
async fn main() -> ankijp::Result<()> {
    let client = AnkiClient::new();

    let status = client.check_connection().await;
    if !status.connected {
        println!("{}", client.diagnose().await);
        return Ok(());
    }

    if !client.models().exists(MODEL).await? {
        println!("Model '{}' is missing, run `anki-japanese-cli init normal` first", MODEL);
        return Ok(());
    }

    if client.decks().ensure_exists(DECK).await? {
        println!("Created deck: {}", DECK);
    }

    // ========== SINGLE NOTE ==========
    println!("\n--- Adding a single note ---");

    let note = NoteBuilder::new(DECK, MODEL)
        .field("核心單字", "猫")
        .field("核心意義", "貓")
        .field("發音", "ねこ")
        .field("情境例句", "猫が好きです。")
        .field("例句翻譯", "我喜歡貓。")
        .tags(["anki-japanese-cli", "normal"])
        .build();

    match client.notes().add(note).await {
        Ok(id) => println!("Created note with ID: {}", id),
        Err(e) => println!("{}", format_error(&e)),
    }

    // ========== BATCH ==========
    println!("\n--- Adding a batch ---");

    let notes: Vec<_> = [("犬", "狗", "いぬ"), ("鳥", "鳥", "とり")]
        .into_iter()
        .map(|(word, meaning, reading)| {
            NoteBuilder::new(DECK, MODEL)
                .field("核心單字", word)
                .field("核心意義", meaning)
                .field("發音", reading)
                .tag("anki-japanese-cli")
                .build()
        })
        .collect();

    let ids = client.notes().add_many(&notes).await?;
    for (i, id) in ids.iter().enumerate() {
        if *id == REJECTED_NOTE_ID {
            println!("  Note {}: rejected", i + 1);
        } else {
            println!("  Note {}: {}", i + 1, id);
        }
    }

    Ok(())
}

//! catalog-cli: submit a product draft to the catalog API
//!
//! Usage:
//!   catalog-cli <draft.json>            apply the draft and submit it
//!   catalog-cli <draft.json> --dry-run  print the product payload only
//!   catalog-cli sets                    list attribute sets

use anyhow::{Context, bail};
use catalog_client::draft::{DraftFile, load_image, resolve_variant};
use catalog_client::{ClientConfig, HttpClient};
use std::path::Path;
use variant_editor::ProductEditor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_cli=info,variant_editor=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(target) = args.first() else {
        bail!("usage: catalog-cli <draft.json> [--dry-run] | catalog-cli sets");
    };
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let config = ClientConfig::from_env();
    tracing::info!("Using catalog API at {}", config.base_url);
    let client = config.build_http_client()?;

    if target == "sets" {
        return list_sets(&client).await;
    }

    let path = Path::new(target);
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    let draft = DraftFile::from_json(&json).context("invalid draft file")?;

    let mut editor = ProductEditor::new();
    editor
        .load_attribute_sets(&client)
        .await
        .context("failed to load attribute sets")?;
    draft.apply(&mut editor)?;

    if dry_run {
        let product = editor.preview()?;
        println!("{}", serde_json::to_string_pretty(&product)?);
        return Ok(());
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    for entry in &draft.images {
        let key = resolve_variant(&editor, &entry.variant)?;
        let blobs = entry
            .files
            .iter()
            .map(|file| {
                let file = base_dir.join(file);
                load_image(&file).with_context(|| format!("failed to read {}", file.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let images = editor.upload_images(&key, blobs, &client).await?;
        tracing::info!(variant = %key, images = images.len(), "Images attached");
    }

    let created = editor.submit(&client).await?;
    println!(
        "Created product \"{}\" ({} variants){}",
        created.name,
        created.variants.len(),
        created
            .id
            .as_ref()
            .map(|id| format!(" id={id}"))
            .unwrap_or_default()
    );
    Ok(())
}

async fn list_sets(client: &HttpClient) -> anyhow::Result<()> {
    let mut editor = ProductEditor::new();
    let sets = editor.load_attribute_sets(client).await?;
    for set in sets {
        println!("{}\t{}", set.id, set.name);
        for attribute in &set.attributes {
            if attribute.is_options() {
                println!(
                    "  {} ({}): {}",
                    attribute.id,
                    attribute.label,
                    attribute.options.join(", ")
                );
            } else {
                println!("  {} ({}): {}", attribute.id, attribute.label, attribute.kind);
            }
        }
    }
    Ok(())
}

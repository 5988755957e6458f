//! Transcribe a diagnostic report image through the vision path.
//!
//! Uses Gemini when `GEMINI_API_KEY` is set, GPT otherwise:
//! `GEMINI_API_KEY=... cargo run --example diagnostico_visao -- laudo.png`

use base64::Engine as _;

use incluia::engines::{CompletionOptions, EngineGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("uso: diagnostico_visao <imagem>"))?;

    let bytes = std::fs::read(&path)?;
    let image_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

    let mime_type = if path.ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    };

    let gateway = EngineGateway::from_env();
    let text = gateway
        .vision_adapt(
            "Transcreva o laudo médico desta imagem, preservando a estrutura do texto.",
            &image_base64,
            mime_type,
            &CompletionOptions::default(),
        )
        .await?;

    println!("{text}");
    Ok(())
}

//! Generate a (pseudonymized) PEI section for one student.
//!
//! Requires at least the fallback engine's key:
//! `DEEPSEEK_API_KEY=sk-... cargo run --example pei_generation`

use incluia::engines::{CompletionOptions, EngineGateway};
use incluia::{
    anonymize, deanonymize, with_fallback, ChatMessage, EnvCredentials, Module, NameMap,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let gateway = EngineGateway::from_env();
    let store = EnvCredentials;

    let student = Some("Pedro Henrique");
    let mut names = NameMap::new();
    names.insert("RESPONSAVEL".to_owned(), "Juliana Alves".to_owned());

    let report = "Pedro Henrique tem TDAH. A responsável Juliana Alves relata \
                  dificuldade de concentração nas atividades em grupo.";
    let masked = anonymize(report, student, &names);
    println!("prompt enviado ao provedor:\n{masked}\n");

    let messages = vec![
        ChatMessage::system(
            "Você é um professor de AEE. Redija metas pedagógicas objetivas em português.",
        ),
        ChatMessage::user(format!("Com base no relato a seguir, proponha três metas:\n{masked}")),
    ];

    let reply = with_fallback(Module::Pei, None, &store, |engine| {
        let gateway = gateway.clone();
        let messages = messages.clone();
        async move {
            gateway
                .chat_completion_text(engine, &messages, &CompletionOptions::default())
                .await
        }
    })
    .await?;

    println!("resposta restaurada:\n{}", deanonymize(&reply, student, &names));
    Ok(())
}

//! Interactive terminal chat for Breezy.
//!
//! Entry point: [`run_chat`], which wires the configured provider into a
//! `Conversation` and hands it to `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod spinner;

use std::time::Duration;

use console::style;

use breezy_core::chat::conversation::Conversation;
use breezy_core::chat::fallback::{FallbackResponder, StdRandom};
use breezy_infra::llm::create_provider;
use breezy_types::config::ClientConfig;

use self::input::ChatInput;
use self::loop_runner::{LoopOptions, run_chat_loop};
use self::renderer::ChatRenderer;

/// Start an interactive session against the configured model server.
///
/// Returns `Ok` when the session ends through `sair` or end of input, so
/// `main` exits with status 0. Failed model requests never end the session.
pub async fn run_chat(config: &ClientConfig, api_key: Option<&str>) -> anyhow::Result<()> {
    let provider = create_provider(config, api_key)?;
    let mut conversation = Conversation::new(
        provider,
        FallbackResponder::new(StdRandom::from_entropy()),
    )
    .with_offline_delay(Duration::from_millis(config.offline_delay_ms));

    let prompt = format!("{} ", style("Você:").green().bold());
    let (mut chat_input, mut writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let options = LoopOptions {
        renderer: config.markdown.then(ChatRenderer::default),
        show_spinner: true,
        host: config.host.clone(),
    };

    let result = run_chat_loop(&mut conversation, &mut chat_input, &mut writer, &options).await;
    chat_input.flush();
    result
}

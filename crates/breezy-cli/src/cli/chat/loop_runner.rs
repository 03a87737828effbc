//! Main chat loop orchestration.
//!
//! Reads one line at a time and routes it: commands first, then the blank
//! input guidance, then the conversation controller. The busy indicator is
//! cleared after the reply (or failure) arrives and before the session
//! state is updated.

use std::io::Write;

use console::style;
use tracing::info;

use breezy_core::chat::conversation::{Conversation, Turn};
use breezy_core::chat::fallback::RandomSource;
use breezy_core::llm::provider::LlmProvider;
use breezy_types::chat::{Prompt, ReplyKind};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{InputEvent, LineSource};
use super::renderer::ChatRenderer;
use super::spinner::BusyIndicator;

/// Printed in place of a reply when the input is blank.
pub const BLANK_INPUT_GUIDANCE: &str = "Por favor, digite uma pergunta ou comando.";

/// Presentation settings for one chat session.
pub struct LoopOptions {
    /// Markdown renderer for live replies; `None` prints them verbatim.
    pub renderer: Option<ChatRenderer>,
    /// Draw the `Processando` spinner while waiting.
    pub show_spinner: bool,
    /// Model server address shown in the banner.
    pub host: String,
}

/// Run the interactive chat loop until `sair` or end of input.
///
/// Every failure to reach the model is reported inline and never ends the
/// loop; only output errors are returned.
pub async fn run_chat_loop<P, R, I, W>(
    conversation: &mut Conversation<P, R>,
    input: &mut I,
    out: &mut W,
    options: &LoopOptions,
) -> anyhow::Result<()>
where
    P: LlmProvider,
    R: RandomSource,
    I: LineSource,
    W: Write,
{
    info!(model = %conversation.model(), host = %options.host, "Chat session started");
    print_welcome_banner(out, conversation.model(), &options.host)?;
    out.flush()?;

    loop {
        let line = match input.read_line().await {
            InputEvent::Eof => {
                commands::print_farewell(out)?;
                break;
            }
            InputEvent::Interrupted => {
                writeln!(
                    out,
                    "  {}",
                    style("Digite 'sair' ou pressione Ctrl+D para encerrar.").dim()
                )?;
                out.flush()?;
                continue;
            }
            InputEvent::Message(line) => line,
        };

        if let Some(command) = commands::parse(&line) {
            match command {
                ChatCommand::Help => commands::print_help(out)?,
                ChatCommand::Clear => {
                    input.clear_screen();
                    print_welcome_banner(out, conversation.model(), &options.host)?;
                }
                ChatCommand::About => commands::print_about(out)?,
                ChatCommand::Models => commands::print_models(out, conversation.model())?,
                ChatCommand::Quit => {
                    commands::print_farewell(out)?;
                    break;
                }
            }
            out.flush()?;
            continue;
        }

        let Some(prompt) = Prompt::new(&line) else {
            writeln!(out, "{}", style(BLANK_INPUT_GUIDANCE).yellow())?;
            out.flush()?;
            continue;
        };

        let busy = if options.show_spinner {
            BusyIndicator::start()
        } else {
            BusyIndicator::hidden()
        };
        let attempt = conversation.attempt(&prompt).await;
        busy.finish();

        let turn = conversation.settle(attempt);
        print_turn(out, &turn, options.renderer.as_ref())?;
        out.flush()?;
    }

    info!(
        mode = %conversation.mode(),
        consecutive_failures = conversation.session().consecutive_failures(),
        "Chat session ended"
    );
    out.flush()?;
    Ok(())
}

/// Print the outcome of one prompt.
fn print_turn(
    out: &mut impl Write,
    turn: &Turn,
    renderer: Option<&ChatRenderer>,
) -> std::io::Result<()> {
    match turn {
        Turn::Reply {
            kind: ReplyKind::Live,
            text,
        } => {
            let body = match renderer {
                Some(renderer) => renderer.render(text),
                None => text.clone(),
            };
            writeln!(out, "{} {body}", style("IA:").blue().bold())
        }
        Turn::Reply {
            kind: ReplyKind::Offline,
            text,
        } => writeln!(out, "{} {text}", style("IA (Modo Offline):").blue().bold()),
        Turn::Failed {
            error,
            went_offline,
            ..
        } => {
            writeln!(out, "{}", style(format!("Erro: {error}")).red())?;
            if *went_offline {
                writeln!(
                    out,
                    "{}",
                    style("Entrando em modo offline após múltiplas falhas de conexão.").yellow()
                )?;
                writeln!(
                    out,
                    "{}",
                    style("Use o comando 'ajuda' para ver as opções disponíveis.").yellow()
                )?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use breezy_core::chat::fallback::{ECHO_TEMPLATE, FallbackResponder};
    use breezy_types::chat::Mode;
    use breezy_types::llm::{ChatRequest, ChatResponse, LlmError};

    use super::*;

    /// Replays a fixed list of input events, then reports end of input.
    struct ScriptedInput {
        events: VecDeque<InputEvent>,
        clears: usize,
    }

    impl ScriptedInput {
        fn lines(lines: &[&str]) -> Self {
            Self {
                events: lines
                    .iter()
                    .map(|l| InputEvent::Message(l.to_string()))
                    .collect(),
                clears: 0,
            }
        }
    }

    impl LineSource for ScriptedInput {
        async fn read_line(&mut self) -> InputEvent {
            self.events.pop_front().unwrap_or(InputEvent::Eof)
        }

        fn clear_screen(&mut self) {
            self.clears += 1;
        }
    }

    /// Provider that fails every call, or echoes the prompt when `healthy`.
    struct CountingProvider {
        healthy: bool,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn down() -> Self {
            Self {
                healthy: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn up() -> Self {
            Self {
                healthy: true,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LlmProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn model(&self) -> &str {
            "qwen2.5:1.5b"
        }

        async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy {
                Ok(ChatResponse {
                    content: format!("eco: {}", request.messages[0].content),
                    model: request.model.clone(),
                    done_reason: Some("stop".into()),
                    output_tokens: 3,
                })
            } else {
                Err(LlmError::Connection {
                    url: "http://127.0.0.1:11434".into(),
                    message: "connection refused".into(),
                })
            }
        }
    }

    /// Always selects the same template.
    struct Always(usize);

    impl RandomSource for Always {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn conversation(provider: CountingProvider) -> Conversation<CountingProvider, Always> {
        Conversation::new(provider, FallbackResponder::new(Always(ECHO_TEMPLATE)))
            .with_offline_delay(Duration::ZERO)
    }

    fn options() -> LoopOptions {
        LoopOptions {
            renderer: None,
            show_spinner: false,
            host: "http://127.0.0.1:11434".into(),
        }
    }

    async fn run(
        conversation: &mut Conversation<CountingProvider, Always>,
        input: &mut ScriptedInput,
    ) -> String {
        let mut out = Vec::new();
        run_chat_loop(conversation, input, &mut out, &options())
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_full_scenario_degrades_to_offline() {
        let mut conv = conversation(CountingProvider::down());
        let mut input = ScriptedInput::lines(&["ajuda", "", "a", "b", "c", "d", "sair"]);
        let text = run(&mut conv, &mut input).await;

        assert!(text.contains("Comandos disponíveis:"));
        assert_eq!(text.matches(BLANK_INPUT_GUIDANCE).count(), 1);
        assert_eq!(text.matches("Erro: ").count(), 3);
        assert_eq!(
            text.matches("Entrando em modo offline após múltiplas falhas de conexão.")
                .count(),
            1
        );
        assert!(text.contains("Use o comando 'ajuda' para ver as opções disponíveis."));
        assert!(text.contains("IA (Modo Offline):"));
        assert!(text.contains("Recebi sua mensagem: \"d\""));
        assert!(text.contains("Obrigado por usar nossa AI. Até breve!"));

        // a, b and c reached the server; d did not.
        assert_eq!(conv.provider().calls(), 3);
        assert_eq!(conv.mode(), Mode::Offline);
    }

    #[tokio::test]
    async fn test_notice_precedes_offline_reply() {
        let mut conv = conversation(CountingProvider::down());
        let mut input = ScriptedInput::lines(&["a", "b", "c", "d"]);
        let text = run(&mut conv, &mut input).await;

        let notice = text.find("Entrando em modo offline").unwrap();
        let offline = text.find("IA (Modo Offline):").unwrap();
        assert!(notice < offline);
    }

    #[tokio::test]
    async fn test_live_reply_is_tagged() {
        let mut conv = conversation(CountingProvider::up());
        let mut input = ScriptedInput::lines(&["  olá  "]);
        let text = run(&mut conv, &mut input).await;

        assert!(text.contains("IA:"));
        assert!(text.contains("eco: olá"));
        assert!(!text.contains("Erro:"));
        assert_eq!(conv.provider().calls(), 1);
        assert_eq!(conv.session().consecutive_failures(), 0);
    }

    #[tokio::test]
    async fn test_blank_input_reaches_nothing() {
        let mut conv = conversation(CountingProvider::up());
        let mut input = ScriptedInput::lines(&["", "   ", "\t"]);
        let text = run(&mut conv, &mut input).await;

        assert_eq!(text.matches(BLANK_INPUT_GUIDANCE).count(), 3);
        assert_eq!(conv.provider().calls(), 0);
        assert!(!text.contains("IA:"));
    }

    #[tokio::test]
    async fn test_commands_never_reach_provider() {
        let mut conv = conversation(CountingProvider::up());
        let mut input =
            ScriptedInput::lines(&["AJUDA", "sobre", "Models", "limpar", "clear", "help"]);
        let text = run(&mut conv, &mut input).await;

        assert_eq!(conv.provider().calls(), 0);
        assert_eq!(input.clears, 2);
        assert!(text.contains("Breezy AI Connect - v"));
        assert!(text.contains("qwen2.5:1.5b"));
        // initial banner plus one per clear
        assert_eq!(text.matches("Bem-vindo!").count(), 3);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut conv = conversation(CountingProvider::up());
        let mut input = ScriptedInput::lines(&["sair", "isto não deve ser lido"]);
        let text = run(&mut conv, &mut input).await;

        assert!(text.contains("Obrigado por usar nossa AI. Até breve!"));
        assert_eq!(input.events.len(), 1);
        assert_eq!(conv.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_end_of_input_says_goodbye() {
        let mut conv = conversation(CountingProvider::up());
        let mut input = ScriptedInput::lines(&[]);
        let text = run(&mut conv, &mut input).await;
        assert!(text.contains("Obrigado por usar nossa AI. Até breve!"));
    }

    #[tokio::test]
    async fn test_interrupt_keeps_session() {
        let mut conv = conversation(CountingProvider::up());
        let mut input = ScriptedInput {
            events: VecDeque::from([
                InputEvent::Interrupted,
                InputEvent::Message("oi".into()),
            ]),
            clears: 0,
        };
        let text = run(&mut conv, &mut input).await;

        assert!(text.contains("Ctrl+D"));
        assert!(text.contains("eco: oi"));
        assert_eq!(conv.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_quit_after_offline_ends_successfully() {
        let mut conv = conversation(CountingProvider::down());
        let mut input = ScriptedInput::lines(&["a", "b", "c", "d", "sair", "depois"]);
        let mut out = Vec::new();

        let result = run_chat_loop(&mut conv, &mut input, &mut out, &options()).await;

        assert!(result.is_ok());
        assert_eq!(input.events.len(), 1);
        assert_eq!(conv.mode(), Mode::Offline);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Obrigado por usar nossa AI. Até breve!"));
    }
}

//! Chat command parsing and the static texts they print.
//!
//! Commands are bare words typed in place of a prompt, matched
//! case-insensitively: `ajuda`, `limpar`, `sobre`, `modelos`, `sair`, plus
//! the English synonyms `help`, `clear`, `about`, `models`, `quit`.

use std::io::{self, Write};

use console::style;

/// Control commands available in the chat loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal and redraw the banner.
    Clear,
    /// Show program information.
    About,
    /// Show the active model.
    Models,
    /// Say goodbye and end the session.
    Quit,
}

/// Parse an input line as a command.
///
/// Returns `None` for anything that is not exactly one command word,
/// including the empty string.
pub fn parse(input: &str) -> Option<ChatCommand> {
    match input.trim().to_lowercase().as_str() {
        "ajuda" | "help" => Some(ChatCommand::Help),
        "limpar" | "clear" => Some(ChatCommand::Clear),
        "sobre" | "about" => Some(ChatCommand::About),
        "modelos" | "models" => Some(ChatCommand::Models),
        "sair" | "quit" => Some(ChatCommand::Quit),
        _ => None,
    }
}

/// Print the list of commands.
pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    let entries = [
        ("ajuda", "Exibe esta mensagem de ajuda"),
        ("limpar", "Limpa a tela do terminal"),
        ("sobre", "Exibe informações sobre este programa"),
        ("modelos", "Exibe informações sobre os modelos de IA disponíveis"),
        ("sair", "Encerra o programa"),
    ];

    writeln!(out)?;
    writeln!(out, "  {}", style("Comandos disponíveis:").green())?;
    for (name, description) in entries {
        writeln!(out, "  {:<8} - {description}", style(name).yellow())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Ctrl+D encerra a sessão; os comandos também aceitam help, clear, about, models e quit.")
            .dim()
    )?;
    writeln!(out)
}

/// Print the program name, version and a short description.
pub fn print_about(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style(format!("Breezy AI Connect - v{}", env!("CARGO_PKG_VERSION"))).green()
    )?;
    writeln!(
        out,
        "  Uma interface simplificada para consultar modelos de IA diretamente do terminal."
    )?;
    writeln!(
        out,
        "  As respostas são geradas por um servidor de modelos executado localmente."
    )?;
    writeln!(out)
}

/// Print the active model and how the offline fallback works.
pub fn print_models(out: &mut impl Write, model: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("Modelos de IA Disponíveis:").green())?;
    writeln!(
        out,
        "  Atualmente estamos utilizando o modelo {}.",
        style(model).yellow()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  Se este modelo não estiver respondendo corretamente, o programa entrará em modo de fallback."
    )?;
    writeln!(
        out,
        "  Para usar outro modelo, use a opção {} ou edite ~/.breezy/config.toml.",
        style("--model").yellow()
    )?;
    writeln!(out)
}

/// Print the goodbye line.
pub fn print_farewell(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", style("Obrigado por usar nossa AI. Até breve!").blue())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_parse_portuguese_commands() {
        assert_eq!(parse("ajuda"), Some(ChatCommand::Help));
        assert_eq!(parse("limpar"), Some(ChatCommand::Clear));
        assert_eq!(parse("sobre"), Some(ChatCommand::About));
        assert_eq!(parse("modelos"), Some(ChatCommand::Models));
        assert_eq!(parse("sair"), Some(ChatCommand::Quit));
    }

    #[test]
    fn test_parse_english_synonyms() {
        assert_eq!(parse("help"), Some(ChatCommand::Help));
        assert_eq!(parse("clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("about"), Some(ChatCommand::About));
        assert_eq!(parse("models"), Some(ChatCommand::Models));
        assert_eq!(parse("quit"), Some(ChatCommand::Quit));
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(parse("AJUDA"), Some(ChatCommand::Help));
        assert_eq!(parse("Sair"), Some(ChatCommand::Quit));
        assert_eq!(parse("mOdElOs"), Some(ChatCommand::Models));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("ajuda me"), None);
        assert_eq!(parse("/help"), None);
        assert_eq!(parse("exit"), None);
        assert_eq!(parse("qual é o sentido da vida?"), None);
    }

    #[test]
    fn test_help_lists_every_command() {
        let text = render(|out| print_help(out));
        for word in ["ajuda", "limpar", "sobre", "modelos", "sair"] {
            assert!(text.contains(word), "help is missing {word}");
        }
    }

    #[test]
    fn test_about_shows_version() {
        let text = render(|out| print_about(out));
        assert!(text.contains(&format!("Breezy AI Connect - v{}", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn test_models_names_active_model() {
        let text = render(|out| print_models(out, "qwen2.5:1.5b"));
        assert!(text.contains("qwen2.5:1.5b"));
        assert!(text.contains("fallback"));
    }

    #[test]
    fn test_farewell() {
        let text = render(|out| print_farewell(out));
        assert!(text.contains("Obrigado por usar nossa AI. Até breve!"));
    }
}

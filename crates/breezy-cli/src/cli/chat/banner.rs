//! Welcome banner display for chat sessions.

use std::io::{self, Write};

use console::style;

/// Print the welcome banner at the start of a chat session and after
/// `limpar`.
///
/// `model` and `host` are shown dimmed under the greeting.
pub fn print_welcome_banner(out: &mut impl Write, model: &str, host: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Bem-vindo! Faça uma pergunta para começar a conversa.").cyan()
    )?;
    writeln!(
        out,
        "  {} {} {}",
        style("Digite").cyan(),
        style("'ajuda'").yellow(),
        style("para ver os comandos disponíveis.").cyan()
    )?;
    writeln!(
        out,
        "  {} {} {}",
        style("Digite").cyan(),
        style("'sair'").yellow(),
        style("para encerrar o programa.").cyan()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}  {}",
        style("Modelo:").bold(),
        style(model).dim()
    )?;
    writeln!(
        out,
        "  {}  {}",
        style("Servidor:").bold(),
        style(host).dim()
    )?;
    writeln!(out, "  {}", style("---").dim())?;
    writeln!(out)
}

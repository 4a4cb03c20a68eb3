//! Colored status lines and terminal markdown for the CLI.

use colored::Colorize;
use crossterm::style::Color;
use std::io::{self, IsTerminal, Write};
use termimad::{MadSkin, StyledChar};

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Confirmation on stdout, e.g. after writing a file.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Write a markdown report, rendered with termimad when stdout is a TTY and
/// verbatim otherwise so pipes and redirects get plain markdown.
pub fn render_markdown(markdown: &str, output: &mut dyn Write) -> io::Result<()> {
    if io::stdout().is_terminal() {
        write!(output, "{}", report_skin().term_text(markdown))
    } else {
        write!(output, "{}", markdown)
    }
}

fn report_skin() -> MadSkin {
    let mut skin = MadSkin::default();

    skin.set_headers_fg(Color::Cyan);
    skin.bold.set_fg(Color::Red);
    skin.bullet = StyledChar::from_fg_char(Color::Blue, '•');
    // Module paths and cycle chains are inline code.
    skin.inline_code.set_fg(Color::Yellow);
    skin.code_block.set_fg(Color::Green);
    skin.italic.set_fg(Color::DarkGrey);
    skin.horizontal_rule = StyledChar::from_fg_char(Color::DarkGrey, '─');

    skin
}

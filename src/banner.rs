use console::{measure_text_width, style};

/// Prints a framed summary of the co-authors about to be credited, on
/// standard error so it never mixes with git's own output.
///
/// # Examples
///
/// ```no_run
/// use cocommit::banner::print_banner;
///
/// print_banner(&["alice <alice@example.com>".to_string()], true);
/// ```
pub fn print_banner(co_authors: &[String], inline: bool) {
    eprintln!();
    for line in framed(&banner_lines(co_authors, inline)) {
        eprintln!("{}", line);
    }
    eprintln!();
}

/// Draws a box around `lines`, sized to the widest **visible** line.
/// [`measure_text_width`] keeps ANSI color codes from throwing off the
/// padding.
fn framed(lines: &[String]) -> Vec<String> {
    let width = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0) + 2;
    let border = "═".repeat(width);
    let edge = |s: &str| style(s.to_string()).blue().bold().to_string();

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(edge(&format!("╔{}╗", border)));
    for line in lines {
        let pad = width - 1 - measure_text_width(line);
        out.push(format!("{}{}{}{}", edge("║ "), line, " ".repeat(pad), edge("║")));
    }
    out.push(edge(&format!("╚{}╝", border)));
    out
}

/// Lines of the summary box: title, one line per co-author, then where the
/// message comes from.
///
/// Co-author lines are styled, so measure them with
/// `console::measure_text_width` rather than `str::len()`.
fn banner_lines(co_authors: &[String], inline: bool) -> Vec<String> {
    let noun = if co_authors.len() == 1 {
        "co-author"
    } else {
        "co-authors"
    };
    let mut lines = vec![
        format!("Crediting {} {}", co_authors.len(), noun),
        String::new(),
    ];
    lines.extend(
        co_authors
            .iter()
            .map(|c| style(format!("Co-Authored-By: {}", c)).cyan().to_string()),
    );
    lines.push(String::new());
    lines.push(if inline {
        String::from("Trailers will be added to your -m message.")
    } else {
        style("Opening your editor for the commit message.")
            .yellow()
            .to_string()
    });
    lines
}

//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use comex_core::client::Client;
use comex_core::process::{Board, BoardColumn, Process, Stage};
use unicode_width::UnicodeWidthStr;

/// Print a single process.
pub fn print_process(process: &Process) {
    println!(
        "{} {}",
        process.reference.cyan().bold(),
        format!("({})", process.id).dimmed()
    );
    println!();

    let counterpart_label = match process.direction {
        comex_core::process::Direction::Import => "Importer",
        comex_core::process::Direction::Export => "Exporter",
    };

    println!("{}: {}", "Stage".bold(), stage_colored(process.stage, process.stage.title()));
    println!("{}: {}", "Direction".bold(), process.direction);
    println!("{}: {}", counterpart_label.bold(), process.counterpart());
    println!("{}: {}", "Acquirer".bold(), process.acquirer);
    println!("{}: {}", "Supplier".bold(), process.supplier);
    println!("{}: {}", "Client ref".bold(), process.client_reference);
    println!("{}: {}", "Transport".bold(), process.transport);
    if let Some(agent) = &process.freight_agent {
        println!("{}: {}", "Freight agent".bold(), agent);
    }
    println!("{}: {}", "Created".bold(), process.created_at.dimmed());
    println!("{}: {}", "Order".bold(), process.order.to_string().dimmed());
}

/// Print processes as a table.
pub fn print_processes_table(processes: &[Process]) {
    if processes.is_empty() {
        println!("{}", "No processes found.".dimmed());
        return;
    }

    println!(
        "{:<24} {:<16} {:<8} {:<24} {:<22}",
        "ID", "Reference", "Dir", "Counterpart", "Stage"
    );
    println!("{}", "─".repeat(96));

    for process in processes {
        let stage = pad_right(process.stage.as_str(), 22);
        println!(
            "{} {} {} {} {}",
            pad_right(&truncate_visual(&process.id, 24), 24).dimmed(),
            pad_right(&truncate_visual(&process.reference, 16), 16),
            pad_right(process.direction.as_str(), 8),
            pad_right(&truncate_visual(process.counterpart(), 24), 24),
            stage_colored(process.stage, &stage)
        );
    }

    println!();
    println!("{} process(es) total", processes.len());
}

/// Print the pipeline stages in order.
pub fn print_stages() {
    for (i, stage) in Stage::ALL.iter().enumerate() {
        let marker = if stage.is_active() { " " } else { "✓" };
        println!(
            " {} {} {:<24} {}",
            format!("{}.", i + 1).dimmed(),
            marker.green(),
            stage_colored(*stage, stage.as_str()),
            stage.title().dimmed()
        );
    }
}

/// Print clients with their suppliers.
pub fn print_clients(clients: &[Client]) {
    if clients.is_empty() {
        println!("{}", "No clients registered.".dimmed());
        return;
    }

    for client in clients {
        println!(
            "{} {} {}",
            client.name.cyan().bold(),
            client.tax_id,
            format!("({})", client.id).dimmed()
        );
        if client.suppliers.is_empty() {
            println!("   {}", "no suppliers".dimmed());
        }
        for supplier in &client.suppliers {
            println!(
                "   {} {} {}",
                "·".dimmed(),
                supplier.name,
                supplier.id.dimmed()
            );
        }
    }

    println!();
    println!("{} client(s) total", clients.len());
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

fn stage_colored(stage: Stage, text: &str) -> ColoredString {
    match stage {
        Stage::AwaitingShipment => text.white(),
        Stage::InTransit => text.blue(),
        Stage::AwaitingRegistration => text.cyan(),
        Stage::RegisterDeclaration => text.yellow(),
        Stage::AwaitingChannel => text.magenta(),
        Stage::AwaitingClosure => text.bright_red(),
        Stage::Closed => text.green().dimmed(),
    }
}

/// Short column names for narrow layouts.
fn stage_short_name(stage: Stage) -> &'static str {
    match stage {
        Stage::AwaitingShipment => "SHIPMENT",
        Stage::InTransit => "TRANSIT",
        Stage::AwaitingRegistration => "REGISTRATION",
        Stage::RegisterDeclaration => "DECLARATION",
        Stage::AwaitingChannel => "CHANNEL",
        Stage::AwaitingClosure => "CLOSURE",
        Stage::Closed => "CLOSED",
    }
}

fn column_header_plain(column: &BoardColumn, max_width: usize) -> String {
    let count = column.processes.len();
    let suffix = if count > 0 {
        format!(" {}", count)
    } else {
        String::new()
    };
    let full = format!("{}{}", column.stage.title().to_uppercase(), suffix);
    if UnicodeWidthStr::width(full.as_str()) <= max_width {
        return full;
    }
    truncate_visual(&format!("{}{}", stage_short_name(column.stage), suffix), max_width)
}

fn format_card(process: &Process, width: usize) -> String {
    let text = match process.counterpart() {
        "" => process.reference.clone(),
        who => format!("{} {}", process.reference, who),
    };
    pad_right(&truncate_visual(&text, width), width)
}

/// Print the process board.
pub fn print_board(board: &Board) {
    if board.total() == 0 {
        println!(
            "{}",
            "No processes found. Create one with 'comex process new <reference>'.".dimmed()
        );
        return;
    }

    let width = term_width();

    if width < 100 {
        print_board_compact(board);
    } else {
        print_board_wide(board, width);
    }

    println!(
        " {} {} processes {} {} active",
        "■".cyan(),
        board.total().to_string().bold(),
        "·".dimmed(),
        board.active().to_string().green()
    );
}

fn border(left: &str, mid: &str, right: &str, num_cols: usize, col_width: usize) {
    print!("{}", left.dimmed());
    for i in 0..num_cols {
        print!("{}", "─".repeat(col_width).dimmed());
        if i < num_cols - 1 {
            print!("{}", mid.dimmed());
        }
    }
    println!("{}", right.dimmed());
}

/// Columns side by side, one per stage.
fn print_board_wide(board: &Board, term_w: usize) {
    let num_cols = board.columns.len();
    if num_cols == 0 {
        return;
    }
    let available = term_w.saturating_sub(num_cols + 1);
    let col_width = (available / num_cols).clamp(12, 30);

    border("┌", "┬", "┐", num_cols, col_width);

    print!("{}", "│".dimmed());
    for (i, col) in board.columns.iter().enumerate() {
        let header = column_header_plain(col, col_width);
        let padding = col_width.saturating_sub(UnicodeWidthStr::width(header.as_str()));
        let left_pad = padding / 2;
        print!(
            "{}{}{}",
            " ".repeat(left_pad),
            stage_colored(col.stage, &header).bold(),
            " ".repeat(padding - left_pad)
        );
        if i < num_cols - 1 {
            print!("{}", "│".dimmed());
        }
    }
    println!("{}", "│".dimmed());

    border("├", "┼", "┤", num_cols, col_width);

    let rows = board
        .columns
        .iter()
        .map(|c| c.processes.len())
        .max()
        .unwrap_or(0);
    for row in 0..rows {
        print!("{}", "│".dimmed());
        for (ci, col) in board.columns.iter().enumerate() {
            match col.processes.get(row) {
                Some(process) => {
                    let card = format_card(process, col_width);
                    print!("{}", stage_colored(col.stage, &card));
                }
                None => print!("{}", " ".repeat(col_width)),
            }
            if ci < num_cols - 1 {
                print!("{}", "│".dimmed());
            }
        }
        println!("{}", "│".dimmed());
    }

    border("└", "┴", "┘", num_cols, col_width);
}

/// Stages listed vertically for narrow terminals.
fn print_board_compact(board: &Board) {
    println!("{}", " PROCESS BOARD ".on_blue().white().bold());
    println!();

    for col in &board.columns {
        if col.processes.is_empty() {
            continue;
        }

        let header = column_header_plain(col, 40);
        println!(" {} {}", "▸".dimmed(), stage_colored(col.stage, &header).bold());

        for process in &col.processes {
            let marker = if process.active { "·".dimmed() } else { "✓".green() };
            println!(
                "   {} {} {} {}",
                marker,
                stage_colored(col.stage, &process.reference),
                process.counterpart(),
                process.id.dimmed()
            );
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("short", 10), "short");
        assert_eq!(truncate_visual("IMP-2024-001", 8), "IMP-20..");
        assert_eq!(truncate_visual("abcdef", 3), "...");
    }

    #[test]
    fn test_column_header_abbreviates() {
        let column = BoardColumn {
            stage: Stage::AwaitingRegistration,
            processes: Vec::new(),
        };
        assert_eq!(column_header_plain(&column, 30), "AWAITING REGISTRATION");
        assert_eq!(column_header_plain(&column, 14), "REGISTRATION");
    }
}

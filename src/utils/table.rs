use comfy_table::{modifiers, presets, Cell, Color, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};

use crate::models::{Product, Verdict};

/// Table preset shared by every listing the CLI prints.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn verdict_cell(verdict: Verdict, text: &str) -> Cell {
    let cell = Cell::new(text);
    match verdict {
        Verdict::Flagged => cell.fg(Color::Red),
        Verdict::Alternative => cell.fg(Color::Green),
        Verdict::Unknown => cell,
    }
}

/// Name / origin / category / barcode rows, coloured by verdict.
pub fn product_table(products: &[Product]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Name", "Origin Country", "Category", "Barcode"]);
    for p in products {
        let verdict = p.verdict();
        table.add_row(vec![
            verdict_cell(verdict, &p.name),
            verdict_cell(verdict, &format!("{} {}", p.origin.display_name(), verdict.symbol())),
            Cell::new(&p.category),
            Cell::new(p.barcode.as_deref().unwrap_or("N/A")),
        ]);
    }
    table
}

/// Related alternatives with their details column.
pub fn related_table(products: &[Product]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Name", "Origin Country", "Details"]);
    for p in products {
        let verdict = p.verdict();
        table.add_row(vec![
            verdict_cell(verdict, &p.name),
            verdict_cell(verdict, p.origin.display_name()),
            Cell::new(p.details.as_deref().unwrap_or("No details available")),
        ]);
    }
    table
}

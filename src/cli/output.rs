use cfipcheck::{CidrSet, Summary};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;
use std::io::{self, Write};

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  CIDR Blocks In CIDR Format
--------------------------------------------------------------------------------------*/

pub fn cidr_blocks(cidr_set: &CidrSet) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for block in cidr_set.blocks() {
        writeln!(stdout, "{block}")?;
    }
    stdout.flush()
}

/*--------------------------------------------------------------------------------------
  Summary Table
--------------------------------------------------------------------------------------*/

pub fn summary_table(summary: &Summary) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Result")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Addresses")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    table.add_row(vec![Cell::new("CloudFront"), Cell::new(summary.matched)]);
    table.add_row(vec![Cell::new("Not CloudFront"), Cell::new(summary.unmatched)]);
    table.add_row(vec![Cell::new("Invalid"), Cell::new(summary.invalid)]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(summary.total()).add_attribute(Attribute::Bold),
    ]);

    // Right-align the count column
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");
}

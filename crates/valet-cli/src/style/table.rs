//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use valet::{Capacity, TicketStatus};

use super::colors::SemanticStyle;

const STATUS_COLUMNS: [&str; 3] = ["Slot No.", "Registration No", "Driver Age"];

/// Creates a table of active tickets, one row per occupied slot.
pub fn status_table(tickets: &[TicketStatus]) -> Table {
    let mut table = Table::new();

    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = STATUS_COLUMNS
        .iter()
        .map(|col| {
            if super::no_color() {
                Cell::new(col)
            } else {
                Cell::new(col)
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan)
            }
        })
        .collect();
    table.set_header(header_cells);

    for ticket in tickets {
        table.add_row(vec![
            ticket.slot.to_string(),
            ticket.registration.to_string(),
            ticket.driver_age.to_string(),
        ]);
    }

    table
}

/// Prints the active tickets followed by an occupancy footer.
pub fn print_status_table(capacity: Capacity, tickets: &[TicketStatus]) {
    if tickets.is_empty() {
        println!("{}", format!("Parking lot is empty (0/{capacity} slots).").muted());
        return;
    }

    println!("{}", status_table(tickets));
    println!(
        "{}",
        format!("({}/{capacity} slots occupied)", tickets.len()).muted()
    );
}

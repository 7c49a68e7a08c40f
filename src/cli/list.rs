use super::ui;
use crate::core::catalog::CurrencyCatalog;
use comfy_table::Cell;

/// Prints the supported currencies in catalog order.
pub fn run(catalog: &CurrencyCatalog) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);

    for entry in catalog.entries() {
        table.add_row(vec![Cell::new(entry.code), Cell::new(entry.name)]);
    }

    println!("{table}");
}

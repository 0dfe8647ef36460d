//! The product listing command.

use bankfeed_products::ProductRegistry;

/// Prints the registered product selectors, one per line.
pub fn run() {
    for name in ProductRegistry::names() {
        println!("{name}");
    }
    println!("all");
}

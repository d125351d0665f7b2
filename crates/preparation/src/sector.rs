/// GICS sectors, checked in this order.
const SECTORS: [&str; 11] = [
    "Industrials",
    "Financials",
    "Consumer Discretionary",
    "Information Technology",
    "Health Care",
    "Real Estate",
    "Materials",
    "Consumer Staples",
    "Energy",
    "Utilities",
    "Communication Services",
];

/// Reduces an index or sector description such as `"S&P 500 Health Care Sector"`
/// to its sector name. Names mentioning no sector are returned unchanged.
pub fn map_to_sector(name: &str) -> &str {
    SECTORS
        .iter()
        .find(|sector| name.contains(*sector))
        .copied()
        .unwrap_or(name)
}

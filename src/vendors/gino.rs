use super::inner_text;
use crate::normalize::{clean_name, compact, extract_digits, strip_parenthetical};
use crate::{Extraction, Extractor, Record, SkipReason};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref TR: Selector = Selector::parse("tr").expect(E);
    static ref TD: Selector = Selector::parse("td").expect(E);
}

const VENDOR_ID: &str = "Gino";

/// Sizes on offer and the cell holding each one's price.
const SIZES: [(u16, usize); 2] = [(28, 2), (45, 3)];

/// One table row per pizza: name, description, then one price per size.
#[derive(Debug)]
pub struct Gino;

impl Extractor for Gino {
    fn vendor_id(&self) -> &'static str {
        VENDOR_ID
    }

    fn extract(&self, doc: &Html) -> Extraction {
        Extraction::from_results(
            doc.select(&TR)
                .enumerate()
                .skip(1)
                .flat_map(|(i, tr)| parse_row(tr).into_iter().map(move |r| (i, r))),
        )
    }
}

/// Cells up to the last price; a shorter row is skipped whole.
const ROW_CELLS: usize = 4;

/// A short or nameless row yields a single skip; otherwise one result per size.
fn parse_row(tr: ElementRef<'_>) -> Vec<Result<Record, SkipReason>> {
    let cells: Vec<String> = tr.select(&TD).map(inner_text).collect();
    if cells.len() < ROW_CELLS {
        return vec![Err(SkipReason::MissingCell(cells.len()))];
    }

    let Some(name) = clean_name(&strip_parenthetical(&cells[0])) else {
        return vec![Err(SkipReason::EmptyName)];
    };

    SIZES
        .iter()
        .map(|&(size, index)| {
            let cell = &cells[index];
            let price = extract_digits(&compact(cell), 3, 4)
                .ok_or_else(|| SkipReason::NoPrice(cell.trim().to_string()))?;
            Ok(Record::new(name.as_str(), size, VENDOR_ID, price))
        })
        .collect()
}

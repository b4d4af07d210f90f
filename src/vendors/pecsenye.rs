use super::inner_text;
use crate::normalize::{clean_name, strip_currency_suffix};
use crate::{Extraction, Extractor, Record, SkipReason};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use std::ops::RangeInclusive;

const E: &str = "Invalid selector";
lazy_static! {
    static ref TR: Selector = Selector::parse("tr").expect(E);
    static ref TD: Selector = Selector::parse("td").expect(E);
    static ref H4: Selector = Selector::parse("h4").expect(E);
}

const VENDOR_ID: &str = "Pecsenye";
const SIZE: u16 = 30;

/// Rows holding pizzas. Everything before and after is page furniture.
const ITEM_ROWS: RangeInclusive<usize> = 1..=38;

#[derive(Debug)]
pub struct Pecsenye;

impl Extractor for Pecsenye {
    fn vendor_id(&self) -> &'static str {
        VENDOR_ID
    }

    fn extract(&self, doc: &Html) -> Extraction {
        Extraction::from_results(
            doc.select(&TR)
                .enumerate()
                .filter(|(i, _)| ITEM_ROWS.contains(i))
                .map(|(i, tr)| (i, parse_row(tr))),
        )
    }
}

fn parse_row(tr: ElementRef<'_>) -> Result<Record, SkipReason> {
    let name = tr
        .select(&H4)
        .next()
        .ok_or(SkipReason::MissingElement("h4"))?;
    let name = clean_name(&inner_text(name)).ok_or(SkipReason::EmptyName)?;

    let price = tr
        .select(&TD)
        .nth(1)
        .map(inner_text)
        .ok_or(SkipReason::MissingCell(1))?;
    let price = strip_currency_suffix(&price)
        .ok_or_else(|| SkipReason::NoPrice(price.trim().to_string()))?;

    Ok(Record::new(name, SIZE, VENDOR_ID, price))
}

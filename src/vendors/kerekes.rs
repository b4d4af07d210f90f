use super::inner_text;
use crate::normalize::{clean_name, strip_currency_suffix};
use crate::{Extraction, Extractor, Record, Skip, SkipReason};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref CATEGORY: Selector = Selector::parse("div.etel-kategoria").expect(E);
    static ref ITEM: Selector = Selector::parse("div.etlap_wrap_table").expect(E);
    static ref NAME: Selector = Selector::parse("span.etelnev_table").expect(E);
    static ref PRICE: Selector = Selector::parse("div.ar_table").expect(E);
}

const VENDOR_ID: &str = "Kerekes";
const SIZE: u16 = 28;

/// The menu is split into category panels; pizzas are the second one.
const PIZZA_CATEGORY: usize = 1;

#[derive(Debug)]
pub struct Kerekes;

impl Extractor for Kerekes {
    fn vendor_id(&self) -> &'static str {
        VENDOR_ID
    }

    fn extract(&self, doc: &Html) -> Extraction {
        let Some(panel) = doc.select(&CATEGORY).nth(PIZZA_CATEGORY) else {
            return Extraction {
                records: vec![],
                skipped: vec![Skip {
                    row: PIZZA_CATEGORY,
                    reason: SkipReason::MissingElement("div.etel-kategoria"),
                }],
            };
        };

        Extraction::from_results(
            panel
                .select(&ITEM)
                .enumerate()
                .map(|(i, item)| (i, parse_item(item))),
        )
    }
}

fn parse_item(item: ElementRef<'_>) -> Result<Record, SkipReason> {
    let name = item
        .select(&NAME)
        .next()
        .ok_or(SkipReason::MissingElement("span.etelnev_table"))?;
    let name = clean_name(&inner_text(name)).ok_or(SkipReason::EmptyName)?;

    let price = item
        .select(&PRICE)
        .next()
        .map(inner_text)
        .ok_or(SkipReason::MissingElement("div.ar_table"))?;
    let price = strip_currency_suffix(&price)
        .ok_or_else(|| SkipReason::NoPrice(price.trim().to_string()))?;

    Ok(Record::new(name, SIZE, VENDOR_ID, price))
}

use std::io::{self, Write};

/// One price point: an item in one size from one vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub item_name: String,
    pub size: u16,
    pub vendor_id: String,
    pub price: u32,
}

impl Record {
    pub fn new(item_name: impl Into<String>, size: u16, vendor_id: &str, price: u32) -> Self {
        Record {
            item_name: item_name.into(),
            size,
            vendor_id: vendor_id.to_string(),
            price,
        }
    }

    /// Writes `size,price,vendorId,itemName` followed by `\n`.
    pub fn write_line<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(
            w,
            "{},{},{},{}",
            self.size,
            self.price,
            quote(&self.vendor_id),
            quote(&self.item_name)
        )
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

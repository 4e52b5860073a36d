//! Basic Conversion Example
//!
//! This example demonstrates the most basic usage of sheet2vcf:
//! converting a contact spreadsheet to a vCard file using the
//! suggested column mapping.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example basic_conversion -- leads.csv contacts.vcf
//! ```
//!
//! If no input is provided, a small built-in CSV is converted instead.

use std::fs::File;
use std::io::Cursor;

use sheet2vcf::{ConverterBuilder, InputFormat};

const SAMPLE_CSV: &str = "\
Full Name,Mobile,Email Address,Company
Jane Q. Public,555-1234,jane@x.com,\"Acme, Inc.\"
John Smith,+1 (555) 000-0000,,
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = std::env::args().nth(1);
    let output_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "contacts.vcf".to_string());

    // Create a converter with default settings
    let converter = ConverterBuilder::new().build()?;

    let output = File::create(&output_path).map_err(|e| {
        eprintln!("Error: Could not create output file '{}'", output_path);
        eprintln!("  {}", e);
        e
    })?;

    let count = match &input_path {
        Some(path) => {
            println!("Converting {} to {}...", path, output_path);
            let data = converter.load_path(path)?;
            data.suggested_mapping.validate()?;
            let contacts = converter.map_rows(&data.table.rows, &data.suggested_mapping);
            let document = converter.render(&contacts);
            document.write_to(output)?;
            document.contact_count()
        }
        None => {
            println!("Converting built-in sample to {}...", output_path);
            converter.convert(Cursor::new(SAMPLE_CSV), InputFormat::Csv, output)?
        }
    };

    println!("Conversion completed successfully!");
    println!("{} contacts written to: {}", count, output_path);

    Ok(())
}

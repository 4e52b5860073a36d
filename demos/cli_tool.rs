//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using sheet2vcf for converting contact spreadsheets to vCard.
//!
//! Set `RUST_LOG=sheet2vcf=debug` to see per-stage log output.

use std::io;
use std::process;

use sheet2vcf::{ContactField, ConverterBuilder, FieldMapping, SheetToVcfError, SpreadsheetData};
use tracing_subscriber::EnvFilter;

struct Options {
    input_path: String,
    output_path: String,
    prefix: Option<String>,
    delimiter: u8,
    overrides: Vec<(ContactField, String)>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <input.csv|xlsx> <output.vcf|-> [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --prefix <label>     Prepend \"<label> - \" to every display name");
    eprintln!("  --name <col>         Column for the name (0-based index or header)");
    eprintln!("  --phone <col>        Column for the phone number");
    eprintln!("  --email <col>        Column for the email address");
    eprintln!("  --company <col>      Column for the company");
    eprintln!("  --notes <col>        Column for the notes");
    eprintln!("  --delimiter <char>   CSV delimiter (default: ',')");
    eprintln!("\nExamples:");
    eprintln!("  {} leads.csv contacts.vcf", program);
    eprintln!("  {} leads.xlsx - --prefix \"Expo 2026\"", program);
    eprintln!("  {} export.csv out.vcf --delimiter ';' --name 2 --phone Mobil", program);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    if args.len() < 3 {
        return Err("missing input or output path".to_string());
    }

    let mut options = Options {
        input_path: args[1].clone(),
        output_path: args[2].clone(),
        prefix: None,
        delimiter: b',',
        overrides: Vec::new(),
    };

    let mut i = 3;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{} requires a value", flag))?;

        match flag {
            "--prefix" => options.prefix = Some(value.clone()),
            "--delimiter" => {
                let value = if value == "\\t" { "\t" } else { value.as_str() };
                match value.as_bytes() {
                    [byte] => options.delimiter = *byte,
                    _ => return Err(format!("Invalid delimiter: {}", value)),
                }
            }
            "--name" => options.overrides.push((ContactField::Name, value.clone())),
            "--phone" => options.overrides.push((ContactField::Phone, value.clone())),
            "--email" => options.overrides.push((ContactField::Email, value.clone())),
            "--company" => options.overrides.push((ContactField::Company, value.clone())),
            "--notes" => options.overrides.push((ContactField::Notes, value.clone())),
            _ => return Err(format!("Unknown option: {}", flag)),
        }
        i += 2;
    }

    Ok(options)
}

/// 列指定（インデックスまたはヘッダー名）を列インデックスに解決
fn resolve_column(headers: &[String], column: &str) -> Result<usize, String> {
    if let Ok(index) = column.parse::<usize>() {
        return Ok(index);
    }
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(column.trim()))
        .ok_or_else(|| format!("No column named {:?}", column))
}

fn print_mapping(data: &SpreadsheetData, mapping: &FieldMapping) {
    eprintln!(
        "Loaded {} rows, {} columns",
        data.table.row_count(),
        data.table.column_count()
    );
    for field in ContactField::ALL {
        let column = match mapping.get(field) {
            Some(index) => {
                let header = data.table.headers.get(index).map(String::as_str);
                format!("{} ({})", index, header.unwrap_or("-"))
            }
            None => "-".to_string(),
        };
        eprintln!("  {:<8} {}", field.label(), column);
    }
}

fn run(options: &Options) -> Result<usize, Box<dyn std::error::Error>> {
    let mut builder = ConverterBuilder::new().with_delimiter(options.delimiter);
    if let Some(prefix) = &options.prefix {
        builder = builder.with_label_prefix(prefix.clone());
    }
    let converter = builder.build()?;

    let data = converter.load_path(&options.input_path)?;
    let mut mapping = data.suggested_mapping;
    for (field, column) in &options.overrides {
        let index = resolve_column(&data.table.headers, column)?;
        mapping.set(*field, Some(index));
    }
    print_mapping(&data, &mapping);
    mapping.validate()?;

    let contacts = converter.map_rows(&data.table.rows, &mapping);
    let document = converter.render(&contacts);

    if options.output_path == "-" {
        document.write_to(io::stdout().lock())?;
    } else {
        document.write_to(std::fs::File::create(&options.output_path)?)?;
    }

    if document.fits_qr_code() {
        eprintln!("Document is small enough to share as a QR code");
    }
    Ok(document.contact_count())
}

fn handle_error(error: &(dyn std::error::Error + 'static)) {
    match error.downcast_ref::<SheetToVcfError>() {
        Some(SheetToVcfError::MappingValidation(msg)) => {
            eprintln!("Mapping Error: {}", msg);
            eprintln!("Use --name or --phone to choose the column manually.");
        }
        Some(SheetToVcfError::Output(io_err)) => {
            eprintln!("Output Error: {}", io_err);
            eprintln!("Please check that the output location is writable.");
        }
        Some(SheetToVcfError::EmptyInput(msg)) => {
            eprintln!("Empty Input: {}", msg);
        }
        Some(SheetToVcfError::UnsupportedFormat(msg)) => {
            eprintln!("Unsupported Format: {}", msg);
            eprintln!("Supported extensions: csv, xlsx, xlsm, xlsb, xls, ods");
        }
        Some(err) if err.is_parse_error() => {
            eprintln!("Parse Error: {}", err);
            eprintln!("The file may be corrupted or not in the expected format.");
        }
        _ => eprintln!("Error: {}", error),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {}\n", msg);
            print_usage(args.first().map(String::as_str).unwrap_or("cli_tool"));
            process::exit(1);
        }
    };

    match run(&options) {
        Ok(count) => {
            if options.output_path != "-" {
                println!(
                    "Conversion completed: {} -> {} ({} contacts)",
                    options.input_path, options.output_path, count
                );
            }
        }
        Err(e) => {
            handle_error(e.as_ref());
            process::exit(1);
        }
    }
}

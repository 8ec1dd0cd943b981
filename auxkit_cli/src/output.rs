use anyhow::{bail, Result};
use auxkit_lib::{EnumOutput, EnumValue, LabelPair};
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(input: &str) -> Result<Self> {
        Ok(match input {
            "table" => OutputFormat::Table,
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            other => bail!(
                "unknown output format '{}'. Valid values: table, json, csv, markdown",
                other
            ),
        })
    }
}

#[derive(Tabled, Serialize)]
struct EnumRow {
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Comment")]
    #[serde(rename = "Comment")]
    comment: String,
}

#[derive(Tabled, Serialize)]
struct PairRow {
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Key")]
    #[serde(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

// -- Row builders --

/// Column headers (first-seen key order across all items) and one row per
/// item. Non-object items land in a single `value` column.
pub(crate) fn build_item_grid(items: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers: Vec<String> = Vec::new();
    for item in items {
        match item {
            Value::Object(map) => {
                for key in map.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            _ => {
                if !headers.iter().any(|h| h == "value") {
                    headers.push("value".to_string());
                }
            }
        }
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| match item {
                    Value::Object(map) => map.get(header).map(cell).unwrap_or_default(),
                    other if header == "value" => cell(other),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();
    (headers, rows)
}

fn build_enum_rows(output: &EnumOutput) -> Vec<EnumRow> {
    output
        .reverse_map
        .values()
        .map(|member| EnumRow {
            value: member.value,
            name: member.name.clone(),
            comment: output
                .comment
                .get(&EnumValue::Int(member.value))
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}

fn build_pair_rows(pairs: &[LabelPair]) -> Vec<PairRow> {
    pairs
        .iter()
        .map(|pair| PairRow {
            label: pair.k.clone(),
            value: pair.v.to_string(),
        })
        .collect()
}

/// Flattens nested objects into dotted key paths. Arrays stay whole.
pub(crate) fn build_field_rows(object: &Map<String, Value>) -> Vec<(String, String)> {
    fn walk(prefix: &str, object: &Map<String, Value>, out: &mut Vec<(String, String)>) {
        for (key, value) in object {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                Value::Object(nested) => walk(&path, nested, out),
                other => out.push((path, cell(other))),
            }
        }
    }
    let mut out = Vec::new();
    walk("", object, &mut out);
    out
}

/// Strings print bare; everything else prints as JSON.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// -- Printers --

pub fn print_items(items: &[Value], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(items),
        OutputFormat::Csv => {
            let (headers, rows) = build_item_grid(items);
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(&headers)?;
            for row in rows {
                wtr.write_record(&row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Table | OutputFormat::Markdown => {
            let (headers, rows) = build_item_grid(items);
            let mut builder = Builder::default();
            builder.push_record(headers);
            for row in rows {
                builder.push_record(row);
            }
            let mut table = builder.build();
            if *format == OutputFormat::Markdown {
                table.with(Style::markdown());
            }
            println!("{}", table);
        }
    }
    Ok(())
}

pub fn print_enum_output(output: &EnumOutput, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Csv => print_csv(build_enum_rows(output))?,
        OutputFormat::Table => println!("{}", Table::new(build_enum_rows(output))),
        OutputFormat::Markdown => print_markdown(build_enum_rows(output)),
    }
    Ok(())
}

pub fn print_pairs(pairs: &[LabelPair], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(pairs),
        OutputFormat::Csv => print_csv(build_pair_rows(pairs))?,
        OutputFormat::Table => println!("{}", Table::new(build_pair_rows(pairs))),
        OutputFormat::Markdown => print_markdown(build_pair_rows(pairs)),
    }
    Ok(())
}

pub fn print_object(object: &Map<String, Value>, format: &OutputFormat) -> Result<()> {
    let rows = || {
        build_field_rows(object)
            .into_iter()
            .map(|(key, value)| FieldRow { key, value })
    };
    match format {
        OutputFormat::Json => print_json(object),
        OutputFormat::Csv => print_csv(rows())?,
        OutputFormat::Table => println!("{}", Table::new(rows())),
        OutputFormat::Markdown => print_markdown(rows()),
    }
    Ok(())
}

fn print_markdown<R: Tabled>(rows: impl IntoIterator<Item = R>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

fn print_csv<R: Serialize>(rows: impl IntoIterator<Item = R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

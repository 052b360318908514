use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use msghdr_header::{Header, MessageType};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    /// Body bytes only.
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// How the body is rendered in non-raw output.
#[derive(Clone, Debug, Copy, Default, ValueEnum)]
pub enum BodyView {
    /// UTF-8 text, or a size marker for binary bodies.
    #[default]
    Text,
    Hex,
    /// Little-endian u32 (0 when shorter than 4 bytes).
    Uint,
}

#[derive(Serialize)]
struct HeaderOutput<'a> {
    type_code: u32,
    type_name: &'a str,
    id: u32,
    flags: u32,
    flag_names: Vec<&'static str>,
    body_size: usize,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    addr: Option<String>,
}

pub fn print_header(header: &Header, view: BodyView, format: OutputFormat) {
    let type_name = header.message_type().map_or("unknown", MessageType::name);
    let addr = render_addr(header);
    match format {
        OutputFormat::Json => {
            let out = HeaderOutput {
                type_code: header.type_code(),
                type_name,
                id: header.id,
                flags: header.flags().bits(),
                flag_names: header.flags().names(),
                body_size: header.body().len(),
                body: render_body(header, view),
                addr,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec![
                    "type".to_string(),
                    format!("{} ({type_name})", header.type_code()),
                ])
                .add_row(vec!["id".to_string(), header.id.to_string()])
                .add_row(vec!["flags".to_string(), header.flags().to_string()])
                .add_row(vec![
                    "body".to_string(),
                    format!(
                        "{} ({} bytes)",
                        render_body(header, view),
                        header.body().len()
                    ),
                ]);
            if let Some(addr) = &addr {
                table.add_row(vec!["addr".to_string(), addr.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "type={} ({}) id={} flags={} size={} addr={} body={}",
                header.type_code(),
                type_name,
                header.id,
                header.flags(),
                header.body().len(),
                addr.as_deref().unwrap_or("-"),
                render_body(header, view)
            );
        }
        OutputFormat::Raw => {
            print_raw(header.body().as_ref());
        }
    }
}

#[derive(Serialize)]
struct TypeOutput {
    code: u32,
    name: &'static str,
    carries_addr: bool,
}

pub fn print_types(format: OutputFormat) {
    let rows: Vec<TypeOutput> = MessageType::ALL
        .iter()
        .map(|kind| TypeOutput {
            code: kind.code(),
            name: kind.name(),
            carries_addr: kind.carries_addr(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CODE", "NAME", "ADDR"]);
            for row in &rows {
                table.add_row(vec![
                    row.code.to_string(),
                    row.name.to_string(),
                    if row.carries_addr { "yes" } else { "" }.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{}\t{}", row.code, row.name);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn render_addr(header: &Header) -> Option<String> {
    header.addr().map(|pb| match pb.to_addr() {
        Ok(addr) => addr.to_string(),
        Err(err) => format!("<invalid: {err}>"),
    })
}

fn render_body(header: &Header, view: BodyView) -> String {
    match view {
        BodyView::Text => match header.body_str() {
            Ok(text) => text.to_string(),
            Err(_) => format!("<binary {} bytes>", header.body().len()),
        },
        BodyView::Hex => hex::encode(header.body()),
        BodyView::Uint => header.body_to_u32().to_string(),
    }
}

use clap::{Args, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use msghdr_header::{Flags, MessageType};

use crate::exit::CliResult;
use crate::output::{BodyView, OutputFormat};

pub mod decode;
pub mod encode;
pub mod types;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a header and print its encoding.
    Encode(EncodeArgs),
    /// Decode a header and print its fields.
    Decode(DecodeArgs),
    /// List the known message type codes.
    Types,
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Types => types::run(format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message type, by name (`net-send`) or code (`6`).
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub kind: MessageType,
    /// Text body.
    #[arg(long, conflicts_with_all = ["uint", "hex", "file"])]
    pub data: Option<String>,
    /// u32 body (4 bytes, little-endian).
    #[arg(long, conflicts_with_all = ["data", "hex", "file"])]
    pub uint: Option<u32>,
    /// Hex-encoded body.
    #[arg(long, conflicts_with_all = ["data", "uint", "file"])]
    pub hex: Option<String>,
    /// Read body from file.
    #[arg(long, conflicts_with_all = ["data", "uint", "hex"])]
    pub file: Option<PathBuf>,
    /// Flags to set (comma-separated: query,response,from-net,to-net).
    #[arg(long = "flag", value_delimiter = ',')]
    pub flags: Vec<Flags>,
    /// Attach an address descriptor.
    #[arg(long)]
    pub addr: Option<SocketAddr>,
    /// IPv6 zone for the attached address.
    #[arg(long, requires = "addr")]
    pub zone: Option<String>,
    /// Use a fixed id instead of a random one.
    #[arg(long)]
    pub id: Option<u32>,
    /// Write raw bytes instead of hex.
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded header. Reads stdin when neither --hex nor --file is given.
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read the encoded header from a file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Treat file/stdin input as raw bytes instead of hex text.
    #[arg(long, conflicts_with = "hex")]
    pub raw: bool,
    /// How to render the body.
    #[arg(long, value_name = "VIEW", default_value = "text")]
    pub body: BodyView,
    /// Maximum accepted message size in bytes. Unlimited when omitted.
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<usize>,
    /// Reject unknown type codes.
    #[arg(long)]
    pub strict_type: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

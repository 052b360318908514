use std::fs;

use msghdr_addr::NetAddr;
use msghdr_header::{Body, Header};
use tracing::debug;

use crate::cmd::EncodeArgs;
use crate::exit::{io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::print_raw;

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let header = build_header(&args)?;
    let buf = header.marshal();
    debug!(
        type_code = header.type_code(),
        id = header.id,
        len = buf.len(),
        "encoded header"
    );

    if args.raw {
        print_raw(&buf);
    } else {
        println!("{}", hex::encode(&buf));
    }
    Ok(SUCCESS)
}

fn build_header(args: &EncodeArgs) -> CliResult<Header> {
    let mut header = Header::new(args.kind, resolve_body(args)?);
    if let Some(id) = args.id {
        header.id = id;
    }
    for flag in &args.flags {
        header.set_flag(*flag);
    }
    if let Some(sock) = args.addr {
        let mut addr = NetAddr::from(sock);
        if let Some(zone) = &args.zone {
            addr = addr.with_zone(zone.clone());
        }
        header.set_addr(&addr);
    }
    Ok(header)
}

fn resolve_body(args: &EncodeArgs) -> CliResult<Body<'static>> {
    if let Some(data) = &args.data {
        return Ok(Body::from(data.clone()));
    }
    if let Some(value) = args.uint {
        return Ok(Body::UInt32(value));
    }
    if let Some(text) = &args.hex {
        return decode_hex(text).map(Body::from);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map(Body::from)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Body::Empty)
}

pub(crate) fn decode_hex(text: &str) -> CliResult<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    hex::decode(compact).map_err(|err| CliError::new(USAGE, format!("invalid hex: {err}")))
}

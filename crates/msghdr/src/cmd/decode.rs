use std::fs;
use std::io::Read;

use msghdr_header::{DecodeConfig, Header};
use tracing::debug;

use crate::cmd::encode::decode_hex;
use crate::cmd::DecodeArgs;
use crate::exit::{header_error, io_error, CliResult, SUCCESS};
use crate::output::{print_header, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let buf = read_input(&args)?;
    let config = decode_config(&args);
    debug!(len = buf.len(), ?config, "decoding header");

    let header = Header::from_bytes_with_config(&buf, &config)
        .map_err(|err| header_error("decode failed", err))?;
    print_header(&header, args.body, format);
    Ok(SUCCESS)
}

fn decode_config(args: &DecodeArgs) -> DecodeConfig {
    DecodeConfig {
        max_message_size: args.max_size,
        require_known_type: args.strict_type,
    }
}

fn read_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(text) = &args.hex {
        return decode_hex(text);
    }

    let bytes = match &args.file {
        Some(path) => fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|err| io_error("failed reading stdin", err))?;
            buf
        }
    };

    if args.raw {
        return Ok(bytes);
    }
    decode_hex(&String::from_utf8_lossy(&bytes))
}

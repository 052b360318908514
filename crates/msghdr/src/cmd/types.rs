use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_types, OutputFormat};

pub fn run(format: OutputFormat) -> CliResult<i32> {
    print_types(format);
    Ok(SUCCESS)
}

use std::fs;

use fileckr_frame::inspect;

use crate::cmd::InspectArgs;
use crate::exit::{frame_error, io_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_info, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let image = fs::read(&args.input)
        .map_err(|err| io_error(&format!("failed reading {}", args.input.display()), err))?;

    let info = inspect(&image, &args.layout.layout()).map_err(|err| {
        frame_error(&format!("failed inspecting {}", args.input.display()), err)
    })?;

    print_info(&info, &args.input, format);

    if info.fits {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

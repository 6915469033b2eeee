use std::fs::{self, File};
use std::io::BufWriter;

use fileckr_frame::{apply_mode, decode_file};
use tracing::{debug, info};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};

pub fn run(args: DecodeArgs) -> CliResult<i32> {
    let layout = args.layout.layout();
    let file = File::create(&args.output).map_err(|err| {
        io_error(&format!("failed creating {}", args.output.display()), err)
    })?;

    let mut writer = BufWriter::new(file);
    let header = match decode_file(&args.input, &mut writer, &layout) {
        Ok(header) => header,
        Err(err) => {
            drop(writer);
            let _ = fs::remove_file(&args.output);
            return Err(frame_error(
                &format!("failed decoding {}", args.input.display()),
                err,
            ));
        }
    };
    writer
        .into_inner()
        .map_err(|err| io_error("failed flushing output", err.into_error()))?;

    match header.mode {
        Some(mode) if !args.no_mode => {
            apply_mode(&args.output, mode).map_err(|err| {
                frame_error(
                    &format!("failed setting mode {mode:o} on {}", args.output.display()),
                    err,
                )
            })?;
            debug!("applied mode {mode:o}");
        }
        _ => {}
    }

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        size = header.size,
        "decoded file"
    );
    Ok(SUCCESS)
}

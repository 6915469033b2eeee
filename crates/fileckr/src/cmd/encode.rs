use std::fs::{self, File};
use std::io::BufWriter;

use fileckr_frame::encode_file;
use tracing::info;

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let config = args.frame_config();
    let file = File::create(&args.output).map_err(|err| {
        io_error(&format!("failed creating {}", args.output.display()), err)
    })?;

    let header = match encode_file(&args.input, BufWriter::new(file), &config) {
        Ok(header) => header,
        Err(err) => {
            let _ = fs::remove_file(&args.output);
            return Err(frame_error(
                &format!("failed encoding {}", args.input.display()),
                err,
            ));
        }
    };

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        size = header.size,
        mode = ?header.mode,
        "encoded file"
    );
    Ok(SUCCESS)
}

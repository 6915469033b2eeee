use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("fileckr {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: fileckr");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("FILECKR_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("FILECKR_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!(
        "default bounds: max_ratio={}, min_side={}",
        fileckr_dims::DEFAULT_MAX_RATIO,
        fileckr_dims::DEFAULT_MIN_SIDE
    );
    println!(
        "header layouts: standard={}B, legacy={}B",
        fileckr_frame::HeaderLayout::STANDARD.encoded_len(),
        fileckr_frame::HeaderLayout::LENGTH_ONLY.encoded_len()
    );

    Ok(SUCCESS)
}

use std::io::IsTerminal;
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use fileckr_frame::FrameInfo;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
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

#[derive(Serialize)]
struct InfoOutput<'a> {
    path: &'a str,
    width: u32,
    height: u32,
    capacity: u64,
    header_len: usize,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    fits: bool,
}

pub fn print_info(info: &FrameInfo, path: &Path, format: OutputFormat) {
    let path = path.display().to_string();
    let mode = info.header.mode.map(|m| format!("{m:04o}"));

    match format {
        OutputFormat::Json => {
            let out = InfoOutput {
                path: &path,
                width: info.dimensions.width,
                height: info.dimensions.height,
                capacity: info.capacity,
                header_len: info.header_len,
                size: info.header.size,
                mode,
                fits: info.fits,
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
                .set_header(vec!["PATH", "CANVAS", "CAPACITY", "SIZE", "MODE", "FITS"])
                .add_row(vec![
                    path,
                    format!("{}x{}", info.dimensions.width, info.dimensions.height),
                    info.capacity.to_string(),
                    info.header.size.to_string(),
                    mode.unwrap_or_else(|| "-".to_string()),
                    info.fits.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "path={} canvas={}x{} capacity={} size={} mode={} fits={}",
                path,
                info.dimensions.width,
                info.dimensions.height,
                info.capacity,
                info.header.size,
                mode.as_deref().unwrap_or("-"),
                info.fits
            );
        }
    }
}

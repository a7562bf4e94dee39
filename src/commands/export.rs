use crate::{
    db::db::Db,
    libs::{
        export::{ExportData, ExportFormat, Exporter},
        formatter::parse_range,
    },
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// What to export
    #[arg(value_enum)]
    data: ExportData,

    #[arg(short, long, value_enum, default_value_t = ExportFormat::Excel)]
    format: ExportFormat,

    /// Output file; defaults to `<data>_<timestamp>.<ext>` in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// First day of an attendance export (YYYY-MM-DD or 'today')
    #[arg(long, default_value = "today")]
    start: String,

    /// Last day of an attendance export, inclusive
    #[arg(long, default_value = "today")]
    end: String,
}

pub fn cmd(db: &Db, args: ExportArgs) -> Result<()> {
    let range = parse_range(&args.start, &args.end)?;
    Exporter::new(args.format, args.data, args.output).export(db, range)
}

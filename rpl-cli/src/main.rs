use anyhow::*;
use log::*;
use structopt::StructOpt;

use rpl::coord::SchemaVersion;
use rpl::{write, FrameRange, ReplayDocument};

use std::fs;
use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rpl",
    about = "decodes replay motion JSON into scene-space keyframes and splices it back"
)]
struct Opt {
    /// Replay JSON to decode
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Where to write the re-encoded document
    #[structopt(parse(from_os_str))]
    output: PathBuf,

    /// Full replay to splice the motion into, instead of writing a snippet
    #[structopt(parse(from_os_str))]
    base: Option<PathBuf>,

    /// Use the earliest schema's sign convention
    #[structopt(short, long)]
    legacy: bool,

    /// Frames the output must cover, not counting the start pose
    #[structopt(long, default_value = "3840")]
    frames: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    info!("starting up");

    let opt = Opt::from_args();
    let version = if opt.legacy {
        SchemaVersion::V1
    } else {
        SchemaVersion::V2
    };

    let json = fs::read_to_string(&opt.input).context("failed to open replay json")?;
    let doc = ReplayDocument::from_json(&json)?;
    let samples = doc.decode(version)?;

    info!("decoded {} samples ({:?})", samples.len(), version);
    if let Some(last) = samples.last() {
        debug!("final position: {:?}", last.position);
    }

    let range = FrameRange {
        first: -1,
        last: opt.frames as i64 - 1,
    };

    let out = match opt.base {
        Some(ref base) => {
            let data = fs::read_to_string(base).context("failed to open base replay")?;
            let base: serde_json::Value =
                serde_json::from_str(&data).context("failed to parse base replay")?;
            let merged = write::encode_into(&samples, version, range, &base)?;
            serde_json::to_string_pretty(&merged)?
        }
        None => write::encode(&samples, version, range)?.to_json_pretty(),
    };

    fs::write(&opt.output, out).context("failed to write output")?;

    info!("wrote {}", opt.output.display());

    Ok(())
}

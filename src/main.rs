#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

mod decode;
mod error;
mod geo;
mod merge;
mod navdata;
mod pmdg;
mod reconcile;
mod route;
mod txt_data;

use merge::{LegacyTable, MergeConfigBuilder};
use txt_data::DataFile;

static AIRPORTS: &str = "airports.dat";
static AIRPORT_DETAILS: &str = "wpNavAPT.txt";
static FIXES: &str = "wpNavFIX.txt";
static NAVAIDS: &str = "wpNavAID.txt";
static ROUTES: &str = "wpNavRTE.txt";

#[derive(StructOpt)]
#[structopt(about = "Merges a PFPX navdata export into a PMDG navigation database")]
enum Args {
    /// Strip the header of a PFPX export and unmask its body
    Decode {
        #[structopt(name = "input", parse(from_os_str))]
        input: PathBuf,
        #[structopt(
            short = "o",
            long = "output",
            parse(from_os_str),
            default_value = "./decoded.nav"
        )]
        output: PathBuf,
    },
    /// Merge an export into the PMDG tables and rebuild the airway routes
    Merge {
        #[structopt(name = "input", parse(from_os_str))]
        input: PathBuf,
        /// The input has already been decoded
        #[structopt(long = "decoded")]
        decoded: bool,
        #[structopt(
            short = "d",
            long = "database",
            parse(from_os_str),
            default_value = "./PMDG"
        )]
        database: PathBuf,
        #[structopt(
            short = "o",
            long = "output",
            parse(from_os_str),
            default_value = "./merged"
        )]
        output: PathBuf,
        /// Leave the coordinates of records already in the database untouched
        #[structopt(long = "keep-existing-coords")]
        keep_existing_coords: bool,
    },
}

fn read_bytes(path: &Path) -> error::Result<Vec<u8>> {
    fs::read(path).map_err(|source| error::Error::Open {
        path: path.display().to_string(),
        source,
    })
}

fn read_export(path: &Path, decoded: bool) -> error::Result<DataFile> {
    let raw = read_bytes(path)?;
    if decoded {
        Ok(DataFile::from_bytes(&raw))
    } else {
        Ok(DataFile::from_bytes(&decode::decode(&raw)?))
    }
}

fn read_table(dir: &Path, name: &'static str) -> error::Result<LegacyTable> {
    Ok(LegacyTable::new(name, &DataFile::from_file(dir.join(name))?))
}

fn run_decode(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    log::info!("Decoding {}...", input.display());
    let raw = read_bytes(input)?;
    fs::write(output, decode::decode(&raw)?)?;
    Ok(())
}

/// Runs the whole merge and returns the number of warnings raised along the way.
fn run_merge(
    input: &Path,
    decoded: bool,
    database: &Path,
    output: &Path,
    keep_existing_coords: bool,
) -> Result<usize, Box<dyn Error>> {
    let config = MergeConfigBuilder::default()
        .prefer_source_coords(!keep_existing_coords)
        .build()
        .map_err(|e| error::Error::Config {
            reason: e.to_string(),
        })?;

    log::info!("Reading export {}...", input.display());
    let export = read_export(input, decoded)?;
    let mut db = navdata::parse::parse_navdata(&export)?;
    drop(export);

    log::info!("Applying airway coordinates...");
    reconcile::apply_airway_coords(&mut db);

    log::info!("Merging airport data...");
    let mut airports = read_table(database, AIRPORTS)?;
    let mut details = read_table(database, AIRPORT_DETAILS)?;
    let airport_report =
        merge::airport::merge_airports(&mut airports, &mut details, &db, &config)?;
    log::info!("{}: {}", AIRPORTS, airport_report);

    log::info!("Merging fix data...");
    let mut fixes = read_table(database, FIXES)?;
    let report = merge::fix::merge_fixes(&mut fixes, &db, &config)?;
    log::info!("{}: {}", FIXES, report);

    log::info!("Merging navaid data...");
    let mut navaids = read_table(database, NAVAIDS)?;
    let report = merge::navaid::merge_navaids(&mut navaids, &db, &config)?;
    log::info!("{}: {}", NAVAIDS, report);

    log::info!("Rebuilding airway routes...");
    let routes = route::reconstruct_routes(&db);

    log::info!("Writing {}...", output.display());
    fs::create_dir_all(output)?;
    for table in &[&airports, &details, &fixes, &navaids] {
        log::debug!("{}: {} lines", table.name(), table.lines().len());
        fs::write(output.join(table.name()), table.to_string())?;
    }
    fs::write(output.join(ROUTES), routes.to_string())?;

    let warnings = db.warnings().len() + airport_report.warnings.len() + routes.warnings.len();
    if warnings > 0 {
        log::warn!("Finished with {} warnings", warnings);
    }
    Ok(warnings)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::from_args() {
        Args::Decode { input, output } => run_decode(&input, &output),
        Args::Merge {
            input,
            decoded,
            database,
            output,
            keep_existing_coords,
        } => {
            run_merge(&input, decoded, &database, &output, keep_existing_coords)?;
            Ok(())
        }
    }
}

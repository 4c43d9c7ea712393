use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use osm_atlas::map_data::geometry::GeoBBox;
use osm_atlas::osm_xml::{
    coord::{format_coord, parse_coord},
    data_reader::OsmDataReader,
    DataSource,
};

#[derive(Parser)]
#[command(version, about = "Loads an OSM XML dump into a queryable in-memory dataset")]
struct Cli {
    /// OSM XML file to load, or - for standard input
    #[arg(short, long, value_name = "PATH")]
    data: String,

    /// Query box as minlat,minlon,maxlat,maxlon in decimal degrees;
    /// reports how many paths intersect it
    #[arg(short, long, value_name = "BBOX")]
    query: Option<String>,
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_max_level(Level::TRACE)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    let reader = OsmDataReader::new(DataSource::from_path(&cli.data));
    let map_data = match reader.read_data() {
        Ok(map_data) => map_data,
        Err(error) => {
            error!(error = %error, "Load failed");
            return ExitCode::FAILURE;
        }
    };

    let bounds = map_data.bounds();
    let center = map_data.center();
    info!(
        points = map_data.point_count(),
        paths = map_data.path_count(),
        relations = map_data.relation_count(),
        "Load done"
    );
    info!(
        minlat = %format_coord(bounds.bottom),
        minlon = %format_coord(bounds.left),
        maxlat = %format_coord(bounds.top),
        maxlon = %format_coord(bounds.right),
        center_lat = %format_coord(center.lat),
        center_lon = %format_coord(center.lon),
        "Dataset bounds"
    );

    if let Some(query) = cli.query {
        match parse_query_bounds(&query) {
            Ok(query_bounds) => {
                let paths = map_data.paths_in_bounds(&query_bounds);
                info!(paths = paths.len(), "Query done");
            }
            Err(error) => {
                error!(error = %error, "Bad query box");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn parse_query_bounds(text: &str) -> Result<GeoBBox, String> {
    let mut parts = text.splitn(4, ',');
    let (Some(minlat), Some(minlon), Some(maxlat), Some(maxlon)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected minlat,minlon,maxlat,maxlon, got '{text}'"));
    };
    let mut bounds = GeoBBox::empty();
    bounds.bottom = parse_coord(minlat).map_err(|error| error.to_string())?;
    bounds.left = parse_coord(minlon).map_err(|error| error.to_string())?;
    bounds.top = parse_coord(maxlat).map_err(|error| error.to_string())?;
    bounds.right = parse_coord(maxlon).map_err(|error| error.to_string())?;
    Ok(bounds)
}

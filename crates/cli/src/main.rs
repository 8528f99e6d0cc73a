use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use snowgrid::{
    route_to_svg, timed, AllPassable, GridConfig, HexGrid, MapConfig,
    OffsetDistance, Route, SearchConfig, TileIndex, TileMap,
};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for finding routes across a generated hex map.
#[derive(Debug, StructOpt)]
#[structopt(name = "snowgrid")]
struct Opt {
    /// Path to a config file that defines the grid, the map and the search
    /// limits. Supported formats: JSON, TOML. If omitted, the defaults are
    /// used
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Index of the tile to start the route at
    #[structopt(long)]
    from: usize,

    /// Index of the tile to end the route at
    #[structopt(long)]
    to: usize,

    /// Ignore the generated map, and treat every tile on the grid as
    /// passable
    #[structopt(long)]
    open: bool,

    /// If given, the route will be saved to this directory. The exact files
    /// that appear in the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the route in. Supported formats:
    ///
    /// cfg - The full config used for the map and search, in TOML format
    ///
    /// json - The route's tiles and waypoints
    ///
    /// svg - 2D rendering of the map with the route drawn over it
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the full config in a human-readable file
    Cfg,
    /// Export the route in JSON, which can be deserialized later
    Json,
    /// Render the map and the route as a 2D SVG
    Svg,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

/// Everything that can be defined in the config file
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RouteConfig {
    grid: GridConfig,
    map: MapConfig,
    search: SearchConfig,
}

/// The loaded world that a route was found in
struct Solved<'a> {
    config: &'a RouteConfig,
    grid: &'a HexGrid,
    map: Option<&'a TileMap>,
    route: &'a Route,
}

fn load_config(config_path: &Path) -> anyhow::Result<RouteConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the route in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    solved: &Solved,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        solved: &Solved,
    ) -> anyhow::Result<Vec<u8>> {
        let bytes = match output_format {
            OutputFormat::Cfg => {
                // Serialize just the config via toml
                toml::to_string_pretty(solved.config)
                    .context("error serializing config")?
                    .into_bytes()
            }
            OutputFormat::Json => solved.route.to_json().into_bytes(),
            OutputFormat::Svg => route_to_svg(
                solved.grid,
                solved.map,
                &solved.route.path,
                &solved.route.waypoints,
            )
            .to_string()
            .into_bytes(),
        };
        Ok(bytes)
    }

    let output_file_path = output_dir
        .join("route")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, solved)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => RouteConfig::default(),
    };
    let grid = HexGrid::from_config(&config.grid)?;
    let map = if opt.open {
        None
    } else {
        Some(TileMap::generate(&grid, &config.map)?)
    };

    let (from, to) = (TileIndex(opt.from), TileIndex(opt.to));
    let search = &config.search;
    let route = match &map {
        Some(map) => grid.route(from, to, map, &OffsetDistance, search),
        None => grid.route(from, to, &AllPassable, &OffsetDistance, search),
    }
    .with_context(|| format!("error finding route {} -> {}", from, to))?;
    info!(
        "Route {} -> {} covers {} tiles with {} waypoints: {:?}",
        from,
        to,
        route.path.len(),
        route.waypoints.len(),
        route.waypoints
    );

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = &opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(output_dir)?;

        let solved = Solved {
            config: &config,
            grid: &grid,
            map: map.as_ref(),
            route: &route,
        };
        for output_format in &opt.output_formats {
            gen_output(output_dir, *output_format, &solved)?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

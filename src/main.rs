mod errors;

use self::errors::{Error, Result};
use brush::{ConvertConfig, LevelConverter};
use clap::{value_t, App, AppSettings, Arg, ArgMatches};
use failure::Fail;
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::process;
use wad::{Archive, TextureDirectory};

pub struct ConvertOptions {
    wad_file: PathBuf,
    output_dir: PathBuf,
    config: ConvertConfig,
    levels: Option<Vec<String>>,
}

pub enum RunMode {
    ListLevelNames { wad_file: PathBuf },
    Convert(ConvertOptions),
}

impl RunMode {
    pub fn from_args() -> Result<RunMode> {
        let matches = App::new("wad2brush")
            .version(env!("CARGO_PKG_VERSION"))
            .author("Cristi Cobzarenco <cristi.cobzarenco@gmail.com>")
            .about("Converts Doom WAD levels into Doom 3 brushDef3 maps.")
            .settings(&[AppSettings::ColoredHelp])
            .arg(
                Arg::with_name("iwad")
                    .long("iwad")
                    .short("i")
                    .help("WAD file to convert")
                    .value_name("FILE")
                    .default_value("doom1.wad"),
            )
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .short("c")
                    .help("path to TOML conversion config")
                    .value_name("FILE")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("level")
                    .long("level")
                    .short("l")
                    .help("name of a level to convert, e.g. E1M1 (default: all)")
                    .value_name("NAME")
                    .multiple(true)
                    .number_of_values(1),
            )
            .arg(
                Arg::with_name("output")
                    .long("output")
                    .short("o")
                    .help("directory to write <LEVEL>.map files to")
                    .value_name("DIR")
                    .default_value("."),
            )
            .arg(
                Arg::with_name("xy-downscale")
                    .long("xy-downscale")
                    .help("divisor applied to horizontal coordinates")
                    .value_name("FACTOR")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("z-downscale")
                    .long("z-downscale")
                    .help("divisor applied to heights")
                    .value_name("FACTOR")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("x-shift")
                    .long("x-shift")
                    .help("added to x coordinates before downscaling")
                    .value_name("UNITS")
                    .takes_value(true)
                    .allow_hyphen_values(true),
            )
            .arg(
                Arg::with_name("y-shift")
                    .long("y-shift")
                    .help("added to y coordinates before downscaling")
                    .value_name("UNITS")
                    .takes_value(true)
                    .allow_hyphen_values(true),
            )
            .arg(
                Arg::with_name("list-levels")
                    .long("list-levels")
                    .help("list the names of all the levels in the WAD, then exit"),
            )
            .get_matches();

        let wad_file: PathBuf = value_t!(matches, "iwad", String)?.into();
        if matches.is_present("list-levels") {
            return Ok(RunMode::ListLevelNames { wad_file });
        }

        let mut config = match matches.value_of("config") {
            Some(path) => ConvertConfig::from_file(&path)
                .map_err(|error| Error::Config(path.to_owned(), error))?,
            None => ConvertConfig::default(),
        };
        apply_overrides(&matches, &mut config)?;

        Ok(RunMode::Convert(ConvertOptions {
            wad_file,
            output_dir: value_t!(matches, "output", String)?.into(),
            config,
            levels: matches
                .values_of("level")
                .map(|names| names.map(str::to_owned).collect()),
        }))
    }
}

fn apply_overrides(matches: &ArgMatches, config: &mut ConvertConfig) -> Result<()> {
    let transform = &mut config.transform;
    if matches.is_present("xy-downscale") {
        transform.xy_downscale = value_t!(matches, "xy-downscale", f32)?;
    }
    if matches.is_present("z-downscale") {
        transform.z_downscale = value_t!(matches, "z-downscale", f32)?;
    }
    if matches.is_present("x-shift") {
        transform.x_shift = value_t!(matches, "x-shift", f32)?;
    }
    if matches.is_present("y-shift") {
        transform.y_shift = value_t!(matches, "y-shift", f32)?;
    }
    Ok(())
}

fn convert(options: ConvertOptions) -> Result<()> {
    let ConvertOptions {
        wad_file,
        output_dir,
        config,
        levels,
    } = options;
    let wad_name = wad_file.display().to_string();
    let wad = Archive::open(&wad_file).map_err(|error| Error::Wad(wad_name.clone(), error))?;
    let textures =
        TextureDirectory::from_archive(&wad).map_err(|error| Error::Wad(wad_name, error))?;

    let levels = levels.unwrap_or_else(|| {
        wad.level_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    });
    let converter = LevelConverter::new(&textures, &config.textures);

    let mut num_converted = 0;
    for level in &levels {
        let converted = match converter.convert_archive_level(&wad, level, &config.transform) {
            Ok(converted) => converted,
            Err(error) => {
                log_error(&error);
                continue;
            }
        };
        let path = output_dir.join(format!("{}.map", converted.name));
        if let Err(error) = fs::write(&path, &converted.map) {
            log_error(&Error::Write(path.display().to_string(), error));
            continue;
        }
        info!(
            "Wrote {} brushes to {}.",
            converted.stats.brushes(),
            path.display()
        );
        num_converted += 1;
    }

    if num_converted == 0 && !levels.is_empty() {
        return Err(Error::NothingConverted(levels.len()));
    }
    info!("Converted {} of {} levels.", num_converted, levels.len());
    Ok(())
}

fn run() -> Result<()> {
    match RunMode::from_args()? {
        RunMode::ListLevelNames { wad_file } => {
            let wad = Archive::open(&wad_file)
                .map_err(|error| Error::Wad(wad_file.display().to_string(), error))?;
            for (i_level, name) in wad.level_names().iter().enumerate() {
                println!("{:3} {:8}", i_level, name);
            }
        }
        RunMode::Convert(options) => convert(options)?,
    }
    Ok(())
}

fn log_error(error: &dyn Fail) {
    error!("{}", error);
    let mut cause = error.cause();
    while let Some(inner) = cause {
        error!("    caused by: {}", inner);
        cause = inner.cause();
    }
}

fn main() {
    env_logger::init();
    if let Err(error) = run() {
        if let Error::Arguments(ref error) = error {
            error.exit();
        }
        log_error(&error);
        process::exit(1);
    }
}

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use urania::chart::parse_house_system;
use urania::{BirthInput, ChartService, Language, Place, SwissEphemerisAdapter};
use urania_config::{load_settings, load_settings_from, UraniaSettings};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Settings file; defaults to configs/urania.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the built-in Moshier ephemeris instead of data files
    #[arg(long, global = true)]
    builtin_ephemeris: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a natal chart and print it as JSON
    Chart {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        #[arg(long)]
        hour: u32,
        #[arg(long)]
        minute: u32,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// IANA timezone, e.g. Europe/Berlin
        #[arg(long)]
        timezone: String,
        /// House system code or name; overrides the configured default
        #[arg(long)]
        house_system: Option<String>,
        /// For repeated wall-clock times: true takes the daylight occurrence
        #[arg(long)]
        prefer_dst: Option<bool>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// en or ar
        #[arg(long)]
        language: Option<Language>,
        /// Where to write the chart wheel (PNG)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print where the planets are right now
    Now,
}

fn ephemeris(args: &Args, settings: &UraniaSettings) -> anyhow::Result<SwissEphemerisAdapter> {
    let adapter = if args.builtin_ephemeris {
        SwissEphemerisAdapter::builtin()
    } else {
        SwissEphemerisAdapter::new(settings.ephemeris_path.clone())?
    };
    match adapter.ephemeris_path() {
        Some(path) => log::info!("Using ephemeris data in {}", path.display()),
        None => log::info!("Using built-in Moshier ephemeris"),
    }
    Ok(adapter.with_zodiac(settings.zodiac))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings()?,
    };
    let ephemeris = ephemeris(&args, &settings)?;

    match args.command {
        Command::Chart {
            year,
            month,
            day,
            hour,
            minute,
            lat,
            lon,
            timezone,
            house_system,
            prefer_dst,
            city,
            country,
            language,
            output,
        } => {
            let language = language.unwrap_or(settings.language);
            let service = ChartService::new(ephemeris)
                .with_visual_config(settings.visual.clone())
                .with_language(language);

            let house_system = match house_system {
                Some(selector) => parse_house_system(&selector)
                    .map_err(|e| anyhow::anyhow!(e.user_message(language)))?,
                None => settings.default_house_system,
            };
            let place = match (city, country) {
                (Some(city), Some(country)) => Some(Place { city, country }),
                (None, None) => None,
                _ => anyhow::bail!("--city and --country must be given together"),
            };

            let input = BirthInput {
                year,
                month,
                day,
                hour,
                minute,
                latitude: lat,
                longitude: lon,
                timezone,
                house_system,
                prefer_dst: prefer_dst.unwrap_or(settings.prefer_dst),
                place,
            };

            let chart = service
                .compute(&input)
                .map_err(|e| anyhow::anyhow!(e.user_message(language)))?;

            if let Some(path) = output {
                fs::write(&path, chart.image.to_bytes()?)
                    .map_err(|e| anyhow::anyhow!("Could not write {}: {e}", path.display()))?;
                log::info!("Chart image written to {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&chart.result)?);
        }
        Command::Now => {
            let service = ChartService::new(ephemeris).with_language(settings.language);
            let now = chrono::Utc::now();
            let positions = service.current_positions(now);
            let json: Vec<serde_json::Value> = positions
                .iter()
                .map(|(body, lon)| {
                    let position = urania::zodiac::sign_of(*lon);
                    serde_json::json!({
                        "body": body.id(),
                        "longitude": lon,
                        "sign": position.sign_name(service.language()),
                        "degree": position.degree_in_sign,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "utc": now.to_rfc3339(),
                    "positions": json,
                }))?
            );
        }
    }

    Ok(())
}

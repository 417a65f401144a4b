use airfoil_coords::airfoil::normalize::SurfaceSplit;
use airfoil_coords::config::Settings;
use airfoil_coords::serialize::write_profile;
use airfoil_coords::{
    convert_path, generate_profile, logger, AirfoilError, ErrorClass, ProfileOutput,
    SerializationFormat,
};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "airfoil")]
#[command(about = "Generate NACA 4-digit airfoils and normalize airfoil coordinate tables")]
struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[arg(short, long, global = true, help = "TOML settings file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the surface coordinates of a NACA 4-digit airfoil
    Naca {
        /// Four digit designation, e.g. 2412
        code: String,

        #[arg(short = 'n', long, help = "Number of chordwise stations per surface")]
        points: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract, reorder and reformat the coordinates in a tabular airfoil file
    Convert {
        input: PathBuf,

        #[arg(long, help = "Surface split strategy: midpoint or chord")]
        split: Option<SurfaceSplit>,

        #[arg(long, help = "Rescale to unit chord when the maximum x exceeds this value")]
        unit_threshold: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    #[arg(short, long, help = "Output layout: standard or solidworks")]
    format: Option<SerializationFormat>,

    #[arg(short, long, help = "Write to this file instead of stdout")]
    output: Option<PathBuf>,

    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI arguments: {:?}", cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let class = e.downcast_ref::<AirfoilError>().map(AirfoilError::class);
            tracing::error!("{:#} (class: {:?})", e, class);
            match e.downcast_ref::<AirfoilError>() {
                Some(ae) => eprintln!("error: {}", ae.user_message()),
                None => eprintln!("error: {:#}", e),
            }

            match class {
                Some(ErrorClass::Client) => ExitCode::from(2),
                _ => ExitCode::from(1),
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let (result, output) = match cli.command {
        Command::Naca {
            code,
            points,
            output,
        } => {
            let format = output.format.unwrap_or(settings.format);
            let count = points.unwrap_or(settings.generate.point_count);
            (generate_profile(&code, count, format)?, output)
        }
        Command::Convert {
            input,
            split,
            unit_threshold,
            output,
        } => {
            let mut settings = settings;
            if let Some(format) = output.format {
                settings.format = format;
            }
            if let Some(split) = split {
                settings.convert.split = split;
            }
            if let Some(threshold) = unit_threshold {
                settings.convert.unit_threshold = threshold;
            }
            settings.validate()?;

            let result = convert_path(&input, &settings.convert_options())
                .with_context(|| format!("converting {}", input.display()))?;
            (result, output)
        }
    };

    emit(&result, &output)
}

fn emit(result: &ProfileOutput, args: &OutputArgs) -> anyhow::Result<()> {
    let content = if args.json {
        result.to_json()?
    } else {
        result.text.clone()
    };

    match &args.output {
        Some(path) => {
            write_profile(path, &content)?;
            tracing::info!("wrote {} points to {}", result.point_count, path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

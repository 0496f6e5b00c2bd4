use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use sudodle::mine::{Budget, Mode, Symmetry};
use sudodle::simulate::DEFAULT_MAX_GUESSES;

const DEFAULT_SIZE: usize = 4;
const DEFAULT_PLACED: usize = 2;

#[derive(Clone)]
pub(crate) struct Options {
    command: Command,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let command = match matches.subcommand() {
            ("cyclic", Some(matches)) => Command::Cyclic {
                size: parse_or(matches, "size", DEFAULT_SIZE)?,
            },
            ("generate", Some(matches)) => Command::Generate(Generate {
                size: parse_or(matches, "size", DEFAULT_SIZE)?,
                seed: parse_opt(matches, "seed")?,
                steps: parse_opt(matches, "steps")?,
            }),
            ("check", Some(matches)) => Command::Check {
                rows: matches
                    .values_of("rows")
                    .map(|rows| rows.map(String::from).collect())
                    .unwrap_or_default(),
            },
            ("simulate", Some(matches)) => Command::Simulate(Simulate {
                size: parse_or(matches, "size", DEFAULT_SIZE)?,
                seed: parse_opt(matches, "seed")?,
                guesses: parse_or(matches, "guesses", DEFAULT_MAX_GUESSES)?,
            }),
            ("mine", Some(matches)) => Command::Mine(Mine::from_arg_matches(matches)?),
            ("decode", Some(matches)) => Command::Decode {
                id: matches.value_of("id").unwrap_or_default().to_string(),
            },
            _ => return Err(anyhow!("missing subcommand")),
        };
        Ok(Self { command })
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Clone)]
pub(crate) enum Command {
    Cyclic { size: usize },
    Generate(Generate),
    Check { rows: Vec<String> },
    Simulate(Simulate),
    Mine(Mine),
    Decode { id: String },
}

#[derive(Clone)]
pub(crate) struct Generate {
    pub size: usize,
    pub seed: Option<u64>,
    pub steps: Option<usize>,
}

#[derive(Clone)]
pub(crate) struct Simulate {
    pub size: usize,
    pub seed: Option<u64>,
    pub guesses: usize,
}

#[derive(Clone)]
pub(crate) struct Mine {
    pub size: usize,
    pub placed: usize,
    pub mode: Mode,
    pub budget: Budget,
    pub symmetry: Symmetry,
    pub threads: Option<usize>,
    pub batch_size: Option<usize>,
    output: Option<PathBuf>,
    append: bool,
}

impl Mine {
    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let mode = match parse_opt(matches, "random_tries")? {
            Some(tries) => Mode::Random {
                tries,
                seed: parse_opt(matches, "seed")?,
            },
            None => Mode::Exhaustive,
        };
        let mut budget = Budget::unlimited();
        if let Some(max) = parse_opt(matches, "max_candidates")? {
            budget = budget.max_candidates(max);
        }
        if let Some(secs) = parse_opt::<f64>(matches, "time_limit")? {
            if !(secs >= 0.0 && secs.is_finite()) {
                return Err(anyhow!("invalid time limit: {}", secs));
            }
            budget = budget.time_limit(Duration::from_secs_f64(secs));
        }
        let symmetry = match matches.value_of("symmetry") {
            Some(name) => {
                Symmetry::from_name(name).ok_or_else(|| anyhow!("unknown symmetry: {}", name))?
            }
            None => Symmetry::default(),
        };
        Ok(Self {
            size: parse_or(matches, "size", DEFAULT_SIZE)?,
            placed: parse_or(matches, "placed", DEFAULT_PLACED)?,
            mode,
            budget,
            symmetry,
            threads: parse_opt(matches, "threads")?,
            batch_size: parse_opt(matches, "batch_size")?,
            output: matches.value_of("output").map(PathBuf::from),
            append: matches.is_present("append"),
        })
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// True to add to the output file instead of replacing it
    pub fn append(&self) -> bool {
        self.append
    }
}

fn parse_opt<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| s.parse::<T>().with_context(|| format!("invalid {}: {:?}", name, s)))
        .transpose()
}

fn parse_or<T>(matches: &ArgMatches<'_>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_opt(matches, name)?.unwrap_or(default))
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, SubCommand};

    let size = Arg::with_name("size")
        .short("n")
        .long("size")
        .takes_value(true)
        .value_name("N")
        .help("the width and height of the grid (4 to 9)");
    let seed = Arg::with_name("seed")
        .long("seed")
        .takes_value(true)
        .value_name("SEED")
        .help("seed the random number generator");

    App::new("Sudodle")
        .author("Cameron Steffen <cam.steffen94@gmail.com>")
        .about("Generate Latin squares and mine Sudodle puzzles")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("cyclic")
                .about("print the cyclic Latin square")
                .arg(size.clone()),
        )
        .subcommand(
            SubCommand::with_name("generate")
                .about("generate a uniformly random Latin square")
                .arg(size.clone())
                .arg(seed.clone())
                .arg(
                    Arg::with_name("steps")
                        .long("steps")
                        .takes_value(true)
                        .value_name("STEPS")
                        .help("the number of mixing steps (default 50 * N * N)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("check")
                .about("check whether a grid is a Latin square")
                .arg(
                    Arg::with_name("rows")
                        .multiple(true)
                        .required(true)
                        .value_name("ROW")
                        .help("grid rows such as 1234 or 1,2,3,4"),
                ),
        )
        .subcommand(
            SubCommand::with_name("simulate")
                .about("play a game from the cyclic square against a random solution")
                .arg(size.clone())
                .arg(seed.clone())
                .arg(
                    Arg::with_name("guesses")
                        .short("g")
                        .long("guesses")
                        .takes_value(true)
                        .value_name("COUNT")
                        .help("the most guesses allowed (default 5)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("mine")
                .about("find sets of correct cells with a unique solution")
                .arg(size)
                .arg(
                    Arg::with_name("placed")
                        .short("k")
                        .long("placed")
                        .takes_value(true)
                        .value_name("K")
                        .help("the number of correct cells"),
                )
                .arg(
                    Arg::with_name("random_tries")
                        .short("r")
                        .long("random-tries")
                        .takes_value(true)
                        .value_name("TRIES")
                        .help("test random sets of cells instead of every set"),
                )
                .arg(seed.requires("random_tries"))
                .arg(
                    Arg::with_name("max_candidates")
                        .long("max-candidates")
                        .takes_value(true)
                        .value_name("COUNT")
                        .help("stop after testing this many sets of cells"),
                )
                .arg(
                    Arg::with_name("time_limit")
                        .long("time-limit")
                        .takes_value(true)
                        .value_name("SECONDS")
                        .help("stop pulling new candidates after this long"),
                )
                .arg(
                    Arg::with_name("threads")
                        .short("j")
                        .long("threads")
                        .takes_value(true)
                        .value_name("THREADS")
                        .help("the number of worker threads"),
                )
                .arg(
                    Arg::with_name("batch_size")
                        .long("batch-size")
                        .takes_value(true)
                        .value_name("SIZE")
                        .help("candidates tested per batch"),
                )
                .arg(
                    Arg::with_name("symmetry")
                        .long("symmetry")
                        .takes_value(true)
                        .possible_values(&["none", "transpose", "isotopy"])
                        .help("which equivalent puzzles to skip (default transpose)"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .help("save puzzles to a file"),
                )
                .arg(
                    Arg::with_name("append")
                        .long("append")
                        .requires("output")
                        .help("add to the output file instead of replacing it"),
                ),
        )
        .subcommand(
            SubCommand::with_name("decode")
                .about("show a puzzle and its solution over the cyclic square")
                .arg(
                    Arg::with_name("id")
                        .required(true)
                        .value_name("ID")
                        .help("a compact puzzle identifier such as 405"),
                ),
        )
}

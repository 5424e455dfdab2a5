//! This module contains the main entrypoint to the tangram-plot cli.

use anyhow::{format_err, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tangram_dataframe::{DataFrame, FromCsvOptions};
use tangram_plot::{ClassifierErrorsOptions, Config, Plotter};

mod predictions;

#[derive(Parser)]
#[clap(
	name = "tangram-plot",
	about = "Plot the errors of a model and render graphs."
)]
struct Options {
	#[clap(short, long, global = true, help = "the path to a config file")]
	config: Option<PathBuf>,
	#[clap(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	#[clap(name = "errors")]
	Errors(ErrorsOptions),
	#[clap(name = "graph")]
	Graph(GraphOptions),
}

#[derive(Args, Debug)]
#[clap(about = "plot prediction errors")]
#[clap(long_about = "plot actual against predicted values from a csv file of predictions")]
struct ErrorsOptions {
	#[clap(short, long, help = "the path to your .csv file of predictions")]
	file: PathBuf,
	#[clap(long, default_value = "actual", help = "the column of actual values")]
	actual: String,
	#[clap(long, default_value = "predicted", help = "the column of predicted values")]
	predicted: String,
	#[clap(long, help = "size points relative to the range of errors")]
	relative: bool,
	#[clap(long, default_value = "50", help = "the largest relative point size")]
	max_relative_size: f64,
	#[clap(long, default_value = "50", help = "the point size when points are not sized by error")]
	absolute_size: f64,
	#[clap(short, long, help = "the title of the plot")]
	title: Option<String>,
	#[clap(short, long, help = "the path to write the image to")]
	output: Option<PathBuf>,
	#[clap(long = "no-wait", help = "do not display the plot", parse(from_flag = std::ops::Not::not))]
	wait: bool,
}

#[derive(Args, Debug)]
#[clap(about = "render a graph")]
#[clap(long_about = "lay out and render a graph written in the dot language")]
struct GraphOptions {
	#[clap(short, long, help = "the path to your .dot file")]
	file: PathBuf,
	#[clap(short, long, help = "the path to write the image to")]
	output: Option<PathBuf>,
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
	let options = Options::parse();
	let result = load_config(options.config.as_deref()).and_then(|config| {
		let plotter = Plotter::new(config);
		match options.command {
			Command::Errors(options) => cli_errors(&plotter, options),
			Command::Graph(options) => cli_graph(&plotter, options),
		}
	});
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
	let config = match path {
		Some(path) => Config::from_path(path)?,
		None => Config::default(),
	};
	Ok(config.with_env())
}

fn cli_errors(plotter: &Plotter, options: ErrorsOptions) -> Result<()> {
	let dataframe = DataFrame::from_path(&options.file, FromCsvOptions::default())?;
	let predictions =
		predictions::from_dataframe(&dataframe, &options.actual, &options.predicted)
			.with_context(|| format!("failed to read predictions from {}", options.file.display()))?;
	let plot_options = ClassifierErrorsOptions {
		absolute: !options.relative,
		max_relative_size: options.max_relative_size,
		absolute_size: options.absolute_size,
		title: options.title,
		outfile: options.output,
		wait: options.wait,
	};
	match plotter.plot_classifier_errors(&predictions, &plot_options)? {
		Some(_) => Ok(()),
		None => Err(format_err!("plotting is unavailable")),
	}
}

fn cli_graph(plotter: &Plotter, options: GraphOptions) -> Result<()> {
	let dot = std::fs::read_to_string(&options.file)
		.with_context(|| format!("failed to read {}", options.file.display()))?;
	let path = plotter.plot_dot_graph(&dot, options.output.as_deref())?;
	match path {
		Some(path) => println!("{}", path.display()),
		None => return Err(format_err!("plotting is unavailable")),
	}
	Ok(())
}

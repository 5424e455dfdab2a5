use crate::{
	output::{show, temporary_path},
	Error, Plotter, Result,
};
use layout::{
	backends::svg::SVGWriter,
	gv::{DotParser, GraphBuilder},
};
use std::{
	io::Write,
	path::{Path, PathBuf},
	process::{Command, Stdio},
};

impl Plotter {
	/**
	Lay out a graph written in the dot language, render it to `outfile` or to a new temporary svg file, and display it without waiting for the viewer.

	Returns the path of the rendered image.
	*/
	pub fn plot_dot_graph(&self, dot: &str, outfile: Option<&Path>) -> Result<Option<PathBuf>> {
		if !self.ensure_available() {
			return Ok(None);
		}
		let path = match outfile {
			Some(outfile) => outfile.to_owned(),
			None => temporary_path("graph-", ".svg")?,
		};
		render_dot_graph(dot, &path)?;
		log::debug!("wrote graph to {}", path.display());
		match self.config.viewer.as_deref() {
			Some(viewer) => show(viewer, &path, false)?,
			None => log::warn!("no viewer is configured, not displaying {}", path.display()),
		}
		Ok(Some(path))
	}
}

/// Render a dot graph to `path`. Svg files are rendered in process. Every other format is rendered by the graphviz `dot` executable, which must be on the `PATH`.
pub fn render_dot_graph(dot: &str, path: &Path) -> Result<()> {
	let extension = path
		.extension()
		.and_then(|extension| extension.to_str())
		.map(|extension| extension.to_ascii_lowercase());
	match extension.as_deref() {
		Some("svg") => render_svg(dot, path),
		Some(format) => render_with_graphviz(dot, path, format),
		None => Err(Error::UnsupportedFormat {
			path: path.to_owned(),
		}),
	}
}

fn render_svg(dot: &str, path: &Path) -> Result<()> {
	let mut parser = DotParser::new(dot);
	let graph = parser.process().map_err(Error::GraphParse)?;
	let mut builder = GraphBuilder::new();
	builder.visit_graph(&graph);
	let mut visual_graph = builder.get();
	let mut svg = SVGWriter::new();
	// A graph without nodes cannot be ranked, so it renders as an empty image.
	if visual_graph.num_nodes() > 0 {
		visual_graph.do_it(false, false, false, &mut svg);
	}
	std::fs::write(path, svg.finalize())?;
	Ok(())
}

fn render_with_graphviz(dot: &str, path: &Path, format: &str) -> Result<()> {
	let program = which::which("dot").map_err(|_| Error::GraphvizNotFound)?;
	let mut child = Command::new(program)
		.arg(format!("-T{}", format))
		.arg("-o")
		.arg(path)
		.stdin(Stdio::piped())
		.stdout(Stdio::null())
		.stderr(Stdio::piped())
		.spawn()?;
	// Feed stdin from another thread so a full stderr pipe cannot block the write.
	let writer = child.stdin.take().map(|mut stdin| {
		let dot = dot.to_owned();
		std::thread::spawn(move || stdin.write_all(dot.as_bytes()))
	});
	let output = child.wait_with_output()?;
	let written = writer.map(|writer| writer.join());
	if !output.status.success() {
		let message = String::from_utf8_lossy(&output.stderr).trim().to_owned();
		return Err(Error::GraphParse(message));
	}
	if let Some(written) = written {
		written.map_err(|_| Error::Render("failed to write to graphviz".to_owned()))??;
	}
	Ok(())
}

#[cfg(test)]
const TWO_NODES: &str = "digraph { a -> b; }";

#[test]
fn test_render_svg() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("graph.svg");
	render_dot_graph(TWO_NODES, &path).unwrap();
	let svg = std::fs::read_to_string(&path).unwrap();
	assert!(!svg.is_empty());
	assert!(svg.contains("<svg"));
}

#[test]
fn test_malformed_graph() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("graph.svg");
	let result = render_dot_graph("this is not a graph {", &path);
	assert!(matches!(result, Err(Error::GraphParse(_))));
}

#[test]
fn test_empty_graph() {
	let dir = tempfile::tempdir().unwrap();
	for (index, dot) in ["digraph { }", "graph { }"].iter().enumerate() {
		let path = dir.path().join(format!("empty-{}.svg", index));
		render_dot_graph(dot, &path).unwrap();
		let svg = std::fs::read_to_string(&path).unwrap();
		assert!(svg.contains("<svg"));
	}
}

#[test]
fn test_valid_graphs() {
	let dir = tempfile::tempdir().unwrap();
	let graphs = ["digraph { a; }", "graph { a -- b; }", "digraph { a -> a; }"];
	for (index, dot) in graphs.iter().enumerate() {
		let path = dir.path().join(format!("graph-{}.svg", index));
		render_dot_graph(dot, &path).unwrap();
		assert!(std::fs::metadata(&path).unwrap().len() > 0);
	}
	for dot in ["digraph { a -> }", "digraph {", ""].iter() {
		let path = dir.path().join("invalid.svg");
		assert!(matches!(
			render_dot_graph(dot, &path),
			Err(Error::GraphParse(_))
		));
	}
}

#[test]
fn test_render_with_graphviz() {
	if which::which("dot").is_err() {
		return;
	}
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("graph.png");
	let mut dot = String::from("digraph {\n");
	for index in 0..300 {
		dot.push_str(&format!("n{} -> n{} [undefined_attribute=1];\n", index, index + 1));
	}
	dot.push('}');
	render_dot_graph(&dot, &path).unwrap();
	assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_missing_extension() {
	let result = render_dot_graph(TWO_NODES, Path::new("graph"));
	assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_plot_dot_graph() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("graph.svg");
	let plotter = Plotter::with_capability(
		crate::Config {
			viewer: None,
			..Default::default()
		},
		crate::Capability::Available,
	);
	let written = plotter.plot_dot_graph(TWO_NODES, Some(&path)).unwrap();
	assert_eq!(written, Some(path.clone()));
	assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_plot_dot_graph_to_temporary_file() {
	let plotter = Plotter::with_capability(
		crate::Config {
			viewer: None,
			..Default::default()
		},
		crate::Capability::Available,
	);
	let path = plotter.plot_dot_graph(TWO_NODES, None).unwrap().unwrap();
	assert!(std::fs::metadata(&path).unwrap().len() > 0);
	std::fs::remove_file(path).unwrap();
}

#[test]
fn test_unavailable_graph_plots_nothing() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("graph.svg");
	let plotter = Plotter::with_capability(
		crate::Config {
			viewer: None,
			..Default::default()
		},
		crate::Capability::Unavailable {
			reason: "test".to_owned(),
		},
	);
	assert_eq!(plotter.plot_dot_graph(TWO_NODES, Some(&path)).unwrap(), None);
	assert!(!path.exists());
}

//! The figure: a `tikzpicture` holding one axis per plot.

use std::collections::HashSet;

use latextools::{LatexGenerator, ProjectFile};

use crate::plot::Plot;
use crate::text::{clean_string, INDENT_STEP};

/// A pgfplots figure generated into a LaTeX file of its own.
///
/// Adding the figure to a project with `LatexProject::add` also writes the
/// CSV data file of every plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PgfplotsFigure {
    path: String,
    pub scale: f64,
    pub plots: Vec<Plot>,
}

impl PgfplotsFigure {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            scale: 1.0,
            plots: Vec::new(),
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn append_plot(&mut self, plot: Plot) {
        self.plots.push(plot);
    }

    /// Append an empty plot and return it.
    pub fn add_subplot(&mut self) -> &mut Plot {
        self.plots.push(Plot::new());
        let last = self.plots.len() - 1;
        &mut self.plots[last]
    }
    /// Project path of each plot's CSV file, in plot order.
    ///
    /// Plots are named after their cleaned title. An empty or repeated
    /// title gets the plot index appended so every plot keeps its own file.
    pub fn data_paths(&self) -> Vec<String> {
        let names: Vec<String> = self.plots.iter().map(|p| clean_string(&p.title)).collect();
        let mut used = HashSet::new();
        let mut paths = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let repeated = names.iter().filter(|n| *n == name).count() > 1;
            let mut stem = match (name.is_empty(), repeated) {
                (true, _) => format!("plot-{}", i),
                (false, true) => format!("{}-{}", name, i),
                (false, false) => name.clone(),
            };
            while !used.insert(stem.clone()) {
                stem = format!("{}-{}", stem, i);
            }
            paths.push(format!("data/{}.csv", stem));
        }
        paths
    }
}

impl LatexGenerator for PgfplotsFigure {
    fn path(&self) -> &str {
        &self.path
    }

    fn latex(&self) -> String {
        let plots = self
            .plots
            .iter()
            .zip(self.data_paths())
            .enumerate()
            .map(|(i, (plot, path))| plot.latex(i, &path, INDENT_STEP))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "\\begin{{tikzpicture}}[baseline,scale={},trim axis left,trim axis right]\n\
             \\pgfplotsset{{every tick label/.append style={{font=\\small}}}}\n\
             \\pgfplotsset{{every axis label/.append style={{font=\\small}}}}\n\
             \n\
             {}\n\
             \n\
             \\end{{tikzpicture}}\n",
            self.scale, plots
        )
    }

    fn required_files(&self) -> Vec<ProjectFile> {
        self.plots
            .iter()
            .zip(self.data_paths())
            .map(|(plot, path)| ProjectFile::plain_text(path, plot.data_file_content()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> PgfplotsFigure {
        let mut figure = PgfplotsFigure::new("figures/runtime.tex").scale(0.8);
        let plot = figure.add_subplot();
        plot.set_title("Runtime");
        plot.plot(vec![1.0, 2.0], vec![3.0, 4.0]);
        let plot = figure.add_subplot();
        plot.set_title("Memory");
        plot.plot(vec![1.0, 2.0], vec![5.0, 6.0]);
        figure
    }

    #[test]
    fn test_latex_wraps_axes_in_tikzpicture() {
        let latex = figure().latex();

        assert!(latex.starts_with(
            "\\begin{tikzpicture}[baseline,scale=0.8,trim axis left,trim axis right]\n"
        ));
        assert!(latex.contains("\n    \\begin{axis}[\n        name=plot0,"));
        assert!(latex.contains("name=plot1,"));
        assert!(latex.ends_with("\\end{axis}\n\n\\end{tikzpicture}\n"));
    }

    #[test]
    fn test_required_files_are_plot_data() {
        let files = figure().required_files();
        let paths: Vec<&str> = files.iter().map(ProjectFile::path).collect();

        assert_eq!(paths, vec!["data/runtime.csv", "data/memory.csv"]);
        assert!(files.iter().all(ProjectFile::is_text));
    }

    #[test]
    fn test_untitled_and_repeated_plots_get_own_data_files() {
        let mut figure = PgfplotsFigure::new("fig.tex");
        figure.add_subplot().plot(vec![1.0], vec![10.0]);
        figure.add_subplot().plot(vec![1.0], vec![20.0]);
        figure.add_subplot().set_title("Load");
        figure.add_subplot().set_title("Load");
        figure.add_subplot().set_title("Unique");

        assert_eq!(
            figure.data_paths(),
            vec![
                "data/plot-0.csv",
                "data/plot-1.csv",
                "data/load-2.csv",
                "data/load-3.csv",
                "data/unique.csv",
            ]
        );

        let latex = figure.latex();
        assert!(latex.contains("{data/plot-0.csv}"));
        assert!(latex.contains("{data/plot-1.csv}"));
    }

    #[test]
    fn test_latex_is_stable_between_calls() {
        let figure = figure();
        assert_eq!(figure.latex(), figure.latex());
    }
}

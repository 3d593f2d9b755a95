//! pgfplots figures for latextools projects.
//!
//! A [`PgfplotsFigure`] is a generated LaTeX file. Its plots keep their data
//! in CSV files under `data/`, which the figure declares as required files so
//! they are written next to it.

mod figure;
mod plot;
mod text;

pub use figure::PgfplotsFigure;
pub use plot::{Graph, LegendAt, LegendPos, Plot};
pub use text::{clean_string, escape_latex, INDENT_STEP};

/// tikz libraries loaded by [`preamble`].
const TIKZ_LIBRARIES: [&str; 3] = ["patterns", "arrows", "external"];

/// Preamble lines a document needs before it can input a figure.
pub fn preamble() -> String {
    let mut out = String::from("\\usepackage{tikz}\n");
    for library in TIKZ_LIBRARIES {
        out.push_str(&format!("\\usetikzlibrary{{{}}}\n", library));
    }
    out.push_str("\\usepackage{pgfplots}\n");
    out.push_str("\\pgfplotsset{compat=1.14}\n");
    out
}

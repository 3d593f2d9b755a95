//! A single pgfplots axis and its graphs.

use latextools::ProjectFile;

use crate::text::{clean_string, escape_latex, prefix_lines, INDENT_STEP};

/// Where the legend box sits inside the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPos {
    Center,
    #[default]
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl LegendPos {
    /// Axis-relative `at` coordinate and the matching `anchor`.
    pub fn at_and_anchor(self) -> (&'static str, &'static str) {
        match self {
            LegendPos::Center => ("(0.5,0.5)", "center"),
            LegendPos::TopLeft => ("(0,1)", "north west"),
            LegendPos::Top => ("(0.5,1)", "north"),
            LegendPos::TopRight => ("(1,1)", "north east"),
            LegendPos::Right => ("(1,0.5)", "east"),
            LegendPos::BottomRight => ("(1,0)", "south east"),
            LegendPos::Bottom => ("(0.5,0)", "south"),
            LegendPos::BottomLeft => ("(0,0)", "south west"),
            LegendPos::Left => ("(0,0.5)", "west"),
        }
    }
}

/// Explicit legend placement, overriding the `at` of [`LegendPos`].
#[derive(Debug, Clone, PartialEq)]
pub enum LegendAt {
    Coords(f64, f64),
    /// Any pgfplots coordinate expression.
    Raw(String),
}

impl LegendAt {
    fn render(&self) -> String {
        match self {
            LegendAt::Coords(x, y) => format!("({},{})", x, y),
            LegendAt::Raw(raw) => raw.clone(),
        }
    }
}

/// One line of data drawn from the plot's CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub legend: Option<String>,
    pub color: String,
}

impl Graph {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            legend: None,
            color: "black".to_string(),
        }
    }

    pub fn color(&mut self, color: impl Into<String>) -> &mut Self {
        self.color = color.into();
        self
    }

    pub fn legend(&mut self, legend: impl Into<String>) -> &mut Self {
        self.legend = Some(legend.into());
        self
    }

    fn latex(&self, x_col: &str, y_col: &str, data_path: &str, legend_suffix: &str) -> String {
        let legend_entry = match &self.legend {
            Some(legend) => format!(
                "\n\\addlegendentry{{{}{}}};",
                escape_latex(legend),
                legend_suffix
            ),
            None => String::new(),
        };
        format!(
            "\\addplot[color={}] table[x={}, y={}, col sep=comma]\n    {{{}}}\n;{}",
            self.color, x_col, y_col, data_path, legend_entry
        )
    }
}

/// A pgfplots `axis` holding any number of graphs.
///
/// The data of all graphs is written to one CSV file, see
/// [`Plot::data_path`].
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub width: String,
    pub height: String,
    pub hide_box: bool,
    pub hide_x_tick_labels: bool,
    pub hide_y_tick_labels: bool,
    pub legend_pos: LegendPos,
    pub legend_at: Option<LegendAt>,
    pub legend_horizontal: bool,
    pub graphs: Vec<Graph>,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            width: "\\columnwidth".to_string(),
            height: "0.6\\columnwidth".to_string(),
            hide_box: false,
            hide_x_tick_labels: false,
            hide_y_tick_labels: false,
            legend_pos: LegendPos::default(),
            legend_at: None,
            legend_horizontal: false,
            graphs: Vec::new(),
        }
    }
}

impl Plot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a black graph of `y` over `x` and return it for styling.
    pub fn plot(&mut self, x: Vec<f64>, y: Vec<f64>) -> &mut Graph {
        self.graphs.push(Graph::new(x, y));
        let last = self.graphs.len() - 1;
        &mut self.graphs[last]
    }

    /// Assign legends to the graphs in order.
    pub fn legend<S: AsRef<str>>(&mut self, legends: &[S]) {
        for (graph, legend) in self.graphs.iter_mut().zip(legends) {
            graph.legend = Some(legend.as_ref().to_string());
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_xlabel(&mut self, xlabel: impl Into<String>) {
        self.xlabel = xlabel.into();
    }

    pub fn set_ylabel(&mut self, ylabel: impl Into<String>) {
        self.ylabel = ylabel.into();
    }

    /// Base name of the data file, derived from the title.
    pub fn clean_name(&self) -> String {
        let name = clean_string(&self.title);
        if name.is_empty() { "plot".to_string() } else { name }
    }

    /// Project path of the CSV file holding this plot's data.
    pub fn data_path(&self) -> String {
        format!("data/{}.csv", self.clean_name())
    }

    /// The CSV data file this plot reads from.
    pub fn data_file(&self) -> ProjectFile {
        ProjectFile::plain_text(self.data_path(), self.data_file_content())
    }

    fn x_is_common(&self) -> bool {
        match self.graphs.first() {
            Some(first) => self.graphs.iter().all(|g| g.x == first.x),
            None => true,
        }
    }

    fn common_x_col(&self) -> String {
        let name = clean_string(&self.xlabel);
        if name.is_empty() { "x".to_string() } else { name }
    }

    fn x_col(&self, i: usize) -> String {
        format!("{} {}", self.common_x_col(), i)
    }

    /// `"<legend> <ylabel> <i>"`, trimmed at the ends only.
    fn y_col(&self, i: usize, graph: &Graph) -> String {
        let legend = graph.legend.as_deref().map(clean_string).unwrap_or_default();
        format!("{} {} {}", legend, clean_string(&self.ylabel), i)
            .trim()
            .to_string()
    }

    /// CSV text with one column per distinct data series.
    ///
    /// Shorter columns are padded with empty cells.
    pub fn data_file_content(&self) -> String {
        let x_common = self.x_is_common();
        let mut names = Vec::new();
        let mut columns: Vec<&[f64]> = Vec::new();

        if x_common {
            if let Some(first) = self.graphs.first() {
                names.push(self.common_x_col());
                columns.push(&first.x);
            }
        }
        for (i, graph) in self.graphs.iter().enumerate() {
            if !x_common {
                names.push(self.x_col(i));
                columns.push(&graph.x);
            }
            names.push(self.y_col(i, graph));
            columns.push(&graph.y);
        }

        let mut out = names.join(",");
        out.push('\n');
        let rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        for row in 0..rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|col| col.get(row).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }

    /// The `axis` environment for this plot, named `plot<index>`, reading
    /// its graphs from the CSV file at `data_path`.
    pub fn latex(&self, index: usize, data_path: &str, indent: &str) -> String {
        let x_common = self.x_is_common();

        let mut graphs = String::new();
        for (i, graph) in self.graphs.iter().enumerate() {
            let x_col = if x_common { self.common_x_col() } else { self.x_col(i) };
            let last = i + 1 >= self.graphs.len();
            let suffix = if self.legend_horizontal && !last { "~~~~" } else { "" };
            let code = graph.latex(&x_col, &self.y_col(i, graph), data_path, suffix);
            graphs.push_str(&prefix_lines(INDENT_STEP, &code));
            graphs.push_str("\n\n");
        }

        let mut options = Vec::new();
        if self.hide_box {
            options.push("axis line style={draw=none}");
            options.push("tick style={draw=none}");
        }
        if self.hide_x_tick_labels {
            options.push("xticklabels={}");
        }
        if self.hide_y_tick_labels {
            options.push("yticklabels={}");
        }
        let options = if options.is_empty() {
            String::new()
        } else {
            format!("\n    {},", options.join(",\n    "))
        };

        let (default_at, anchor) = self.legend_pos.at_and_anchor();
        let at = match &self.legend_at {
            Some(at) => at.render(),
            None => default_at.to_string(),
        };
        let legend_columns = if self.legend_horizontal { "\n    legend columns=-1," } else { "" };

        let code = format!(
            "\\begin{{axis}}[\n    name=plot{index},\n    title={{{title}}},\n    xlabel={{{xlabel}}},\n    ylabel={{{ylabel}}},\n    width={{{width}}},\n    height={{{height}}},\n    legend style={{\n        draw=none,\n        at={{{at}}},\n        anchor={anchor},\n        font=\\small}},{legend_columns}\n    clip=false,{options}\n]\n\n{graphs}\\end{{axis}}",
            index = index,
            title = escape_latex(&self.title),
            xlabel = escape_latex(&self.xlabel),
            ylabel = escape_latex(&self.ylabel),
            width = self.width,
            height = self.height,
            at = at,
            anchor = anchor,
            legend_columns = legend_columns,
            options = options,
            graphs = graphs,
        );
        prefix_lines(indent, &code)
    }
}

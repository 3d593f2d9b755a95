/// Integration tests for building and exporting projects

use latextools::{
    Backend, BinaryFile, Destination, LatexError, LatexGenerator, LatexProject, MemoryFs, OsFs,
    PlainTextFile, ProjectFile, Source, GENERATED_BANNER,
};

struct Document {
    title: String,
}

impl LatexGenerator for Document {
    fn path(&self) -> &str {
        "main.tex"
    }

    fn latex(&self) -> String {
        format!(
            "\\documentclass{{article}}\n\\title{{{}}}\n\\begin{{document}}\\input{{body}}\\end{{document}}\n",
            self.title
        )
    }

    fn required_files(&self) -> Vec<ProjectFile> {
        vec![ProjectFile::plain_text("body.tex", "Hello.\n")]
    }
}

fn sample_project() -> LatexProject {
    let mut project = LatexProject::new();
    project
        .add(&ProjectFile::generated(Document {
            title: "Round trip".to_string(),
        }))
        .unwrap();
    project
        .add(&BinaryFile::new("img/noise.bin", Some((0..=255).collect()), None).unwrap().into())
        .unwrap();
    project
        .add(&PlainTextFile::new("chapters/ü.tex", Some("Grüße\n".to_string()), None).unwrap().into())
        .unwrap();
    project
}

#[test]
fn test_round_trip_through_directory() {
    let project = sample_project();
    let out = tempfile::tempdir().unwrap();

    project.write_src(Destination::dir(out.path())).unwrap();

    let disk = OsFs::open(out.path(), false).unwrap();
    assert_eq!(disk.list_files().unwrap(), project.files().unwrap());
    for path in project.files().unwrap() {
        assert_eq!(
            disk.read_bytes(&path).unwrap(),
            project.backend().read_bytes(&path).unwrap(),
            "content differs for {}",
            path
        );
    }
    assert_eq!(disk.read_text("chapters/ü.tex").unwrap(), "Grüße\n");
    assert_eq!(disk.read_bytes("img/noise.bin").unwrap(), (0..=255).collect::<Vec<u8>>());
}

#[test]
fn test_round_trip_through_backend() {
    let project = sample_project();
    let mut dst = MemoryFs::new();

    project.write_src(Destination::backend(&mut dst)).unwrap();

    let back = LatexProject::with_backend(dst);
    assert_eq!(back.files().unwrap(), vec![
        "body.tex",
        "chapters/ü.tex",
        "img/noise.bin",
        "main.tex",
    ]);
}

#[test]
fn test_generated_file_is_written_with_banner() {
    let project = sample_project();
    let main = project.backend().read_text("main.tex").unwrap();

    assert!(main.starts_with(GENERATED_BANNER));
    assert!(main[GENERATED_BANNER.len()..].starts_with("\\documentclass{article}\n"));
}

#[test]
fn test_project_on_disk_backend() {
    let root = tempfile::tempdir().unwrap();
    let mut project = LatexProject::with_backend(OsFs::open(root.path(), true).unwrap());

    project.add_file("main.tex", Source::text("on disk")).unwrap();

    assert_eq!(std::fs::read_to_string(root.path().join("main.tex")).unwrap(), "on disk");
}

#[test]
fn test_export_to_read_only_directory_fails() {
    let project = sample_project();
    let root = tempfile::tempdir().unwrap();
    let mut read_only = OsFs::open(root.path(), false).unwrap();

    let err = project.write_src(Destination::backend(&mut read_only)).unwrap_err();
    assert!(matches!(err, LatexError::ReadOnly(_)));
}

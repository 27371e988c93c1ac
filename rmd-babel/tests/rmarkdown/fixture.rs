use insta::assert_snapshot;
use rmd_babel::format::Format;
use rmd_babel::notebook::{Cell, KernelEntry, Notebook};
use rmd_babel::rmarkdown::RmarkdownFormat;

const CARS: &str = include_str!("../fixtures/cars.Rmd");

fn cars() -> Notebook {
    RmarkdownFormat.parse(CARS).expect("fixture to convert")
}

/// One line per cell: type, execution count, kernel, tags and the first source line.
fn outline(nb: &Notebook) -> String {
    nb.cells
        .iter()
        .map(|cell| match cell {
            Cell::Markdown(md) => format!("markdown: {}", md.source.lines().next().unwrap_or("")),
            Cell::Code(code) => format!(
                "code[{}] {} {}: {}",
                code.execution_count.unwrap_or(0),
                code.metadata.kernel.as_deref().unwrap_or("-"),
                code.metadata.tags.join(","),
                code.source.lines().next().unwrap_or("")
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_cars_outline() {
    assert_snapshot!(outline(&cars()), @r#"
    markdown: # Setup
    code[1] R scratch: library(ggplot2)
    markdown: ## Data
    code[2] Markdown report_output: %expand `r ` --in R
    code[3] R report_output: plot(cars)
    code[4] Python3 report_cell: import math
    code[5] Bash report_cell: ls
    "#);
}

#[test]
fn test_cars_kernel_list() {
    let kernels = cars().metadata.sos.expect("sos metadata").kernels;
    assert_eq!(
        kernels,
        vec![
            KernelEntry::new("SoS", "sos"),
            KernelEntry::new("R", "ir"),
            KernelEntry::new("Python3", "python3"),
            KernelEntry::new("Bash", "bash"),
            KernelEntry::new("Markdown", "markdown"),
        ]
    );
}

#[test]
fn test_cars_front_matter() {
    let header = cars().metadata.front_matter.expect("front matter");
    assert_eq!(header["title"], "Cars report");
    assert_eq!(header["output"], "html_document");
}

#[test]
fn test_cars_chunk_options_are_kept_verbatim() {
    let nb = cars();
    let options: Vec<_> = nb
        .code_cells()
        .map(|c| c.metadata.chunk_options.as_deref())
        .collect();
    assert_eq!(
        options,
        vec![Some("setup, include=FALSE"), None, Some("echo=FALSE"), None, None]
    );
}

#[test]
fn test_cars_multiline_chunk_source() {
    let nb = cars();
    let python = nb.code_cells().nth(3).unwrap();
    assert_eq!(python.source, "import math\nprint(math.pi)");
}

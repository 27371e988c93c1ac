use rmd_babel::notebook::{BuildOptions, Cell, CodeCell, KernelEntry, Notebook, Visibility};
use rmd_babel::rmarkdown::{convert, front_matter};

fn notebook(source: &str) -> Notebook {
    convert(source, &BuildOptions::default()).notebook
}

fn only_code_cell(nb: &Notebook) -> &CodeCell {
    let code: Vec<_> = nb.code_cells().collect();
    assert_eq!(code.len(), 1, "expected exactly one code cell");
    code[0]
}

#[test]
fn test_python_chunk() {
    let nb = notebook("```{python}\nprint(1)\n```");
    assert_eq!(nb.cells.len(), 1);
    let cell = only_code_cell(&nb);
    assert_eq!(cell.source, "print(1)");
    assert_eq!(cell.execution_count, Some(1));
    assert_eq!(cell.metadata.kernel.as_deref(), Some("Python3"));
    assert_eq!(cell.metadata.tags, vec!["report_cell"]);
    assert_eq!(cell.metadata.visibility, None);
    assert!(nb
        .metadata
        .sos
        .unwrap()
        .kernels
        .contains(&KernelEntry::new("Python3", "python3")));
}

#[test]
fn test_echo_false_hides_input() {
    let nb = notebook("```{r, echo=FALSE}\nplot(x)\n```");
    let cell = only_code_cell(&nb);
    assert_eq!(
        cell.metadata.visibility,
        Some(Visibility {
            output_hidden: Some(false),
            source_hidden: Some(true),
        })
    );
    assert_eq!(cell.metadata.tags, vec!["report_output"]);
    assert_eq!(cell.metadata.chunk_options.as_deref(), Some("echo=FALSE"));
}

#[test]
fn test_include_false_hides_everything() {
    let nb = notebook("```{bash, include=FALSE}\nls\n```");
    let cell = only_code_cell(&nb);
    assert_eq!(
        cell.metadata.visibility,
        Some(Visibility {
            output_hidden: Some(true),
            source_hidden: Some(true),
        })
    );
    assert_eq!(cell.metadata.tags, vec!["scratch"]);
    assert_eq!(cell.metadata.kernel.as_deref(), Some("Bash"));
}

#[test]
fn test_include_false_wins_over_echo_false() {
    let nb = notebook("```{r, echo=FALSE, include=FALSE}\n1\n```");
    assert_eq!(only_code_cell(&nb).metadata.tags, vec!["scratch"]);
}

#[test]
fn test_engine_override_changes_kernel_not_options() {
    let nb = notebook("```{r, engine=\"python\"}\nprint(2)\n```");
    let cell = only_code_cell(&nb);
    assert_eq!(cell.metadata.kernel.as_deref(), Some("Python3"));
    assert_eq!(
        cell.metadata.chunk_options.as_deref(),
        Some("engine=\"python\"")
    );
}

#[test]
fn test_unknown_engine_becomes_its_own_kernel() {
    let nb = notebook("```{julia}\nprintln(1)\n```");
    assert_eq!(only_code_cell(&nb).metadata.kernel.as_deref(), Some("julia"));
    assert_eq!(
        nb.metadata.sos.unwrap().kernels.last(),
        Some(&KernelEntry::new("julia", "julia"))
    );
}

#[test]
fn test_adjacent_delimiters_are_not_a_header() {
    let lines = ["---", "---", "# Hi"];
    let (header, body) = front_matter::extract(&lines);
    assert!(header.is_none());
    assert_eq!(body, lines.to_vec());

    let nb = notebook("---\n---\n# Hi");
    assert!(nb.metadata.front_matter.is_none());
    assert!(nb.cells.iter().any(|c| c.source().contains("# Hi")));
}

#[test]
fn test_malformed_header_is_dropped_but_stripped() {
    let nb = notebook("---\ntitle: [unclosed\n---\nBody text.");
    assert!(nb.metadata.front_matter.is_none());
    assert_eq!(nb.cells.len(), 1);
    assert_eq!(nb.cells[0].source(), "Body text.");
}

#[test]
fn test_inline_span_is_relocated() {
    let nb = notebook("First paragraph.\n\nThe answer is `r 1+1`.\n");
    assert_eq!(nb.cells.len(), 2);
    assert!(matches!(&nb.cells[0], Cell::Markdown(md) if md.source == "First paragraph."));

    let Cell::Code(expand) = &nb.cells[1] else {
        panic!("expected the inline span in a code cell");
    };
    assert_eq!(
        expand.source,
        "%expand `r ` --in R\nThe answer is `r 1+1`."
    );
    assert_eq!(expand.metadata.kernel.as_deref(), Some("Markdown"));
    assert_eq!(expand.metadata.tags, vec!["report_output"]);
    assert_eq!(
        expand.metadata.visibility.and_then(|v| v.source_hidden),
        Some(true)
    );
    assert_eq!(
        nb.metadata.sos.unwrap().kernels.last(),
        Some(&KernelEntry::new("Markdown", "markdown"))
    );
}

#[test]
fn test_unterminated_chunk_is_kept() {
    let nb = notebook("Text.\n\n```{r}\nx <- 1\ny <- 2");
    assert_eq!(nb.cells.len(), 2);
    assert_eq!(only_code_cell(&nb).source, "x <- 1\ny <- 2");
}

#[test]
fn test_code_blank_lines_are_preserved() {
    let nb = notebook("```{r}\na <- 1\n\n\nb <- 2\n```");
    assert_eq!(only_code_cell(&nb).source, "a <- 1\n\n\nb <- 2");
}

//! Notebook JSON tests
//!
//! The written layout follows `nbformat.write`, so diffs against notebooks saved by Jupyter stay
//! small.

use rmd_babel::format::Format;
use rmd_babel::formats::IpynbFormat;
use rmd_babel::notebook::{BuildOptions, Notebook};
use rmd_babel::rmarkdown::convert;
use serde_json::{json, Value};

fn to_json(source: &str) -> String {
    let nb = convert(source, &BuildOptions::default()).notebook;
    IpynbFormat.serialize(&nb).unwrap()
}

#[test]
fn test_layout_matches_nbformat_write() {
    let text = to_json("```{r}\nx <- 1\ny <- 2\n```");
    assert!(text.starts_with("{\n \"cells\": [\n  {\n   \"cell_type\": \"code\",\n"));
    assert!(text.ends_with("\n}\n"));
    assert!(text.contains("   \"execution_count\": 1,\n"));
    assert!(text.contains("\"source\": [\n    \"x <- 1\\n\",\n    \"y <- 2\"\n   ]"));
}

#[test]
fn test_code_cell_fields() {
    let value: Value = serde_json::from_str(&to_json("```{r, echo=FALSE}\nplot(x)\n```")).unwrap();
    assert_eq!(
        value["cells"][0],
        json!({
            "cell_type": "code",
            "execution_count": 1,
            "metadata": {
                "Rmd_chunk_options": "echo=FALSE",
                "jupyter": {"output_hidden": false, "source_hidden": true},
                "kernel": "R",
                "tags": ["report_output"]
            },
            "outputs": [],
            "source": ["plot(x)"]
        })
    );
}

#[test]
fn test_markdown_cell_fields() {
    let value: Value = serde_json::from_str(&to_json("Just text.")).unwrap();
    assert_eq!(
        value["cells"][0],
        json!({"cell_type": "markdown", "metadata": {}, "source": ["Just text."]})
    );
}

#[test]
fn test_envelope() {
    let value: Value = serde_json::from_str(&to_json("```{bash}\nls\n```")).unwrap();
    assert_eq!(value["nbformat"], 4);
    assert_eq!(value["nbformat_minor"], 4);
    assert_eq!(
        value["metadata"]["kernelspec"],
        json!({"display_name": "SoS", "language": "sos", "name": "sos"})
    );
    assert_eq!(
        value["metadata"]["sos"]["kernels"],
        json!([["SoS", "sos", "", ""], ["Bash", "bash", "", ""]])
    );
    assert_eq!(value["metadata"]["language_info"]["file_extension"], ".sos");
}

#[test]
fn test_reads_notebooks_with_string_sources_and_outputs() {
    let saved = r#"{
 "cells": [
  {
   "cell_type": "code",
   "execution_count": 3,
   "metadata": {"kernel": "R"},
   "outputs": [{"name": "stdout", "output_type": "stream", "text": ["[1] 2\n"]}],
   "source": "1 + 1"
  }
 ],
 "metadata": {
  "kernelspec": {"display_name": "SoS", "language": "sos", "name": "sos"},
  "language_info": {"file_extension": ".sos", "mimetype": "text/x-sos", "name": "sos"}
 },
 "nbformat": 4,
 "nbformat_minor": 4
}"#;
    let nb: Notebook = IpynbFormat.parse(saved).unwrap();
    let cell = nb.code_cells().next().unwrap();
    assert_eq!(cell.source, "1 + 1");
    assert_eq!(cell.outputs.len(), 1);
    assert_eq!(cell.execution_count, Some(3));
}

const SOS_EXECUTED: &str = r##"{
 "cells": [
  {
   "cell_type": "code",
   "execution_count": 1,
   "metadata": {
    "execution": {"iopub.execute_input": "2024-03-01T10:00:00.000Z"},
    "kernel": "Python3",
    "papermill": {"duration": 0.41, "exception": false, "status": "completed"},
    "tags": ["report_cell"]
   },
   "outputs": [{"name": "stdout", "output_type": "stream", "text": ["2\n"]}],
   "source": ["print(1 + 1)"]
  }
 ],
 "metadata": {
  "kernelspec": {"display_name": "SoS", "language": "sos", "name": "sos"},
  "language_info": {
   "codemirror_mode": "sos",
   "file_extension": ".sos",
   "mimetype": "text/x-sos",
   "name": "sos",
   "nbconvert_exporter": "sos_notebook.converter.SoS_Exporter",
   "pygments_lexer": "sos"
  },
  "papermill": {"engine_name": "sos", "parameters": {}, "version": "2.4.0"},
  "sos": {
   "kernels": [
    ["SoS", "sos", "", ""],
    ["Python3", "python3", "Python3", "#FFD91A", {"name": "ipython", "version": 3}]
   ],
   "panel": {"displayed": true, "height": 0},
   "version": "0.22.6"
  }
 },
 "nbformat": 4,
 "nbformat_minor": 4
}
"##;

#[test]
fn test_reads_notebooks_executed_by_sos() {
    let nb: Notebook = IpynbFormat.parse(SOS_EXECUTED).unwrap();
    let kernels = &nb.metadata.sos.as_ref().unwrap().kernels;
    assert_eq!(kernels[1].display_name, "Python3");
    assert_eq!(kernels[1].name, "python3");
    assert_eq!(
        kernels[1].details,
        vec![json!("Python3"), json!("#FFD91A"), json!({"name": "ipython", "version": 3})]
    );

    let cell = nb.code_cells().next().unwrap();
    assert_eq!(cell.metadata.kernel.as_deref(), Some("Python3"));
    assert_eq!(cell.metadata.extra["papermill"]["status"], "completed");
}

#[test]
fn test_executed_metadata_survives_a_rewrite() {
    let nb: Notebook = IpynbFormat.parse(SOS_EXECUTED).unwrap();
    let text = IpynbFormat.serialize(&nb).unwrap();
    let original: Value = serde_json::from_str(SOS_EXECUTED).unwrap();
    let rewritten: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(rewritten, original);

    let keys = [
        "\"kernelspec\": {",
        "\"language_info\": {",
        "\"papermill\": {\n   \"engine_name\"",
        "\"sos\": {",
    ];
    let positions: Vec<usize> = keys.iter().map(|key| text.find(key).unwrap()).collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

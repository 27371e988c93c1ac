use proptest::prelude::*;
use rmd_babel::format::Format;
use rmd_babel::formats::IpynbFormat;
use rmd_babel::rmarkdown::assembler::BlockKind;
use rmd_babel::rmarkdown::fence::{parse_chunk_header, ChunkDisplay};
use rmd_babel::rmarkdown::front_matter;
use rmd_babel::rmarkdown::scanner::scan;
use rmd_babel::rmarkdown::RmarkdownFormat;

/// Plain prose lines: no fences, headings, inline spans or header delimiters.
fn prose_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,]{0,30}"
}

#[derive(Debug, Clone)]
enum Segment {
    Prose(Vec<String>),
    Chunk { engine: String, body: Vec<String> },
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        prop::collection::vec(prose_line(), 1..4).prop_map(Segment::Prose),
        (
            prop::sample::select(vec!["r", "python", "bash", "sh", "julia", "Rscript"]),
            prop::collection::vec("[a-z0-9 <()=+-]{0,20}", 1..5),
        )
            .prop_map(|(engine, body)| Segment::Chunk {
                engine: engine.to_string(),
                body,
            }),
    ]
}

fn render(segments: &[Segment]) -> (String, usize) {
    let mut lines = Vec::new();
    let mut chunks = 0;
    for segment in segments {
        match segment {
            Segment::Prose(text) => lines.extend(text.iter().cloned()),
            Segment::Chunk { engine, body } => {
                chunks += 1;
                lines.push(format!("```{{{engine}}}"));
                lines.extend(body.iter().cloned());
                lines.push("```".to_string());
            }
        }
    }
    (lines.join("\n"), chunks)
}

proptest! {
    #[test]
    fn fence_free_input_is_one_prose_block(lines in prop::collection::vec(prose_line(), 0..12)) {
        let text = lines.join("\n");
        let output = scan(text.lines());
        let expected = usize::from(!text.trim().is_empty());
        prop_assert_eq!(output.blocks.len(), expected);
        prop_assert!(output.blocks.iter().all(|b| b.kind == BlockKind::Prose));
    }

    #[test]
    fn one_code_block_per_chunk_numbered_in_order(segments in prop::collection::vec(segment(), 0..10)) {
        let (text, chunks) = render(&segments);
        let output = scan(text.lines());
        let sequences: Vec<u32> = output
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Code)
            .filter_map(|b| b.sequence)
            .collect();
        prop_assert_eq!(sequences.len(), chunks);
        prop_assert_eq!(sequences, (1..=chunks as u32).collect::<Vec<_>>());
    }

    #[test]
    fn well_formed_header_is_extracted(
        fields in prop::collection::btree_map("k[a-z]{0,7}", "v[a-z]{0,7}", 1..5),
        body in prop::collection::vec(prose_line(), 0..5),
    ) {
        let mut lines = vec!["---".to_string()];
        lines.extend(fields.iter().map(|(k, v)| format!("{k}: {v}")));
        lines.push("---".to_string());
        lines.extend(body.iter().cloned());
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

        let (header, rest) = front_matter::extract(&refs);
        let header = header.expect("header to parse");
        prop_assert_eq!(header.len(), fields.len());
        for (key, value) in &fields {
            prop_assert_eq!(header[key.as_str()].as_str(), Some(value.as_str()));
        }
        let expected: Vec<&str> = body.iter().map(String::as_str).collect();
        prop_assert_eq!(rest, expected);
    }

    #[test]
    fn input_without_header_is_untouched(body in prop::collection::vec(prose_line(), 0..8)) {
        let refs: Vec<&str> = body.iter().map(String::as_str).collect();
        let (header, rest) = front_matter::extract(&refs);
        prop_assert!(header.is_none());
        prop_assert_eq!(rest, refs);
    }

    #[test]
    fn kernel_list_survives_serialization(segments in prop::collection::vec(segment(), 0..8)) {
        let (text, _) = render(&segments);
        let nb = RmarkdownFormat.parse(&text).unwrap();
        let json = IpynbFormat.serialize(&nb).unwrap();
        let reread = IpynbFormat.parse(&json).unwrap();
        prop_assert_eq!(&reread.metadata.kernelspec, &nb.metadata.kernelspec);
        prop_assert_eq!(&reread.metadata.sos, &nb.metadata.sos);
    }

    #[test]
    fn visibility_ignores_the_engine(
        options in "[a-zA-Z=, .]{0,30}(echo=FALSE|include=FALSE|)[a-zA-Z=, ]{0,10}",
        engines in prop::sample::subsequence(vec!["r", "python", "bash", "julia"], 2),
    ) {
        let first = parse_chunk_header(&format!("```{{{}, {options}}}", engines[0]));
        let second = parse_chunk_header(&format!("```{{{}, {options}}}", engines[1]));
        let displays: Vec<ChunkDisplay> = [first, second]
            .into_iter()
            .map(|h| h.map(|h| h.display).unwrap_or(ChunkDisplay::Full))
            .collect();
        prop_assert_eq!(displays[0], displays[1]);
    }
}

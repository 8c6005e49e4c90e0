use super::*;
use crate::generate::recursion::{self, RecursionAlgorithm};
use crate::generate::sort::{self, SortAlgorithm};
use crate::generate::structure::{Structure, StructureOp, apply};
use crate::step::model::Step;

fn render(step: &Step) -> String {
    TextRenderer::default().render(&to_visual(step)).unwrap()
}

#[test]
fn bars_render_one_line_per_value_plus_caption() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[3, 1, 2], 15).unwrap();
    let text = render(&seq[0]);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("<- compare"));
    assert_eq!(lines[3], "> Comparing 3 and 1.");
}

#[test]
fn merge_frames_show_both_runs() {
    let seq = sort::generate(SortAlgorithm::Merge, &[2, 1], 15).unwrap();
    let compare = seq
        .iter()
        .find(|s| s.kind() == crate::step::model::StepKind::SortCompare)
        .unwrap();
    let text = render(compare);
    assert!(text.contains("left run:\n2 |"));
    assert!(text.contains("right run:\n1 |"));
    assert!(text.contains("<- compare"));
}

#[test]
fn hanoi_frames_show_rods() {
    let seq = recursion::generate(RecursionAlgorithm::TowerOfHanoi, 2, 5).unwrap();
    let text = render(seq.last().unwrap());
    assert!(text.contains("A: \n"));
    assert!(text.contains("C: 2 1\n"));
}

#[test]
fn linked_list_renders_arrows() {
    let list = Structure::with_values(
        StructureKind::LinkedList,
        vec!["x".to_owned(), "y".to_owned()],
        9,
    )
    .unwrap();
    let out = apply(&list, &StructureOp::Clear).unwrap();
    assert!(render(&out.steps[0]).starts_with("(empty list, capacity 9)"));

    let out = apply(
        &list,
        &StructureOp::InsertTail {
            value: "z".to_owned(),
        },
    )
    .unwrap();
    let text = render(&out.steps[0]);
    assert!(text.starts_with("[x] -> [y] -> *[z]* -> null"));
    assert!(text.contains("head: x, tail: z  (3/9)"));
}

#[test]
fn text_sink_writes_each_frame() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[1, 2], 15).unwrap();
    let mut sink = TextSink::new(Vec::new());
    for (i, step) in seq.iter().enumerate() {
        sink.on_step(&PlaybackFrame {
            index: i,
            total: seq.len(),
            step,
        });
    }
    sink.on_status(PlaybackStatus::Finished);
    assert!(sink.take_error().is_none());
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert!(text.starts_with("--- step 1/3 [sort-compare]\n"));
    assert!(text.contains("--- step 3/3 [sort-complete]\n"));
    assert!(text.ends_with("--- finished\n"));
}

struct FailingRenderer;

impl FrameRenderer for FailingRenderer {
    type Output = String;

    fn render(&mut self, _frame: &VisualFrame) -> VizResult<String> {
        Err(crate::foundation::error::VizError::operation("no glyphs"))
    }
}

#[test]
fn text_sink_keeps_render_errors() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[1, 2], 15).unwrap();
    let mut sink = TextSink::with_renderer(Vec::new(), FailingRenderer);
    for (i, step) in seq.iter().enumerate() {
        sink.on_step(&PlaybackFrame {
            index: i,
            total: seq.len(),
            step,
        });
    }
    assert!(sink.has_error());
    let err = sink.take_error().unwrap();
    assert!(err.to_string().contains("no glyphs"));
    assert!(sink.into_inner().is_empty());
}

struct FullWriter;

impl io::Write for FullWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::StorageFull, "device full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn text_sink_keeps_the_first_write_error() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[1, 2], 15).unwrap();
    let mut sink = TextSink::new(FullWriter);
    sink.on_step(&PlaybackFrame {
        index: 0,
        total: seq.len(),
        step: &seq[0],
    });
    sink.on_status(PlaybackStatus::Finished);
    assert_eq!(
        sink.take_error().map(|e| e.kind()),
        Some(io::ErrorKind::StorageFull)
    );
    assert!(sink.take_error().is_none());
}

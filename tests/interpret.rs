//! End-to-end properties of reading and layout.

use aspic::geometry::{Arc, Closed};
use aspic::types::{BBox, pt};
use aspic::{Document, Interpreter, ReadFailure, Settings, Shape};

fn run(source: &str) -> Document {
    match Interpreter::new(Settings::default().with_timestamp("today")).run("<test>", source) {
        Ok(doc) => doc,
        Err(failure) => panic!("unexpected errors {:?} in:\n{source}", failure.numbers()),
    }
}

fn fail(source: &str) -> ReadFailure {
    Interpreter::new(Settings::default())
        .run("<test>", source)
        .expect_err("expected the run to fail")
}

fn closed(doc: &Document, index: usize) -> &Closed {
    match &doc.scene.iter().nth(index).unwrap().shape {
        Shape::Closed(c) => c,
        other => panic!("expected a closed shape, got {other:?}"),
    }
}

fn arc(doc: &Document, index: usize) -> &Arc {
    match &doc.scene.iter().nth(index).unwrap().shape {
        Shape::Arc(a) => a,
        other => panic!("expected an arc, got {other:?}"),
    }
}

fn distance(a: glam::IVec2, b: glam::IVec2) -> f64 {
    (a - b).as_dvec2().length()
}

#[test]
fn one_item_per_drawing_command() {
    let doc = run(
        "macro two {box; circle;};\n\
         two;\n\
         line; arc; curve to (10, 10); ellipse;\n\
         two;\n\
         text \"x\";\n",
    );
    assert_eq!(doc.scene.len(), 9);
}

#[test]
fn variables_substitute_and_dollars_escape() {
    let doc = run("set who \"World\";\ntext \"Hello $who, $$5\";\n");
    let item = doc.scene.iter().next().unwrap();
    assert_eq!(item.header.strings[0].text(), "Hello World, $5");
    assert_eq!(doc.variable("who"), Some("World"));
    assert_eq!(doc.variable("date"), Some("today"));
}

#[test]
fn arc_ends_lie_on_the_circle() {
    let doc = run(
        "arc from (0,0) to (100,0) radius 100;\n\
         arc clockwise angle 120;\n\
         arc from (0,0) to (0,50);\n\
         arc from (10,10) to (20,-30) depth 8;\n",
    );
    for i in 0..4 {
        let a = arc(&doc, i);
        let r = f64::from(a.radius);
        assert!((distance(a.start, a.centre) - r).abs() <= 2.0, "start of arc {i}: {a:?}");
        assert!((distance(a.end, a.centre) - r).abs() <= 2.0, "end of arc {i}: {a:?}");
    }
}

#[test]
fn extreme_depths_do_not_overflow() {
    let doc = run("arc from (0,0) to (10,0) depth 1500000;\n");
    let a = arc(&doc, 0);
    assert!(a.radius >= 750_000_000, "{a:?}");
    assert!((distance(a.start, a.centre) - f64::from(a.radius)).abs() <= 2.0, "{a:?}");
}

#[test]
fn chord_and_radius_fix_the_centre() {
    let doc = run("arc from (0,0) to (100,0) radius 100;\n");
    let a = arc(&doc, 0);
    assert_eq!(a.centre.x, 50_000);
    let expected = (100_000f64.powi(2) - 50_000f64.powi(2)).sqrt();
    assert!((f64::from(a.centre.y) - expected).abs() <= 1.0);
}

#[test]
fn following_boxes_share_an_edge() {
    let doc = run("B1: box; box;\nbox width 100 depth 50; box width 100 depth 50;\n");
    let (b1, b2) = (closed(&doc, 0), closed(&doc, 1));
    assert_eq!(b1.centre.x + b1.width / 2, b2.centre.x - b2.width / 2);

    let (b3, b4) = (closed(&doc, 2), closed(&doc, 3));
    assert_eq!(b4.centre.x - b3.centre.x, 100_000);
}

#[test]
fn line_sizes() {
    let doc = run("line right 72;\n");
    let Shape::Line(line) = &doc.scene.iter().next().unwrap().shape else {
        panic!("expected a line");
    };
    assert_eq!(line.size, pt(72_000, 0));
}

#[test]
fn bounding_box_only_grows() {
    let statements = [
        "box;",
        "arrow;",
        "circle \"text\";",
        "down;",
        "arc clockwise;",
        "line left 200;",
        "ibox at (500, 500);",
        "curve to (-300, 20);",
        "ellipse filled 0.5;",
    ];
    let mut previous: Option<BBox> = None;
    let mut source = String::new();
    for statement in statements {
        source.push_str(statement);
        source.push('\n');
        let bbox = run(&source).bbox;
        if let Some(prev) = previous {
            assert!(bbox.min.x <= prev.min.x && bbox.min.y <= prev.min.y, "{source}");
            assert!(bbox.max.x >= prev.max.x && bbox.max.y >= prev.max.y, "{source}");
        }
        previous = Some(bbox);
    }
}

#[test]
fn recursion_is_fatal() {
    let failure = fail("macro again {box; again;};\nagain;\nbox;\n");
    assert!(failure.abandoned);
    assert_eq!(failure.numbers(), vec![41]);
}

#[test]
fn unknown_command_means_no_document() {
    let failure = fail("box;\nsquiggle;\ncircle;\n");
    assert!(!failure.abandoned);
    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].line(), "squiggle;");
}

#[test]
fn frame_pads_the_extent() {
    let plain = run("box;\n").bbox;
    let framed = run("boundingbox 10; box;\n");
    assert_eq!(framed.bbox.min, plain.min - pt(10_000, 10_000));
    assert_eq!(framed.bbox.max, plain.max + pt(10_000, 10_000));
    assert!(framed.frame_item().is_some());
}

#[test]
fn scene_dump() {
    let doc = run("box \"A\";\narrow;\ncircle \"B\";\n");
    insta::assert_snapshot!(doc.scene.to_string(), @r#"
    box at (0,0) size 72x36 thickness 0.5
      "A" Centre
    line from (36,0) by (72,0) arrow end head 10x10 thickness 0.4
    circle at (144,0) size 72x72 thickness 0.4
      "B" Centre
    "#);
}

#[test]
fn scene_dump_from_macro() {
    let doc = run("macro pair {box dashed level 1; line down 10 \"x\"/r;};\npair;\n");
    insta::assert_snapshot!(doc.scene.to_string(), @r#"
    box at (0,0) size 72x36 thickness 0.5 dash 7,5 level 1
    line from (0,-18) by (0,-10) thickness 0.4
      "x" Right
    "#);
    assert_eq!((doc.min_level, doc.max_level), (0, 1));
}

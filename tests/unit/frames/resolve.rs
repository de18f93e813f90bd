use super::*;
use crate::document::tree::Document;
use crate::layer::is_layer;

fn layers(labels: &[&str]) -> Vec<Layer> {
    let mut svg = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">"#,
    );
    for label in labels {
        svg.push_str(&format!(
            r#"<g inkscape:groupmode="layer" inkscape:label="{label}"/>"#
        ));
    }
    svg.push_str("</svg>");
    let doc = Document::parse(&svg).unwrap();
    doc.elements()
        .into_iter()
        .filter(|&id| is_layer(&doc, id))
        .map(|id| Layer::from_node(&doc, id))
        .collect()
}

#[test]
fn no_layers_means_no_frame_specs() {
    assert!(matches!(
        resolve_max_frame(&[]),
        Err(LayerExportError::NoFrameSpecsFound)
    ));
}

#[test]
fn layers_without_specs_are_not_enough() {
    assert!(matches!(
        resolve_max_frame(&layers(&["deco", "notes", "x__[end]"])),
        Err(LayerExportError::NoFrameSpecsFound)
    ));
}

#[test]
fn max_spans_bare_tokens_and_range_endpoints() {
    assert_eq!(resolve_max_frame(&layers(&["a__[1,2,4]", "b__[3--6]"])).unwrap(), 6);
    assert_eq!(resolve_max_frame(&layers(&["a__[9]", "b__[3--6]"])).unwrap(), 9);
}

#[test]
fn end_and_label_digits_do_not_count() {
    let ls = layers(&["bg2000__[1--end]", "char__[2,3]", "fx__[3--5]"]);
    assert_eq!(resolve_max_frame(&ls).unwrap(), 5);
}

#[test]
fn absurd_frame_numbers_are_rejected() {
    let err = resolve_max_frame(&layers(&["a__[1--99999]"])).unwrap_err();
    assert!(matches!(err, LayerExportError::Validation(_)));

    let err = resolve_max_frame(&layers(&["huge__[99999999999]"])).unwrap_err();
    assert!(matches!(
        err,
        LayerExportError::InvalidFrameToken { ref layer, .. } if layer == "huge__[99999999999]"
    ));
}

use super::*;

const SAMPLES: &[&str] = &[
    "display:inline",
    "display:none;opacity:0.5",
    "opacity:0.25;fill:#ff0000",
    "fill:url(#grad);display:inline;stroke-width:2",
    "font-family:'DejaVu Sans'",
];

#[test]
fn toggle_sets_display_and_keeps_everything_else() {
    for &s in SAMPLES {
        let before = StyleMap::parse(Some(s)).unwrap();
        for visible in [true, false] {
            let out = toggle_display(Some(s), visible).unwrap();
            let after = StyleMap::parse(Some(&out)).unwrap();
            assert_eq!(
                after.get("display"),
                Some(if visible { "inline" } else { "none" })
            );
            for (k, v) in before.iter().filter(|(k, _)| *k != "display") {
                assert_eq!(after.get(k), Some(v), "{k} lost in {out}");
            }
        }
    }
}

#[test]
fn toggle_is_idempotent() {
    for &s in SAMPLES {
        for visible in [true, false] {
            let once = toggle_display(Some(s), visible).unwrap();
            let twice = toggle_display(Some(&once), visible).unwrap();
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn display_keeps_its_position() {
    assert_eq!(
        toggle_display(Some("opacity:1;display:none;fill:red"), true).unwrap(),
        "opacity:1;display:inline;fill:red"
    );
    assert_eq!(
        toggle_display(Some("opacity:1"), false).unwrap(),
        "opacity:1;display:none"
    );
}

#[test]
fn absent_or_empty_style_is_implicitly_hidden() {
    assert_eq!(toggle_display(None, true).unwrap(), "display:inline");
    assert_eq!(toggle_display(Some(""), false).unwrap(), "display:none");
    assert_eq!(StyleMap::parse(None).unwrap().to_style_string(), IMPLICIT_STYLE);
}

#[test]
fn missing_colon_is_malformed() {
    let err = toggle_display(Some("display"), true).unwrap_err();
    match err {
        LayerExportError::MalformedStyle {
            layer,
            frame,
            entry,
            style,
        } => {
            assert_eq!(entry, "display");
            assert_eq!(style, "display");
            assert!(layer.is_empty());
            assert_eq!(frame, None);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(StyleMap::parse(Some("fill:red;oops;opacity:1")).is_err());
}

#[test]
fn value_is_split_on_first_colon_only() {
    let map = StyleMap::parse(Some("filter:url(data:x);display:none")).unwrap();
    assert_eq!(map.get("filter"), Some("url(data:x)"));
    assert_eq!(map.len(), 2);
}

#[test]
fn trailing_separator_is_skipped() {
    assert_eq!(
        toggle_display(Some("fill:red;"), true).unwrap(),
        "fill:red;display:inline"
    );
}

#[test]
fn repeated_key_keeps_first_slot_and_last_value() {
    let map = StyleMap::parse(Some("display:inline;fill:red;display:none")).unwrap();
    assert_eq!(map.to_style_string(), "display:none;fill:red");
}

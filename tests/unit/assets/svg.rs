use super::*;
use crate::shapes::{
    classify::{ClassifyRules, Zone, classify_shapes},
    extract::extract_shapes,
};

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="600" viewBox="0 0 600 600">
  <style>.ink { fill: #000000 }</style>
  <path id="body" d="M10 100 H60 V150 H10 Z" fill="#000000"/>
  <path id="head" d="M100 100 H140 V140 H100 Z" style="fill:#000000"/>
  <path id="eye" d="M110 110 H120 V120 H110 Z" fill="#FFFFFF"/>
  <path id="accent" d="M200 100 H240 V140 H200 Z" fill="#ff0000"/>
  <g transform="translate(0 300)">
    <path id="word" d="M50 100 H150 V130 H50 Z" fill="#000"/>
  </g>
  <path id="script" class="ink" d="M20 500 H80 V520 H20 Z"/>
  <path id="stray" d="M700 10 H720 V30 H700 Z" fill="#000000"/>
</svg>"##;

fn logo() -> SvgIllustration {
    SvgIllustration::from_data(LOGO.as_bytes(), &Palette::default()).unwrap()
}

#[test]
fn tags_shapes_by_resolved_fill_color() {
    let ill = logo();
    let tagged = ill.shapes();
    let labels: Vec<(&str, FillRole)> = tagged
        .iter()
        .map(|s| (ill.label(s.id).unwrap(), s.role))
        .collect();

    assert_eq!(
        labels,
        vec![
            ("body", FillRole::Ink),
            ("head", FillRole::Ink),
            ("eye", FillRole::NegativeSpace),
            ("word", FillRole::Ink),
            ("script", FillRole::Ink),
            ("stray", FillRole::Ink),
        ]
    );
}

#[test]
fn measures_in_canvas_coordinates() {
    let ill = logo();
    let word = ill
        .shapes()
        .into_iter()
        .find(|s| ill.label(s.id) == Some("word"))
        .unwrap();
    let bbox = ill.measure(word.id).unwrap();
    assert!((bbox.y - 400.0).abs() < 1e-3);
    assert!((bbox.height - 30.0).abs() < 1e-3);
    assert!((word.path_length - 260.0).abs() < 1e-2);
}

#[test]
fn view_box_comes_from_canvas_size() {
    let vb = logo().view_box().unwrap();
    assert_eq!(vb.width, 600.0);
    assert_eq!(vb.height, 600.0);
}

#[test]
fn classification_of_parsed_logo() {
    let ill = logo();
    let rules = ClassifyRules {
        view_box: ill.view_box().unwrap(),
        ..ClassifyRules::default()
    };
    let classified = classify_shapes(&extract_shapes(&ill), &rules);
    let labels = |zone: Zone| -> Vec<&str> {
        classified
            .group(zone)
            .ink
            .iter()
            .map(|s| ill.label(s.id).unwrap())
            .collect()
    };

    assert_eq!(labels(Zone::Emblem), vec!["body", "head"]);
    assert_eq!(labels(Zone::Wordmark), vec!["word"]);
    assert_eq!(labels(Zone::Script), vec!["script"]);
    assert_eq!(classified.emblem.negative_space.len(), 1);
}

#[test]
fn invalid_svg_is_an_error() {
    assert!(parse_svg(b"<svg").is_err());
    assert!(SvgIllustration::from_data(b"not svg", &Palette::default()).is_err());
}

use super::ConfidenceModel;
use crate::domain::models::ConfidenceItem;
use crate::domain::models::RenderableConfidence;
use crate::domain::models::Tier;

#[test]
fn it_classifies_tier_boundaries() {
    assert_eq!(ConfidenceModel::tier(0.7), Tier::Medium);
    assert_eq!(ConfidenceModel::tier(0.70001), Tier::High);
    assert_eq!(ConfidenceModel::tier(0.4), Tier::Low);
    assert_eq!(ConfidenceModel::tier(0.40001), Tier::Medium);
}

#[test]
fn it_classifies_out_of_range_values() {
    assert_eq!(ConfidenceModel::tier(1.5), Tier::High);
    assert_eq!(ConfidenceModel::tier(-0.2), Tier::Low);
}

#[test]
fn it_rounds_labels() {
    assert_eq!(ConfidenceModel::percent_label(0.82), "82%");
    assert_eq!(ConfidenceModel::percent_label(0.125), "13%");
    assert_eq!(ConfidenceModel::percent_label(0.994), "99%");
    assert_eq!(ConfidenceModel::percent_label(0.996), "100%");
    assert_eq!(ConfidenceModel::percent_label(0.0), "0%");
    assert_eq!(ConfidenceModel::percent_label(-0.001), "0%");
}

#[test]
fn it_does_not_clamp_labels() {
    assert_eq!(ConfidenceModel::percent_label(1.3), "130%");
    assert_eq!(ConfidenceModel::percent_label(-0.25), "-25%");
}

#[test]
fn it_treats_none_as_no_data() {
    assert_eq!(ConfidenceModel::normalize(None), RenderableConfidence::NoData);
}

#[test]
fn it_treats_empty_as_no_data() {
    assert_eq!(ConfidenceModel::normalize(Some(&[])), RenderableConfidence::NoData);
}

#[test]
fn it_normalizes_in_source_order() {
    let items = vec![
        ConfidenceItem::new("Cold", 0.31),
        ConfidenceItem::new("Flu", 0.82),
        ConfidenceItem::new("Cold", 0.31),
    ];

    let bars = match ConfidenceModel::normalize(Some(&items)) {
        RenderableConfidence::Bars(bars) => bars,
        RenderableConfidence::NoData => panic!("Expected bars"),
    };

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].name, "Cold");
    assert_eq!(bars[0].tier, Tier::Low);
    assert_eq!(bars[0].label, "31%");
    assert_eq!(bars[1].name, "Flu");
    assert_eq!(bars[1].tier, Tier::High);
    assert_eq!(bars[1].label, "82%");
    assert_eq!(bars[2].name, "Cold");
}

#[test]
fn it_passes_out_of_range_widths_through() {
    let items = vec![ConfidenceItem::new("Over", 1.5), ConfidenceItem::new("Under", -0.5)];

    let bars = match ConfidenceModel::normalize(Some(&items)) {
        RenderableConfidence::Bars(bars) => bars,
        RenderableConfidence::NoData => panic!("Expected bars"),
    };

    assert_eq!(bars[0].prob, 1.5);
    assert_eq!(bars[0].width, 150.0);
    assert_eq!(bars[1].width, -50.0);
}

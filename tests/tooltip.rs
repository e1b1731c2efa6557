use scalarboard::data::tooltip::rank;
use scalarboard::{TooltipRow, TooltipSorting};

fn rows(values: &[f64]) -> Vec<TooltipRow> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| TooltipRow {
            run_id: format!("run{}", i),
            label: format!("run{}", i),
            value,
            color_index: i,
            rank: 0,
        })
        .collect()
}

fn ids(rows: &[TooltipRow]) -> Vec<&str> {
    rows.iter().map(|r| r.run_id.as_str()).collect()
}

#[test]
fn default_keeps_insertion_order() {
    let out = rank(rows(&[3.0, 1.0, 2.0]), TooltipSorting::Default, None);
    assert_eq!(ids(&out), vec!["run0", "run1", "run2"]);
}

#[test]
fn ascending_sorts_by_value() {
    let out = rank(rows(&[3.0, 1.0, 2.0]), TooltipSorting::Ascending, None);
    assert_eq!(ids(&out), vec!["run1", "run2", "run0"]);
}

#[test]
fn ascending_reversed_equals_descending_without_ties() {
    let input = rows(&[3.0, 1.0, 7.0, 2.0]);
    let mut asc = rank(input.clone(), TooltipSorting::Ascending, None);
    asc.reverse();
    let desc = rank(input, TooltipSorting::Descending, None);
    assert_eq!(ids(&asc), ids(&desc));
}

#[test]
fn ties_keep_insertion_order() {
    let out = rank(rows(&[2.0, 1.0, 2.0]), TooltipSorting::Ascending, None);
    assert_eq!(
        ids(&out),
        vec!["run1", "run0", "run2"],
        "stable sort must keep tied rows in insertion order"
    );
}

#[test]
fn nearest_sorts_by_distance_to_cursor() {
    let out = rank(rows(&[0.0, 5.0, 3.0]), TooltipSorting::Nearest, Some(4.0));
    assert_eq!(ids(&out), vec!["run1", "run2", "run0"]);
}

#[test]
fn nearest_without_cursor_falls_back_to_default() {
    let out = rank(rows(&[3.0, 1.0, 2.0]), TooltipSorting::Nearest, None);
    assert_eq!(
        ids(&out),
        vec!["run0", "run1", "run2"],
        "missing cursor value must not be an error"
    );
}

#[test]
fn ranks_are_assigned_after_ordering() {
    let out = rank(rows(&[3.0, 1.0, 2.0]), TooltipSorting::Descending, None);
    for (i, row) in out.iter().enumerate() {
        assert_eq!(row.rank, i);
    }
    assert_eq!(out[0].value, 3.0);
}

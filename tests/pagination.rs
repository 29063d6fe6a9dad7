use mailproof_pdf::{page_count, page_windows};

#[test]
fn at_least_one_page_even_for_empty_content() {
    assert_eq!(page_count(0.0, 900.0), 1);
    assert_eq!(page_count(-5.0, 900.0), 1);
    assert_eq!(page_windows(0.0, 900.0).len(), 1);
    assert_eq!(page_windows(0.0, 900.0)[0].offset, 0.0);
}

#[test]
fn single_page_when_content_fits() {
    assert_eq!(page_count(899.9, 900.0), 1);
    assert_eq!(page_count(900.0, 900.0), 1);
}

#[test]
fn ceil_division_above_one_page() {
    assert_eq!(page_count(900.1, 900.0), 2);
    assert_eq!(page_count(1800.0, 900.0), 2);
    assert_eq!(page_count(1800.1, 900.0), 3);
}

#[test]
fn spec_example_three_windows() {
    // Measured height 2150 at content height 900 -> 3 pages, offsets
    // [0, 900, 1800].
    let windows = page_windows(2150.0, 900.0);
    assert_eq!(windows.len(), 3);
    let offsets: Vec<f32> = windows.iter().map(|w| w.offset).collect();
    assert_eq!(offsets, vec![0.0, 900.0, 1800.0]);
}

#[test]
fn windows_are_contiguous_and_non_overlapping() {
    let c = 618.0;
    let windows = page_windows(4321.0, c);
    assert!(windows.len() >= 2);
    for pair in windows.windows(2) {
        assert_eq!(pair[1].offset, pair[0].offset + c);
        assert_eq!(pair[1].index, pair[0].index + 1);
    }
    assert_eq!(windows[0].offset, 0.0);
}

#[test]
fn degenerate_content_height_is_clamped_to_one_page() {
    assert_eq!(page_count(1000.0, 0.0), 1);
    assert_eq!(page_count(1000.0, -1.0), 1);
}

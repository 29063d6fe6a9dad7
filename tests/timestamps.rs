use mailproof_pdf::format_timestamp;

#[test]
fn formats_fixed_locale_display_string() {
    assert_eq!(
        format_timestamp("2024-03-01", "09:00", 0),
        "Friday, March 1, 2024 9:00 AM"
    );
    assert_eq!(
        format_timestamp("2024-03-01", "09:00", 5),
        "Friday, March 1, 2024 9:05 AM"
    );
    assert_eq!(
        format_timestamp("2024-03-01", "13:07", 0),
        "Friday, March 1, 2024 1:07 PM"
    );
}

#[test]
fn rolls_over_midnight_and_year() {
    // 23:50 + 20 minutes crosses midnight and increments the date.
    assert_eq!(
        format_timestamp("2024-03-01", "23:50", 20),
        "Saturday, March 2, 2024 12:10 AM"
    );
    assert_eq!(
        format_timestamp("2024-12-31", "23:50", 20),
        "Wednesday, January 1, 2025 12:10 AM"
    );
    // Leap day.
    assert_eq!(
        format_timestamp("2024-02-28", "23:00", 90),
        "Thursday, February 29, 2024 12:30 AM"
    );
}

#[test]
fn negative_offsets_move_backwards() {
    assert_eq!(
        format_timestamp("2024-03-01", "00:05", -10),
        "Thursday, February 29, 2024 11:55 PM"
    );
}

#[test]
fn offsets_are_additive() {
    // format(date, time, a + b) must equal formatting the instant produced
    // by a and then shifting it by b.
    let combined = format_timestamp("2024-01-31", "23:00", 60 + 45);
    let stepped = format_timestamp("2024-02-01", "00:00", 45);
    assert_eq!(combined, stepped);
    assert_eq!(combined, "Thursday, February 1, 2024 12:45 AM");
}

#[test]
fn missing_input_yields_invalid_sentinel() {
    assert_eq!(format_timestamp("", "09:00", 0), "Invalid");
    assert_eq!(format_timestamp("2024-03-01", "", 0), "Invalid");
    assert_eq!(format_timestamp("  ", "  ", 0), "Invalid");
}

#[test]
fn unparsable_input_yields_error_sentinel() {
    assert_eq!(format_timestamp("2024-13-99", "09:00", 0), "Error");
    assert_eq!(format_timestamp("not-a-date", "09:00", 0), "Error");
    assert_eq!(format_timestamp("2024-03-01", "25:61", 0), "Error");
    assert_eq!(format_timestamp("2024-03-01", "nine", 0), "Error");
}
